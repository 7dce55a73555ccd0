//! The per-request context and the middleware chain it drives.

mod core;
mod handler;
mod tests;

pub use self::core::Context;
pub use handler::{HandlerFunc, handler};

//! TCP server hosting the dispatch engine.
//!
//! Each accepted connection is read once, parsed, pushed through the
//! [`Engine`](crate::Engine) and answered with whatever response the handler
//! chain left behind.

mod config;
mod error;
mod http_server;
mod tests;

// Re-export public items
pub use config::{DEFAULT_PORT, ServerConfig, resolve_address};
pub use error::Error;
pub use http_server::HttpServer;

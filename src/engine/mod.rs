//! The dispatch engine and route groups.

mod dispatch;
mod group;

pub use dispatch::{Engine, EngineConfig};
pub use group::RouterGroup;

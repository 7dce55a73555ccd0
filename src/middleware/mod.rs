//! Stock middleware.
//!
//! Both wrap the rest of the chain, so install them before anything that
//! should be timed or protected.

mod logger;
mod recovery;

pub use logger::logger;
pub use recovery::recovery;

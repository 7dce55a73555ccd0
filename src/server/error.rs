//! Error types for the HTTP server.

use thiserror::Error;

use crate::http::Error as ParserError;
use crate::router::RouteError;

/// Errors that can occur while configuring or running the server.
#[derive(Debug, Error)]
pub enum Error {
    /// A request could not be parsed; the client got a 400.
    #[error("Parse error: {0}")]
    ParseError(#[from] ParserError),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// A route could not be registered.
    #[error("Route error: {0}")]
    Route(#[from] RouteError),

    /// The listen address could not be parsed.
    #[error("Invalid listen address: {0}")]
    InvalidAddress(String),
}

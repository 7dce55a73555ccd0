//! Errors raised while reading a request off the wire.

use thiserror::Error;

/// Errors that can occur while parsing an incoming HTTP request.
#[derive(Debug, Error)]
pub enum Error {
    /// The request line names a method the router does not know.
    #[error("Invalid HTTP method: {0}")]
    InvalidMethod(String),

    /// The request target is empty or does not start with `/`.
    #[error("Invalid request target: {0}")]
    InvalidPath(String),

    /// The request line does not have exactly three parts.
    #[error("Malformed request line: {0}")]
    MalformedRequestLine(String),

    /// The protocol token on the request line is not supported.
    #[error("Invalid HTTP version: {0}")]
    InvalidVersion(String),

    /// A header required by the protocol version is absent.
    #[error("Required header is missing: {0}")]
    MissingHeader(String),

    /// A header line has no `:` separator.
    #[error("Invalid header format: {0}")]
    InvalidHeaderFormat(String),

    /// Nothing was received.
    #[error("Empty request")]
    EmptyRequest,

    /// The body could not be decoded as JSON.
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
}

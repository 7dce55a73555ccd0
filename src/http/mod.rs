//! The HTTP/1.x wire layer the router sits on.
//!
//! Requests are parsed from raw bytes into an [`HttpRequest`]; handlers write
//! into an [`HttpResponse`], which the server encodes back onto the socket.

mod request;
mod response;
mod method;
mod version;
mod error;

pub use request::{HttpRequest, parse_request};
pub use response::{HttpResponse, StatusCode};
pub use method::Method;
pub use version::HttpVersion;
pub use error::Error;

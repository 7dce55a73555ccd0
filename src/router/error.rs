//! Route registration errors.

use thiserror::Error;

use crate::http::Method;

/// A route that cannot be registered.
///
/// These are configuration mistakes: they surface while the route table is
/// being built and are meant to stop start-up, never to reach a client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// A `*name` segment is followed by further segments.
    #[error("wildcard must terminate the pattern: {method} {pattern}")]
    WildcardNotLast { method: Method, pattern: String },

    /// The pattern is already answered by another route, typically one with
    /// a parameter or wildcard at the same position.
    #[error("conflicting route: {method} {pattern} collides with {existing}")]
    Conflict {
        method: Method,
        pattern: String,
        existing: String,
    },

    /// The pattern ends on a node that already terminates another route.
    #[error("duplicate route registration: {method} {pattern} (already bound to {existing})")]
    Duplicate {
        method: Method,
        pattern: String,
        existing: String,
    },
}

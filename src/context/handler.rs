//! Handler and middleware function types.

use std::sync::Arc;

use crate::context::Context;

/// A route handler or middleware.
///
/// Handlers receive the request's [`Context`], write the response through
/// it and may call [`Context::next`] or [`Context::abort`] to steer the rest
/// of the chain. They are shared between requests, hence `Send + Sync`.
pub type HandlerFunc = Arc<dyn Fn(&mut Context) + Send + Sync>;

/// Box a closure or function into a [`HandlerFunc`].
pub fn handler<F>(f: F) -> HandlerFunc
where
    F: Fn(&mut Context) + Send + Sync + 'static,
{
    Arc::new(f)
}

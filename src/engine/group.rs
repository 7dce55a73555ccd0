//! Route groups: a shared path prefix plus middleware scoped to it.

use std::sync::Arc;

use crate::context::{Context, HandlerFunc};
use crate::engine::dispatch::{Engine, GroupEntry};
use crate::http::Method;
use crate::router::RouteError;

/// A prefix under which routes are registered and middleware applies.
///
/// Group middleware is not copied into sub-groups. At dispatch time the
/// engine collects the middleware of every group whose prefix starts the
/// request path, so a request under `/api/v1` runs both the `/api` and the
/// `/api/v1` middleware.
///
/// ```
/// use microroute_rs::{Context, Engine, StatusCode};
///
/// let mut engine = Engine::default();
/// let mut api = engine.group("/api");
/// api.use_middleware(|c: &mut Context| {
///     c.set_header("X-Api", "1");
///     c.next();
/// });
///
/// let mut v1 = api.group("/v1");
/// assert_eq!(v1.prefix(), "/api/v1");
/// v1.get("/ping", |c: &mut Context| c.string(StatusCode::Ok, "pong")).unwrap();
/// ```
pub struct RouterGroup<'e> {
    engine: &'e mut Engine,
    prefix: String,
    // Index into the engine's group list once middleware was added.
    slot: Option<usize>,
}

impl<'e> RouterGroup<'e> {
    pub(crate) fn new(engine: &'e mut Engine, prefix: String) -> Self {
        Self {
            engine,
            prefix,
            slot: None,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// A sub-group whose prefix is this group's prefix followed by `prefix`.
    pub fn group(&mut self, prefix: &str) -> RouterGroup<'_> {
        let prefix = format!("{}{prefix}", self.prefix);
        RouterGroup::new(&mut *self.engine, prefix)
    }

    /// Append middleware for requests under this group's prefix.
    ///
    /// The first call makes the group known to the engine.
    pub fn use_middleware<F>(&mut self, middleware: F) -> &mut Self
    where
        F: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.use_all([Arc::new(middleware) as HandlerFunc])
    }

    /// Append several already boxed middleware, in order.
    pub fn use_all(&mut self, middlewares: impl IntoIterator<Item = HandlerFunc>) -> &mut Self {
        let slot = match self.slot {
            Some(slot) => slot,
            None => {
                self.engine.groups.push(GroupEntry {
                    prefix: self.prefix.clone(),
                    middlewares: Vec::new(),
                });
                let slot = self.engine.groups.len() - 1;
                self.slot = Some(slot);
                slot
            }
        };
        self.engine.groups[slot].middlewares.extend(middlewares);
        self
    }

    /// Register `handler` for `method` requests to `prefix + path`.
    pub fn add_route<F>(&mut self, method: Method, path: &str, handler: F) -> Result<(), RouteError>
    where
        F: Fn(&mut Context) + Send + Sync + 'static,
    {
        let pattern = join_path(&self.prefix, path);
        self.engine.register(method, pattern, Arc::new(handler))
    }

    pub fn get<F>(&mut self, path: &str, handler: F) -> Result<(), RouteError>
    where
        F: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.add_route(Method::GET, path, handler)
    }

    pub fn post<F>(&mut self, path: &str, handler: F) -> Result<(), RouteError>
    where
        F: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.add_route(Method::POST, path, handler)
    }

    pub fn put<F>(&mut self, path: &str, handler: F) -> Result<(), RouteError>
    where
        F: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.add_route(Method::PUT, path, handler)
    }

    pub fn delete<F>(&mut self, path: &str, handler: F) -> Result<(), RouteError>
    where
        F: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.add_route(Method::DELETE, path, handler)
    }

    pub fn patch<F>(&mut self, path: &str, handler: F) -> Result<(), RouteError>
    where
        F: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.add_route(Method::PATCH, path, handler)
    }
}

/// `prefix + path`, with a leading `/` added when neither supplies one.
pub(crate) fn join_path(prefix: &str, path: &str) -> String {
    let full = format!("{prefix}{path}");
    if full.starts_with('/') {
        full
    } else {
        format!("/{full}")
    }
}

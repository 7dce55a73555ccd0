//! The dispatch engine: route registration on the root group and per-request
//! chain assembly.

use std::sync::Arc;
use log::debug;

use crate::context::{Context, HandlerFunc};
use crate::engine::group::{RouterGroup, join_path};
use crate::http::{HttpRequest, HttpResponse, Method};
use crate::middleware::{logger, recovery};
use crate::router::{RouteError, Router};

/// Engine-wide settings fixed at construction.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    /// Trace route registration and per-request chain assembly at debug level.
    pub debug: bool,
}

/// Middleware registered on a non-root group, found again by prefix.
pub(crate) struct GroupEntry {
    pub(crate) prefix: String,
    pub(crate) middlewares: Vec<HandlerFunc>,
}

/// Owns the route table and all middleware, and turns requests into
/// responses.
///
/// Build the engine with `&mut` access during start-up, then share it
/// (typically behind an `Arc`) with the server. Registration cannot happen
/// once requests are being served, since serving only needs `&self`.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use microroute_rs::{Context, Engine, EngineConfig, HttpRequest, HttpVersion, Method, StatusCode};
///
/// let mut engine = Engine::new(EngineConfig::default());
/// engine.get("/user/:id", |c: &mut Context| {
///     let body = format!("user {}", c.param("id").unwrap_or_default());
///     c.string(StatusCode::Ok, body);
/// }).unwrap();
///
/// let request = HttpRequest::new(Method::GET, "/user/42", HttpVersion::Http11, HashMap::new());
/// let response = engine.handle(request);
/// assert_eq!(response.body_text(), "user 42");
/// ```
pub struct Engine {
    config: EngineConfig,
    router: Arc<Router>,
    global: Vec<HandlerFunc>,
    pub(crate) groups: Vec<GroupEntry>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Engine {
    /// An engine with no routes and no middleware.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            router: Arc::new(Router::new(config.debug)),
            config,
            global: Vec::new(),
            groups: Vec::new(),
        }
    }

    /// An engine with the request [`logger`] and panic [`recovery`]
    /// installed as global middleware.
    pub fn with_defaults(config: EngineConfig) -> Self {
        let mut engine = Self::new(config);
        engine.use_middleware(logger()).use_middleware(recovery());
        engine
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Add global middleware, run for every request before any group's.
    pub fn use_middleware<F>(&mut self, middleware: F) -> &mut Self
    where
        F: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.global.push(Arc::new(middleware));
        self
    }

    /// Add several already boxed global middleware, in order.
    pub fn use_all(&mut self, middlewares: impl IntoIterator<Item = HandlerFunc>) -> &mut Self {
        self.global.extend(middlewares);
        self
    }

    /// A group whose routes and middleware live under `prefix`.
    pub fn group(&mut self, prefix: &str) -> RouterGroup<'_> {
        RouterGroup::new(self, prefix.to_string())
    }

    /// Register `handler` for `method` requests matching `pattern`.
    pub fn add_route<F>(&mut self, method: Method, pattern: &str, handler: F) -> Result<(), RouteError>
    where
        F: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.register(method, join_path("", pattern), Arc::new(handler))
    }

    pub fn get<F>(&mut self, pattern: &str, handler: F) -> Result<(), RouteError>
    where
        F: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.add_route(Method::GET, pattern, handler)
    }

    pub fn post<F>(&mut self, pattern: &str, handler: F) -> Result<(), RouteError>
    where
        F: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.add_route(Method::POST, pattern, handler)
    }

    pub fn put<F>(&mut self, pattern: &str, handler: F) -> Result<(), RouteError>
    where
        F: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.add_route(Method::PUT, pattern, handler)
    }

    pub fn delete<F>(&mut self, pattern: &str, handler: F) -> Result<(), RouteError>
    where
        F: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.add_route(Method::DELETE, pattern, handler)
    }

    pub fn patch<F>(&mut self, pattern: &str, handler: F) -> Result<(), RouteError>
    where
        F: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.add_route(Method::PATCH, pattern, handler)
    }

    pub(crate) fn register(&mut self, method: Method, pattern: String, handler: HandlerFunc) -> Result<(), RouteError> {
        // Only shared while requests are in flight, so this never clones.
        Arc::make_mut(&mut self.router).add_route(method, &pattern, handler)
    }

    /// The chain for a request to `path`: global middleware, then the
    /// middleware of every group whose prefix starts `path` in registration
    /// order, then the route dispatch.
    pub fn handlers_for(&self, path: &str) -> Vec<HandlerFunc> {
        let mut handlers = self.global.clone();
        for group in self.groups.iter().filter(|group| path.starts_with(&group.prefix)) {
            handlers.extend(group.middlewares.iter().cloned());
        }

        let router = Arc::clone(&self.router);
        handlers.push(Arc::new(move |c: &mut Context| router.dispatch(c)));
        handlers
    }

    /// Run `request` through its chain and hand back the finished context.
    pub fn dispatch(&self, request: HttpRequest) -> Context {
        let handlers = self.handlers_for(&request.path);
        if self.config.debug {
            debug!("{} {} through {} handlers", request.method, request.path, handlers.len());
        }

        let mut c = Context::with_handlers(request, handlers);
        c.next();
        c
    }

    /// Run `request` through its chain and return the response it produced.
    pub fn handle(&self, request: HttpRequest) -> HttpResponse {
        self.dispatch(request).into_response()
    }
}

//! A small HTTP router with trie path matching and onion-style middleware.
//!
//! Routes are registered per method against patterns made of literal
//! segments, `:name` parameters and a trailing `*name` wildcard. Each request
//! runs through a chain of handlers: global middleware, the middleware of
//! every group whose prefix matches the path, and finally the route itself.
//! Handlers continue the chain explicitly with [`Context::next`] and can stop
//! it with [`Context::abort`].
//!
//! # Features
//!
//! - Per-method path trees with first-match, insertion-order resolution
//! - Registration-time detection of duplicate and malformed routes
//! - Route groups that scope middleware by path prefix
//! - Logger and panic-recovery middleware
//! - A tokio TCP server speaking HTTP/1.x
//!
//! # Examples
//!
//! ## Routing and middleware
//!
//! ```
//! use std::collections::HashMap;
//! use microroute_rs::{Context, Engine, HttpRequest, HttpVersion, Method, StatusCode};
//!
//! let mut engine = Engine::default();
//! engine.use_middleware(|c: &mut Context| {
//!     c.set_header("X-Powered-By", "microroute-rs");
//!     c.next();
//! });
//!
//! let mut assets = engine.group("/static");
//! assets.get("/*filepath", |c: &mut Context| {
//!     let file = c.param("filepath").unwrap_or_default().to_string();
//!     c.string(StatusCode::Ok, file);
//! })?;
//!
//! let request = HttpRequest::new(Method::GET, "/static/css/a/b.css", HttpVersion::Http11, HashMap::new());
//! let response = engine.handle(request);
//! assert_eq!(response.body_text(), "css/a/b.css");
//! assert_eq!(response.header("X-Powered-By").unwrap(), "microroute-rs");
//!
//! let request = HttpRequest::new(Method::GET, "/nope", HttpVersion::Http11, HashMap::new());
//! let response = engine.handle(request);
//! assert_eq!(response.status, StatusCode::NotFound);
//! assert_eq!(response.body_text(), "404 NOT FOUND: /nope\n");
//! # Ok::<(), microroute_rs::RouteError>(())
//! ```
//!
//! ## Registration errors
//!
//! ```
//! use microroute_rs::{Context, Engine, RouteError};
//!
//! let mut engine = Engine::default();
//! engine.get("/user/name", |_: &mut Context| {}).unwrap();
//! engine.get("/user/:id", |_: &mut Context| {}).unwrap();
//!
//! let err = engine.get("/user/name", |_: &mut Context| {}).unwrap_err();
//! assert!(matches!(err, RouteError::Duplicate { .. }));
//!
//! let err = engine.get("/files/*path/raw", |_: &mut Context| {}).unwrap_err();
//! assert!(matches!(err, RouteError::WildcardNotLast { .. }));
//! ```
//!
//! ## Serving
//!
//! ```no_run
//! use microroute_rs::{Context, Engine, EngineConfig, ServerConfig, StatusCode};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut engine = Engine::with_defaults(EngineConfig::default());
//!     engine.get("/", |c: &mut Context| c.string(StatusCode::Ok, "hello"))?;
//!
//!     engine.run(ServerConfig::from_env(None)?).await?;
//!     Ok(())
//! }
//! ```

pub mod context;
pub mod engine;
pub mod http;
pub mod middleware;
pub mod router;
pub mod server;

// Re-export commonly used items for convenience
pub use context::{Context, HandlerFunc, handler};
pub use engine::{Engine, EngineConfig, RouterGroup};
pub use http::{Error as ParserError, HttpRequest, HttpResponse, HttpVersion, Method, StatusCode, parse_request};
pub use router::{RouteError, Router};
pub use server::{Error as ServerError, HttpServer, ServerConfig};

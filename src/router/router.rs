//! The route table: one path tree per method plus the handlers bound to
//! each registered pattern.

use std::collections::HashMap;
use log::debug;

use crate::context::{Context, HandlerFunc};
use crate::http::{Method, StatusCode};
use crate::router::error::RouteError;
use crate::router::node::Node;
use crate::router::pattern::{bind_params, parse_pattern};

/// The outcome of a successful [`Router::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved<'a> {
    /// The registered pattern the path matched.
    pub pattern: &'a str,
    /// Values captured by `:name` and `*name` segments.
    pub params: HashMap<String, String>,
}

/// Maps `(method, pattern)` to handlers and resolves request paths.
///
/// The table is filled during start-up and only read afterwards; lookups
/// take `&self` and may run from any number of requests at once.
#[derive(Clone, Default)]
pub struct Router {
    roots: HashMap<Method, Node>,
    handlers: HashMap<Method, HashMap<String, HandlerFunc>>,
    registered: Vec<(Method, String)>,
    debug: bool,
}

impl Router {
    /// Create an empty router. With `debug` set, registrations and
    /// resolutions are traced at debug level.
    pub fn new(debug: bool) -> Self {
        Self {
            debug,
            ..Self::default()
        }
    }

    /// Register `handler` for `method` requests matching `pattern`.
    ///
    /// Fails without touching the table when the pattern misplaces a
    /// wildcard or when a path spelled like `pattern` already resolves to a
    /// registered route. The latter catches routes that would sit below a
    /// wildcard or parameter and could never be reached.
    pub fn add_route(&mut self, method: Method, pattern: &str, handler: HandlerFunc) -> Result<(), RouteError> {
        let parts = parse_pattern(pattern);
        let shadowing = self
            .roots
            .get(&method)
            .and_then(|root| root.search(&parts))
            .and_then(Node::pattern);
        if let Some(existing) = shadowing {
            let existing = existing.to_string();
            return Err(if existing == pattern {
                RouteError::Duplicate {
                    method,
                    pattern: pattern.to_string(),
                    existing,
                }
            } else {
                RouteError::Conflict {
                    method,
                    pattern: pattern.to_string(),
                    existing,
                }
            });
        }

        self.roots
            .entry(method)
            .or_default()
            .insert(method, pattern, &parts)?;

        self.handlers
            .entry(method)
            .or_default()
            .insert(pattern.to_string(), handler);
        self.registered.push((method, pattern.to_string()));

        if self.debug {
            debug!("route registered: {method} {pattern}");
        }
        Ok(())
    }

    /// Resolve `path` against the routes registered for `method`.
    ///
    /// Returns `None` when the method has no routes or no node matches.
    pub fn resolve(&self, method: Method, path: &str) -> Option<Resolved<'_>> {
        let root = self.roots.get(&method)?;
        let parts = parse_pattern(path);
        let pattern = root.search(&parts)?.pattern()?;

        Some(Resolved {
            pattern,
            params: bind_params(pattern, &parts),
        })
    }

    /// Run the handler for the context's method and path.
    ///
    /// On a match the captured parameters are bound into the context first.
    /// On a miss a plaintext 404 naming the path is written instead. This is
    /// the last link of every chain and never calls [`Context::next`].
    pub fn dispatch(&self, c: &mut Context) {
        let method = c.method();
        let found = self.resolve(method, c.path()).and_then(|resolved| {
            self.handlers
                .get(&method)
                .and_then(|by_pattern| by_pattern.get(resolved.pattern))
                .map(|handler| (resolved, handler))
        });

        match found {
            Some((resolved, handler)) => {
                if self.debug {
                    debug!("{method} {} matched {}", c.path(), resolved.pattern);
                }
                c.set_params(resolved.params);
                handler(c);
            }
            None => {
                if self.debug {
                    debug!("{method} {} matched no route", c.path());
                }
                let body = format!("404 NOT FOUND: {}\n", c.path());
                c.string(StatusCode::NotFound, body);
            }
        }
    }

    /// Registered routes in registration order.
    pub fn routes(&self) -> impl Iterator<Item = (Method, &str)> {
        self.registered
            .iter()
            .map(|(method, pattern)| (*method, pattern.as_str()))
    }

    /// The path tree for `method`, if any route was registered for it.
    pub fn root(&self, method: Method) -> Option<&Node> {
        self.roots.get(&method)
    }
}

//! Path matching and the route table.
//!
//! Patterns are made of literal segments, `:name` parameters matching one
//! segment, and a trailing `*name` wildcard matching the rest of the path:
//!
//! ```
//! use microroute_rs::router::{Router, parse_pattern};
//! use microroute_rs::{handler, Method};
//!
//! assert_eq!(parse_pattern("/static/*filepath/ignored"), vec!["static", "*filepath"]);
//!
//! let mut router = Router::new(false);
//! router.add_route(Method::GET, "/static/*filepath", handler(|_| {})).unwrap();
//!
//! let resolved = router.resolve(Method::GET, "/static/css/a/b.css").unwrap();
//! assert_eq!(resolved.pattern, "/static/*filepath");
//! assert_eq!(resolved.params["filepath"], "css/a/b.css");
//! ```

mod error;
mod node;
mod pattern;
mod router;

pub use error::RouteError;
pub use node::Node;
pub use pattern::{bind_params, parse_pattern};
pub use router::{Resolved, Router};

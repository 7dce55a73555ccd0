//! The per-method path tree.
//!
//! Each node holds one segment token and an ordered list of children.
//! Children are scanned in insertion order and the first acceptable one
//! wins; there is no longest-prefix or priority ranking.

use crate::http::Method;
use crate::router::error::RouteError;
use crate::router::pattern::{is_wild, segments};

/// One segment of the tree.
#[derive(Debug, Clone, Default)]
pub struct Node {
    part: String,
    pattern: Option<String>,
    is_wild: bool,
    children: Vec<Node>,
}

impl Node {
    fn new(part: &str) -> Self {
        Self {
            part: part.to_string(),
            pattern: None,
            is_wild: is_wild(part),
            children: Vec::new(),
        }
    }

    /// The segment token this node was created for.
    pub fn part(&self) -> &str {
        &self.part
    }

    /// The full pattern of the route terminating here, if any.
    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref()
    }

    /// Whether this node stands for a `:param` or `*wildcard` segment.
    pub fn is_wild(&self) -> bool {
        self.is_wild
    }

    /// Child nodes in insertion order.
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Record `pattern` at the end of the path described by `parts`.
    ///
    /// While walking down, a child is reused when its token equals the
    /// segment or when it is wild; a wild child therefore absorbs any
    /// literal registered after it at the same depth.
    pub fn insert(&mut self, method: Method, pattern: &str, parts: &[&str]) -> Result<(), RouteError> {
        // parse_pattern truncates after the wildcard, so compare with the raw text.
        let total = segments(pattern).count();
        if parts.last().is_some_and(|last| last.starts_with('*')) && total > parts.len() {
            return Err(RouteError::WildcardNotLast {
                method,
                pattern: pattern.to_string(),
            });
        }

        let mut node = self;
        for (i, part) in parts.iter().enumerate() {
            let found = node
                .children
                .iter()
                .position(|child| child.part == *part || child.is_wild);

            let index = match found {
                Some(index) => {
                    let child = &node.children[index];
                    if child.part != *part && !child.is_wild && !is_wild(part) {
                        return Err(RouteError::Conflict {
                            method,
                            pattern: pattern.to_string(),
                            existing: child.pattern.clone().unwrap_or_else(|| child.part.clone()),
                        });
                    }
                    index
                }
                None => {
                    if part.starts_with('*') && i != parts.len() - 1 {
                        return Err(RouteError::WildcardNotLast {
                            method,
                            pattern: pattern.to_string(),
                        });
                    }
                    node.children.push(Node::new(part));
                    node.children.len() - 1
                }
            };
            node = &mut node.children[index];
        }

        if let Some(existing) = &node.pattern {
            return Err(RouteError::Duplicate {
                method,
                pattern: pattern.to_string(),
                existing: existing.clone(),
            });
        }
        node.pattern = Some(pattern.to_string());
        Ok(())
    }

    /// Find the node a path resolves to.
    ///
    /// At each depth a child with an equal token is preferred, otherwise the
    /// first wild child is taken. Reaching a `*` node ends the walk at once.
    /// Otherwise the final node must terminate a route.
    pub fn search(&self, parts: &[&str]) -> Option<&Node> {
        let mut node = self;
        for part in parts {
            let child = node
                .children
                .iter()
                .find(|child| child.part == *part)
                .or_else(|| node.children.iter().find(|child| child.is_wild))?;

            if child.part.starts_with('*') {
                return Some(child);
            }
            node = child;
        }

        node.pattern.as_ref().map(|_| node)
    }
}

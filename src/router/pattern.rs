//! Route pattern segmentation.
//!
//! Registration and lookup share [`parse_pattern`], so a pattern and the
//! paths it should match are always cut along the same boundaries.

use std::collections::HashMap;

/// Split `pattern` into its non-empty `/`-separated segments.
///
/// Collection stops at the first segment starting with `*`; that segment is
/// kept and everything after it is ignored. Repeated and trailing slashes
/// produce no segments, so `/a//b/` and `/a/b` are the same route.
pub fn parse_pattern(pattern: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    for segment in segments(pattern) {
        parts.push(segment);
        if segment.starts_with('*') {
            break;
        }
    }
    parts
}

/// Every non-empty segment of `pattern`, wildcard or not.
pub(crate) fn segments(pattern: &str) -> impl Iterator<Item = &str> {
    pattern.split('/').filter(|segment| !segment.is_empty())
}

/// True for `:name` and `*name` tokens.
pub(crate) fn is_wild(segment: &str) -> bool {
    segment.starts_with(':') || segment.starts_with('*')
}

/// Pair the segments of a registered `pattern` with the segments of the
/// incoming `path`.
///
/// `:name` binds the single path segment at the same position; `*name`
/// binds the `/`-joined remainder of the path and ends the walk. A bare `*`
/// captures nothing.
pub fn bind_params(pattern: &str, path_parts: &[&str]) -> HashMap<String, String> {
    let mut params = HashMap::new();
    for (i, segment) in parse_pattern(pattern).into_iter().enumerate() {
        if let Some(name) = segment.strip_prefix(':') {
            if let Some(value) = path_parts.get(i) {
                params.insert(name.to_string(), (*value).to_string());
            }
        } else if let Some(name) = segment.strip_prefix('*') {
            if !name.is_empty() {
                let rest = path_parts.get(i..).unwrap_or_default();
                params.insert(name.to_string(), rest.join("/"));
            }
            break;
        }
    }
    params
}

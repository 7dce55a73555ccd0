//! HTTP request parsing and representation.

use std::collections::HashMap;
use std::str::FromStr;
use percent_encoding::percent_decode_str;
use serde::de::DeserializeOwned;

use crate::http::error::Error;
use crate::http::method::Method;
use crate::http::version::HttpVersion;

/// An HTTP request as handed to the dispatch engine.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// The HTTP method (GET, POST, etc.)
    pub method: Method,
    /// The request target exactly as received, query string included
    pub target: String,
    /// The routed path: the target with any query string removed, percent-decoded
    pub path: String,
    /// The HTTP version
    pub version: HttpVersion,
    /// The HTTP headers, keyed as received
    pub headers: HashMap<String, String>,
    /// The request body
    pub body: Vec<u8>,
    /// Query parameters decoded from the target
    pub query_params: HashMap<String, String>,
}

impl HttpRequest {
    /// Create a new HTTP request with an empty body.
    ///
    /// The routed `path` and the `query_params` are derived from `target`.
    /// Escapes in the path are decoded before routing, so `/user/John%20Doe`
    /// routes as `/user/John Doe`.
    pub fn new(method: Method, target: impl Into<String>, version: HttpVersion, headers: HashMap<String, String>) -> Self {
        let target = target.into();
        let (path, query_params) = match target.split_once('?') {
            Some((path, query)) => (decode_path(path), decode_pairs(query.as_bytes())),
            None => (decode_path(&target), HashMap::new()),
        };

        Self {
            method,
            target,
            path,
            version,
            headers,
            body: Vec::new(),
            query_params,
        }
    }

    /// Create a new HTTP request carrying `body`.
    pub fn with_body(method: Method, target: impl Into<String>, version: HttpVersion, headers: HashMap<String, String>, body: Vec<u8>) -> Self {
        let mut request = Self::new(method, target, version, headers);
        request.body = body;
        request
    }

    /// Get a header value by name, ignoring ASCII case.
    pub fn get_header(&self, name: &str) -> Option<&String> {
        self.headers.iter().find_map(|(k, v)| {
            if k.eq_ignore_ascii_case(name) {
                Some(v)
            } else {
                None
            }
        })
    }

    /// Check if a header exists.
    pub fn has_header(&self, name: &str) -> bool {
        self.get_header(name).is_some()
    }

    /// Parse the request body as JSON.
    ///
    /// Fails with [`Error::MissingHeader`] unless the request declares an
    /// `application/json` content type.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, Error> {
        if !self.is_json() {
            return Err(Error::MissingHeader("Content-Type: application/json".to_string()));
        }

        let json = serde_json::from_slice(&self.body)?;
        Ok(json)
    }

    /// Check if the request has a JSON body.
    pub fn is_json(&self) -> bool {
        self.get_header("Content-Type")
            .is_some_and(|content_type| content_type.starts_with("application/json"))
    }

    /// Check if the request has an urlencoded form body.
    pub fn is_form(&self) -> bool {
        self.get_header("Content-Type")
            .is_some_and(|content_type| content_type.starts_with("application/x-www-form-urlencoded"))
    }

    /// Get a query parameter value.
    pub fn get_query_param(&self, name: &str) -> Option<&String> {
        self.query_params.get(name)
    }

    /// Check if a query parameter exists.
    pub fn has_query_param(&self, name: &str) -> bool {
        self.query_params.contains_key(name)
    }

    /// Decode the body as `application/x-www-form-urlencoded` pairs.
    ///
    /// Returns an empty map when the request is not a form submission.
    pub fn form_params(&self) -> HashMap<String, String> {
        if !self.is_form() {
            return HashMap::new();
        }
        decode_pairs(&self.body)
    }
}

// Invalid UTF-8 after decoding is replaced rather than rejected.
fn decode_path(path: &str) -> String {
    percent_decode_str(path).decode_utf8_lossy().into_owned()
}

// Later duplicates overwrite earlier ones.
fn decode_pairs(input: &[u8]) -> HashMap<String, String> {
    url::form_urlencoded::parse(input)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

/// Parse an HTTP request from a byte slice.
///
/// The head is decoded as UTF-8; everything after the blank line is taken
/// as the body, bounded by `Content-Length` when one is declared.
pub fn parse_request(input: &[u8]) -> Result<HttpRequest, Error> {
    if input.is_empty() {
        return Err(Error::EmptyRequest);
    }

    let (head, body) = split_head(input);
    let head = std::str::from_utf8(head)
        .map_err(|_| Error::MalformedRequestLine("Invalid UTF-8".to_string()))?;

    let mut lines = head.lines();
    let request_line = match lines.next() {
        Some(line) if !line.trim().is_empty() => line,
        _ => return Err(Error::EmptyRequest),
    };

    let parts: Vec<&str> = request_line.split_whitespace().collect();
    if parts.len() != 3 {
        return Err(Error::MalformedRequestLine(request_line.to_string()));
    }

    let method = Method::from_str(parts[0])?;

    let target = parts[1];
    if !target.starts_with('/') {
        return Err(Error::InvalidPath(target.to_string()));
    }

    let version = HttpVersion::from_str(parts[2])?;

    let mut headers = HashMap::new();
    for line in lines {
        if line.is_empty() {
            break;
        }

        let (name, value) = line
            .split_once(':')
            .ok_or_else(|| Error::InvalidHeaderFormat(line.to_string()))?;
        headers.insert(name.trim().to_string(), value.trim().to_string());
    }

    let mut request = HttpRequest::new(method, target, version, headers);
    if version.requires_host() && !request.has_header("Host") {
        return Err(Error::MissingHeader("Host".to_string()));
    }

    let declared = request
        .get_header("Content-Length")
        .and_then(|len| len.parse::<usize>().ok());
    let body_len = declared.map_or(body.len(), |len| len.min(body.len()));
    request.body = body[..body_len].to_vec();

    Ok(request)
}

fn split_head(input: &[u8]) -> (&[u8], &[u8]) {
    for (separator, skip) in [(&b"\r\n\r\n"[..], 4), (&b"\n\n"[..], 2)] {
        if let Some(pos) = input.windows(separator.len()).position(|w| w == separator) {
            return (&input[..pos], &input[pos + skip..]);
        }
    }
    (input, &[])
}

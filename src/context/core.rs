//! Per-request execution context and the chain-advance protocol.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use log::error;
use serde::Serialize;

use crate::context::handler::HandlerFunc;
use crate::http::{HttpRequest, HttpResponse, Method, StatusCode};

/// Everything one request carries through its handler chain.
///
/// A context is created for a single request and owned by the task serving
/// it. The handler chain is fixed at construction; [`next`](Context::next)
/// walks it and [`abort`](Context::abort) stops it. Route parameters, a
/// typed key/value store shared by the chain and the response under
/// construction all live here too.
pub struct Context {
    request: HttpRequest,
    response: HttpResponse,
    params: HashMap<String, String>,
    keys: HashMap<String, Box<dyn Any + Send + Sync>>,
    handlers: Vec<HandlerFunc>,
    // Position of the handler started last; None before the first one.
    index: Option<usize>,
    aborted: bool,
}

impl Context {
    /// A context with an empty handler chain.
    pub fn new(request: HttpRequest) -> Self {
        Self::with_handlers(request, Vec::new())
    }

    /// A context that will run `handlers` in order once [`next`](Self::next)
    /// is called.
    pub fn with_handlers(request: HttpRequest, handlers: Vec<HandlerFunc>) -> Self {
        Self {
            request,
            response: HttpResponse::default(),
            params: HashMap::new(),
            keys: HashMap::new(),
            handlers,
            index: None,
            aborted: false,
        }
    }

    /// Start the next handler in the chain.
    ///
    /// Continuation is explicit: a handler runs the rest of the chain by
    /// calling `next` and resumes its own code once that returns. A handler
    /// that returns without calling it ends the chain there, route handler
    /// included. After [`abort`](Self::abort) no further handler starts;
    /// those already on the stack still run to completion.
    pub fn next(&mut self) {
        if self.aborted {
            return;
        }
        let upcoming = self.index.map_or(0, |i| i + 1);
        let Some(handler) = self.handlers.get(upcoming).cloned() else {
            return;
        };
        self.index = Some(upcoming);
        handler(self);
    }

    /// Stop the chain: no handler after the current one will start.
    pub fn abort(&mut self) {
        self.aborted = true;
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted
    }

    /// Position of the handler started last, `None` before the chain starts.
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Whether no further handler can run.
    pub fn is_complete(&self) -> bool {
        self.aborted || self.index.map_or(self.handlers.is_empty(), |i| i + 1 >= self.handlers.len())
    }

    /// Write `{"message": message}` with `status` and abort the chain.
    pub fn fail(&mut self, status: StatusCode, message: impl Into<String>) {
        let message: String = message.into();
        self.abort();
        self.json(status, &serde_json::json!({ "message": message }));
    }

    pub fn request(&self) -> &HttpRequest {
        &self.request
    }

    pub fn method(&self) -> Method {
        self.request.method
    }

    /// The routed path, without the query string.
    pub fn path(&self) -> &str {
        &self.request.path
    }

    /// A request header, looked up without regard to case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.request.get_header(name).map(String::as_str)
    }

    /// A value captured by the matched route's `:name` or `*name` segment.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    pub fn params(&self) -> &HashMap<String, String> {
        &self.params
    }

    pub(crate) fn set_params(&mut self, params: HashMap<String, String>) {
        self.params = params;
    }

    pub fn query(&self, name: &str) -> Option<&str> {
        self.request.get_query_param(name).map(String::as_str)
    }

    /// A field of an urlencoded form body.
    pub fn post_form(&self, name: &str) -> Option<String> {
        self.request.form_params().remove(name)
    }

    /// The query parameter for `GET`, the form field for `POST`, `PUT` and
    /// `PATCH`, nothing for other methods.
    pub fn get_param(&self, name: &str) -> Option<String> {
        match self.method() {
            Method::GET => self.query(name).map(str::to_string),
            method if method.accepts_form() => self.post_form(name),
            _ => None,
        }
    }

    pub fn get_param_with_default(&self, name: &str, default: &str) -> String {
        self.get_param(name).unwrap_or_else(|| default.to_string())
    }

    /// Store a value for later handlers in the chain.
    pub fn set<T: Any + Send + Sync>(&mut self, key: impl Into<String>, value: T) {
        self.keys.insert(key.into(), Box::new(value));
    }

    /// A stored value, if present under `key` with type `T`.
    pub fn get<T: Any>(&self, key: &str) -> Option<&T> {
        self.keys.get(key).and_then(|value| value.downcast_ref::<T>())
    }

    /// A stored value that an earlier handler is known to have set.
    ///
    /// # Panics
    ///
    /// Panics if `key` is absent or holds a value of another type.
    #[track_caller]
    pub fn must_get<T: Any>(&self, key: &str) -> &T {
        match self.get(key) {
            Some(value) => value,
            None => panic!("Key \"{key}\" does not exist"),
        }
    }

    pub fn status(&mut self, status: StatusCode) {
        self.response.status = status;
    }

    pub fn status_code(&self) -> StatusCode {
        self.response.status
    }

    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.response.set_header(name, value);
    }

    pub fn set_content_type(&mut self, content_type: impl Into<String>) {
        self.set_header("Content-Type", content_type);
    }

    /// Respond with a `text/plain` body.
    pub fn string(&mut self, status: StatusCode, body: impl Into<String>) {
        self.set_content_type("text/plain");
        self.status(status);
        self.response.set_body(body.into().into_bytes());
    }

    /// Respond with `value` serialized as JSON.
    ///
    /// A value that fails to serialize turns into a plaintext 500.
    pub fn json<T: Serialize>(&mut self, status: StatusCode, value: &T) {
        match self.response.set_json(value) {
            Ok(()) => self.status(status),
            Err(e) => {
                error!("failed to encode JSON response for {}: {e}", self.request.path);
                self.string(StatusCode::InternalServerError, e.to_string());
            }
        }
    }

    /// Respond with a `text/html` body.
    pub fn html(&mut self, status: StatusCode, html: impl Into<String>) {
        self.set_content_type("text/html");
        self.status(status);
        self.response.set_body(html.into().into_bytes());
    }

    /// Respond with raw bytes; the content type is left as is.
    pub fn data(&mut self, status: StatusCode, data: impl Into<Vec<u8>>) {
        self.status(status);
        self.response.set_body(data);
    }

    pub fn redirect(&mut self, status: StatusCode, location: impl Into<String>) {
        self.set_header("Location", location);
        self.status(status);
    }

    pub fn response(&self) -> &HttpResponse {
        &self.response
    }

    pub fn response_mut(&mut self) -> &mut HttpResponse {
        &mut self.response
    }

    pub fn into_response(self) -> HttpResponse {
        self.response
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("method", &self.request.method)
            .field("path", &self.request.path)
            .field("params", &self.params)
            .field("handlers", &self.handlers.len())
            .field("index", &self.index)
            .field("aborted", &self.aborted)
            .finish()
    }
}

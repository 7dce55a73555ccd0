//! Tests for the execution context.

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use crate::context::{Context, HandlerFunc, handler};
    use crate::http::{HttpRequest, HttpVersion, Method, StatusCode};

    type Log = Arc<Mutex<Vec<String>>>;

    fn request(method: Method, target: &str) -> HttpRequest {
        HttpRequest::new(method, target, HttpVersion::Http11, HashMap::new())
    }

    fn step(log: &Log, name: &'static str, advance: bool) -> HandlerFunc {
        let log = Arc::clone(log);
        handler(move |c: &mut Context| {
            log.lock().unwrap().push(format!("{name}-start"));
            if advance {
                c.next();
            }
            log.lock().unwrap().push(format!("{name}-end"));
        })
    }

    fn entries(log: &Log) -> Vec<String> {
        log.lock().unwrap().clone()
    }

    #[test]
    fn test_chain_runs_in_order_and_unwinds() {
        let log = Log::default();
        let chain = vec![step(&log, "a", true), step(&log, "b", true), step(&log, "h", false)];

        let mut c = Context::with_handlers(request(Method::GET, "/"), chain);
        assert_eq!(c.index(), None);
        c.next();

        assert_eq!(entries(&log), vec!["a-start", "b-start", "h-start", "h-end", "b-end", "a-end"]);
        assert_eq!(c.index(), Some(2));
        assert!(c.is_complete());
    }

    #[test]
    fn test_handler_without_next_ends_the_chain() {
        let log = Log::default();
        let chain = vec![step(&log, "a", false), step(&log, "b", true)];

        let mut c = Context::with_handlers(request(Method::GET, "/"), chain);
        c.next();

        assert_eq!(entries(&log), vec!["a-start", "a-end"]);
        assert!(!c.is_complete());
    }

    #[test]
    fn test_abort_stops_later_handlers_but_finishes_earlier_frames() {
        let log = Log::default();
        let aborter = {
            let log = Arc::clone(&log);
            handler(move |c: &mut Context| {
                log.lock().unwrap().push("guard".to_string());
                c.abort();
                c.next();
            })
        };
        let chain = vec![step(&log, "outer", true), aborter, step(&log, "h", true)];

        let mut c = Context::with_handlers(request(Method::GET, "/"), chain);
        c.next();

        assert_eq!(entries(&log), vec!["outer-start", "guard", "outer-end"]);
        assert!(c.is_aborted());
        assert!(c.is_complete());

        // No way to resume once aborted.
        c.next();
        assert_eq!(entries(&log).len(), 3);
    }

    #[test]
    fn test_next_on_empty_chain() {
        let mut c = Context::new(request(Method::GET, "/"));
        c.next();
        assert_eq!(c.index(), None);
        assert!(c.is_complete());
    }

    #[test]
    fn test_fail_aborts_with_json_message() {
        let reached = Arc::new(Mutex::new(false));
        let reached_in_handler = Arc::clone(&reached);
        let chain = vec![
            handler(|c: &mut Context| {
                c.fail(StatusCode::Unauthorized, "token required");
                c.next();
            }),
            handler(move |_: &mut Context| *reached_in_handler.lock().unwrap() = true),
        ];

        let mut c = Context::with_handlers(request(Method::GET, "/admin"), chain);
        c.next();

        assert!(!*reached.lock().unwrap());
        assert_eq!(c.status_code(), StatusCode::Unauthorized);
        let body: serde_json::Value = serde_json::from_slice(&c.response().body).unwrap();
        assert_eq!(body["message"], "token required");
    }

    #[test]
    fn test_keys_are_shared_along_the_chain() {
        let chain = vec![
            handler(|c: &mut Context| {
                c.set("user", "alice".to_string());
                c.set("attempts", 3u32);
                c.next();
            }),
            handler(|c: &mut Context| {
                let greeting = format!("hello {}", c.must_get::<String>("user"));
                c.string(StatusCode::Ok, greeting);
            }),
        ];

        let mut c = Context::with_handlers(request(Method::GET, "/"), chain);
        c.next();

        assert_eq!(c.response().body_text(), "hello alice");
        assert_eq!(c.get::<u32>("attempts"), Some(&3));
        assert_eq!(c.get::<String>("attempts"), None);
        assert_eq!(c.get::<u32>("missing"), None);
    }

    #[test]
    #[should_panic(expected = "Key \"missing\" does not exist")]
    fn test_must_get_panics_on_missing_key() {
        let c = Context::new(request(Method::GET, "/"));
        c.must_get::<String>("missing");
    }

    #[test]
    fn test_query_and_params() {
        let mut c = Context::new(request(Method::GET, "/search?name=test&id=123"));
        c.set_params(HashMap::from([("id".to_string(), "7".to_string())]));

        assert_eq!(c.path(), "/search");
        assert_eq!(c.query("name"), Some("test"));
        assert_eq!(c.param("id"), Some("7"));
        assert_eq!(c.param("name"), None);
        assert_eq!(c.get_param("id"), Some("123".to_string()));
        assert_eq!(c.get_param_with_default("missing", "default"), "default");
    }

    #[test]
    fn test_post_form_and_get_param() {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/x-www-form-urlencoded".to_string());
        let req = HttpRequest::with_body(
            Method::POST,
            "/login?username=ignored",
            HttpVersion::Http11,
            headers,
            b"username=admin&password=secret".to_vec(),
        );
        let c = Context::new(req);

        assert_eq!(c.post_form("username"), Some("admin".to_string()));
        assert_eq!(c.get_param("username"), Some("admin".to_string()));
        assert_eq!(c.get_param("missing"), None);

        let c = Context::new(request(Method::DELETE, "/item?id=1"));
        assert_eq!(c.get_param("id"), None);
    }

    #[test]
    fn test_response_helpers_last_write_wins() {
        let mut c = Context::new(request(Method::GET, "/"));

        c.string(StatusCode::Ok, "Hello World");
        assert_eq!(c.response().body_text(), "Hello World");
        assert_eq!(c.response().header("Content-Type").unwrap(), "text/plain");

        c.html(StatusCode::Created, "<h1>hi</h1>");
        assert_eq!(c.status_code(), StatusCode::Created);
        assert_eq!(c.response().header("Content-Type").unwrap(), "text/html");

        c.json(StatusCode::Ok, &HashMap::from([("key", "value")]));
        let body: HashMap<String, String> = serde_json::from_slice(&c.response().body).unwrap();
        assert_eq!(body["key"], "value");
        assert_eq!(c.response().header("Content-Type").unwrap(), "application/json");

        c.data(StatusCode::Accepted, vec![1u8, 2, 3]);
        assert_eq!(c.response().body, vec![1, 2, 3]);
        assert_eq!(c.response().header("Content-Length").unwrap(), "3");

        c.set_header("content-type", "application/octet-stream");
        assert_eq!(c.response().header("Content-Type").unwrap(), "application/octet-stream");
        assert_eq!(c.response().headers.len(), 3);

        c.redirect(StatusCode::Found, "/login");
        let response = c.into_response();
        assert_eq!(response.status, StatusCode::Found);
        assert_eq!(response.header("Location").unwrap(), "/login");
    }

    #[test]
    fn test_status_defaults_to_ok() {
        let mut c = Context::new(request(Method::GET, "/"));
        assert_eq!(c.status_code(), StatusCode::Ok);
        c.status(StatusCode::NotFound);
        assert_eq!(c.status_code(), StatusCode::NotFound);
    }
}

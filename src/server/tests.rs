//! Tests for the HTTP server implementation.

#[cfg(test)]
mod server_tests {
    use std::io::{self, Cursor};
    use std::pin::Pin;
    use std::sync::Arc;
    use std::task::{Context as TaskContext, Poll};
    use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, ReadBuf};
    use tokio::net::{TcpListener, TcpStream};

    use crate::context::Context;
    use crate::engine::Engine;
    use crate::http::StatusCode;
    use crate::router::RouteError;
    use crate::server::config::resolve_with;
    use crate::server::{Error, HttpServer, ServerConfig};

    // Mock TcpStream for testing
    struct MockTcpStream {
        read_data: Cursor<Vec<u8>>,
        write_data: Vec<u8>,
    }

    impl MockTcpStream {
        fn new(read_data: Vec<u8>) -> Self {
            Self {
                read_data: Cursor::new(read_data),
                write_data: Vec::new(),
            }
        }

        fn written(&self) -> String {
            String::from_utf8_lossy(&self.write_data).into_owned()
        }
    }

    impl AsyncRead for MockTcpStream {
        fn poll_read(
            self: Pin<&mut Self>,
            _cx: &mut TaskContext<'_>,
            buf: &mut ReadBuf<'_>,
        ) -> Poll<io::Result<()>> {
            let this = self.get_mut();
            let n = std::io::Read::read(&mut this.read_data, buf.initialize_unfilled())?;
            buf.advance(n);
            Poll::Ready(Ok(()))
        }
    }

    impl AsyncWrite for MockTcpStream {
        fn poll_write(
            self: Pin<&mut Self>,
            _cx: &mut TaskContext<'_>,
            buf: &[u8],
        ) -> Poll<io::Result<usize>> {
            let this = self.get_mut();
            this.write_data.extend_from_slice(buf);
            Poll::Ready(Ok(buf.len()))
        }

        fn poll_flush(self: Pin<&mut Self>, _cx: &mut TaskContext<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }

        fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut TaskContext<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }
    }

    fn user_engine() -> Arc<Engine> {
        let mut engine = Engine::default();
        engine
            .get("/user/:id", |c: &mut Context| {
                let body = format!("user {}", c.param("id").unwrap_or_default());
                c.string(StatusCode::Ok, body);
            })
            .unwrap();
        engine
            .post("/user", |c: &mut Context| {
                let name = c.post_form("name").unwrap_or_default();
                c.string(StatusCode::Created, format!("created {name}"));
            })
            .unwrap();
        Arc::new(engine)
    }

    async fn roundtrip(raw: &[u8]) -> (Result<(), Error>, String) {
        let mut stream = MockTcpStream::new(raw.to_vec());
        let result = HttpServer::handle_connection(&mut stream, user_engine(), 1024).await;
        (result, stream.written())
    }

    #[tokio::test]
    async fn test_server_creation() {
        let config = ServerConfig {
            addr: "127.0.0.1:8080".parse().unwrap(),
            max_connections: 100,
            read_buffer_size: 4096,
        };

        let server = HttpServer::new(config.clone(), Engine::default());
        assert_eq!(server.config.addr, config.addr);
        assert_eq!(server.config.max_connections, 100);
        assert_eq!(server.config.read_buffer_size, 4096);
        assert_eq!(server.engine.router().routes().count(), 0);
    }

    #[tokio::test]
    async fn test_handle_connection_with_param_route() {
        let (result, response) = roundtrip(b"GET /user/42 HTTP/1.1\r\nHost: localhost\r\n\r\n").await;

        assert!(result.is_ok());
        assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(response.contains("Content-Type: text/plain\r\n"));
        assert!(response.ends_with("\r\n\r\nuser 42"));
    }

    #[tokio::test]
    async fn test_handle_connection_with_form_post() {
        let (result, response) = roundtrip(
            b"POST /user HTTP/1.1\r\n\
              Host: localhost\r\n\
              Content-Type: application/x-www-form-urlencoded\r\n\
              Content-Length: 9\r\n\
              \r\n\
              name=anna",
        )
        .await;

        assert!(result.is_ok());
        assert!(response.starts_with("HTTP/1.1 201 Created\r\n"));
        assert!(response.ends_with("created anna"));
    }

    #[tokio::test]
    async fn test_handle_connection_with_not_found() {
        let (result, response) = roundtrip(b"GET /nope HTTP/1.1\r\nHost: localhost\r\n\r\n").await;

        // A miss is an ordinary response, not an error.
        assert!(result.is_ok());
        assert!(response.starts_with("HTTP/1.1 404 Not Found\r\n"));
        assert!(response.ends_with("\r\n\r\n404 NOT FOUND: /nope\n"));
    }

    #[tokio::test]
    async fn test_handle_connection_with_invalid_request() {
        let (result, response) = roundtrip(b"INVALID REQUEST").await;

        assert!(matches!(result, Err(Error::ParseError(_))));
        assert!(response.starts_with("HTTP/1.1 400 Bad Request\r\n"));
        assert!(response.contains("Error parsing request:"));
    }

    #[tokio::test]
    async fn test_handle_connection_closed_without_data() {
        let (result, response) = roundtrip(b"").await;

        assert!(result.is_ok());
        assert!(response.is_empty());
    }

    #[tokio::test]
    async fn test_serves_over_tcp() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let engine = user_engine();

        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            HttpServer::handle_connection(&mut socket, engine, 1024).await
        });

        let mut client = TcpStream::connect(addr).await.unwrap();
        client.write_all(b"GET /user/7?x=1 HTTP/1.1\r\nHost: localhost\r\n\r\n").await.unwrap();

        let served = server.await.unwrap();
        assert!(served.is_ok());

        let mut response = String::new();
        client.read_to_string(&mut response).await.unwrap();

        assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(response.ends_with("user 7"));
    }

    #[test]
    fn test_resolve_address() {
        assert_eq!(resolve_with(Some("127.0.0.1:9000"), Some("3000".to_string())).unwrap().port(), 9000);
        assert_eq!(resolve_with(Some(":9001"), None).unwrap().to_string(), "0.0.0.0:9001");
        assert_eq!(resolve_with(None, Some("3000".to_string())).unwrap().to_string(), "0.0.0.0:3000");
        assert_eq!(resolve_with(None, None).unwrap().to_string(), "0.0.0.0:8080");
        assert_eq!(resolve_with(None, Some(String::new())).unwrap().port(), 8080);
        assert!(matches!(resolve_with(Some("not an address"), None), Err(Error::InvalidAddress(_))));
    }

    #[test]
    fn test_route_errors_convert() {
        let mut engine = Engine::default();
        engine.get("/a", |_: &mut Context| {}).unwrap();

        let register = |engine: &mut Engine| -> Result<(), Error> {
            engine.get("/a", |_: &mut Context| {})?;
            Ok(())
        };
        let err = register(&mut engine).unwrap_err();
        assert!(matches!(err, Error::Route(RouteError::Duplicate { .. })));
        assert!(err.to_string().starts_with("Route error: duplicate route registration"));
    }

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.max_connections, 1024);
        assert_eq!(config.read_buffer_size, 8192);
    }
}

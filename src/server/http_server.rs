//! HTTP server implementation.

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{Semaphore, mpsc};
use tokio::task::JoinSet;
use tokio::signal;
use log::{debug, error, info, warn};

use crate::engine::Engine;
use crate::http::{HttpResponse, StatusCode, parse_request};
use crate::server::config::ServerConfig;
use crate::server::error::Error;

/// Serves an [`Engine`] over TCP, one tokio task per connection.
pub struct HttpServer {
    /// The server configuration.
    pub config: ServerConfig,
    /// The engine every request is dispatched through.
    pub engine: Arc<Engine>,
}

impl HttpServer {
    /// Create a server for a fully configured engine.
    pub fn new(config: ServerConfig, engine: Engine) -> Self {
        Self {
            config,
            engine: Arc::new(engine),
        }
    }

    /// Display the server banner and registered endpoints.
    fn display_server_info(&self) {
        let banner = include_str!("../banner.txt");
        info!("\n{banner}");

        info!("Registered endpoints:");
        for (method, pattern) in self.engine.router().routes() {
            info!("  {method:<7} {pattern}");
        }
    }

    /// Set up the TCP listener.
    async fn setup_listener(&self) -> Result<TcpListener, Error> {
        let listener = TcpListener::bind(&self.config.addr).await?;
        info!("Server listening on http://{addr}", addr = self.config.addr);
        Ok(listener)
    }

    /// Set up a Ctrl+C handler for graceful shutdown.
    fn setup_ctrl_c_handler(shutdown_tx: mpsc::Sender<()>, tasks: &mut JoinSet<()>) {
        tasks.spawn(async move {
            match signal::ctrl_c().await {
                Ok(()) => {
                    info!("Received Ctrl+C, initiating graceful shutdown");
                    if shutdown_tx.send(()).await.is_err() {
                        debug!("Server loop already stopped");
                    }
                }
                Err(e) => {
                    error!("Error setting up Ctrl+C handler: {e}");
                }
            }
        });
    }

    /// Admit a new connection or turn it away with a 503 when at capacity.
    async fn handle_new_connection(
        mut socket: TcpStream,
        addr: SocketAddr,
        semaphore: Arc<Semaphore>,
        engine: Arc<Engine>,
        read_buffer_size: usize,
        tasks: &mut JoinSet<()>,
    ) {
        let permit = match semaphore.try_acquire_owned() {
            Ok(permit) => permit,
            Err(_) => {
                warn!("Connection limit reached, rejecting connection from {addr}");
                let response = HttpResponse::new(StatusCode::ServiceUnavailable)
                    .with_content_type("text/plain")
                    .with_body_string("Server is at capacity, please try again later");
                if let Err(e) = socket.write_all(&response.to_bytes()).await {
                    debug!("Could not send 503 to {addr}: {e}");
                }
                return;
            }
        };

        tasks.spawn(async move {
            // Released when the task completes.
            let _permit = permit;

            if let Err(e) = Self::handle_connection(&mut socket, engine, read_buffer_size).await {
                match e {
                    Error::ParseError(e) => warn!("Rejected malformed request from {addr}: {e}"),
                    e => error!("Error handling connection from {addr}: {e}"),
                }
            }
        });
    }

    /// Log an accept failure and report whether the loop should stop.
    async fn handle_connection_error(e: std::io::Error) -> bool {
        error!("Error accepting connection: {e}");

        if e.kind() == std::io::ErrorKind::BrokenPipe {
            error!("Critical error accepting connection, shutting down");
            return true;
        }

        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
        false
    }

    /// Perform graceful shutdown.
    async fn perform_shutdown(tasks: &mut JoinSet<()>) {
        info!("Waiting for {len} active connections to complete...", len = tasks.len());
        let shutdown_timeout = tokio::time::Duration::from_secs(30);
        let drained = tokio::time::timeout(shutdown_timeout, async {
            while let Some(res) = tasks.join_next().await {
                if let Err(e) = res {
                    error!("Task failed during shutdown: {e}");
                }
            }
        })
        .await;

        if drained.is_err() {
            warn!("Shutdown timeout elapsed with {len} connections still open", len = tasks.len());
            tasks.abort_all();
        }
        info!("Server shutdown complete");
    }

    /// Start the server and serve until Ctrl+C.
    pub async fn start(&self) -> Result<(), Error> {
        self.display_server_info();

        let listener = self.setup_listener().await?;
        let semaphore = Arc::new(Semaphore::new(self.config.max_connections));
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);
        let mut tasks = JoinSet::new();

        Self::setup_ctrl_c_handler(shutdown_tx, &mut tasks);

        loop {
            tokio::select! {
                _ = shutdown_rx.recv() => {
                    info!("Shutting down server...");
                    break;
                }

                accept_result = listener.accept() => {
                    match accept_result {
                        Ok((socket, addr)) => {
                            Self::handle_new_connection(
                                socket,
                                addr,
                                Arc::clone(&semaphore),
                                Arc::clone(&self.engine),
                                self.config.read_buffer_size,
                                &mut tasks,
                            ).await;
                        }
                        Err(e) => {
                            if Self::handle_connection_error(e).await {
                                break;
                            }
                        }
                    }
                }
            }
        }

        Self::perform_shutdown(&mut tasks).await;

        Ok(())
    }

    /// Read one request from `socket`, dispatch it and write the response.
    ///
    /// A request that fails to parse is answered with a 400 and reported as
    /// [`Error::ParseError`]. Route misses are ordinary 404 responses.
    pub async fn handle_connection(
        socket: &mut (impl AsyncRead + AsyncWrite + Unpin),
        engine: Arc<Engine>,
        read_buffer_size: usize,
    ) -> Result<(), Error> {
        let mut buf = vec![0; read_buffer_size];

        let n = socket.read(&mut buf).await?;
        if n == 0 {
            return Ok(()); // Connection closed
        }

        let request = match parse_request(&buf[..n]) {
            Ok(req) => req,
            Err(e) => {
                let response = HttpResponse::new(StatusCode::BadRequest)
                    .with_content_type("text/plain")
                    .with_body_string(format!("Error parsing request: {e}"));
                socket.write_all(&response.to_bytes()).await?;
                return Err(Error::ParseError(e));
            }
        };

        let response = engine.handle(request);
        socket.write_all(&response.to_bytes()).await?;
        socket.flush().await?;

        Ok(())
    }
}

impl Engine {
    /// Serve this engine with `config` until Ctrl+C.
    pub async fn run(self, config: ServerConfig) -> Result<(), Error> {
        HttpServer::new(config, self).start().await
    }
}

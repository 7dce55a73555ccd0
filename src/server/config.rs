//! Server configuration.

use std::env;
use std::net::SocketAddr;

use crate::server::error::Error;

/// Port used when neither an address nor `PORT` is given.
pub const DEFAULT_PORT: u16 = 8080;

/// HTTP server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// The address to bind to.
    pub addr: SocketAddr,
    /// The maximum number of concurrent connections.
    pub max_connections: usize,
    /// The read buffer size; a request must fit in one read of this size.
    pub read_buffer_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], DEFAULT_PORT)),
            max_connections: 1024,
            read_buffer_size: 8192,
        }
    }
}

impl ServerConfig {
    /// Default limits, bound to the address picked by [`resolve_address`].
    pub fn from_env(addr: Option<&str>) -> Result<Self, Error> {
        Ok(Self {
            addr: resolve_address(addr)?,
            ..Self::default()
        })
    }
}

/// Pick the listen address: `addr` if given, else `:$PORT`, else `:8080`.
///
/// A leading `:` means all interfaces, so `":3000"` binds `0.0.0.0:3000`.
pub fn resolve_address(addr: Option<&str>) -> Result<SocketAddr, Error> {
    resolve_with(addr, env::var("PORT").ok())
}

pub(crate) fn resolve_with(addr: Option<&str>, port: Option<String>) -> Result<SocketAddr, Error> {
    let chosen = match (addr, port) {
        (Some(addr), _) => addr.to_string(),
        (None, Some(port)) if !port.is_empty() => format!(":{port}"),
        _ => format!(":{DEFAULT_PORT}"),
    };

    let full = match chosen.strip_prefix(':') {
        Some(port) => format!("0.0.0.0:{port}"),
        None => chosen.clone(),
    };
    full.parse().map_err(|_| Error::InvalidAddress(chosen))
}

//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::time::Duration;

use url::Url;

/// Everything needed to bind the gateway and reach the backend.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) backend_base_url: Url,
    pub(crate) backend_timeout: Option<Duration>,
}

impl ServerConfig {
    /// Construct a server configuration for `backend_base_url`.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, backend_base_url: Url) -> Self {
        Self {
            bind_addr,
            backend_base_url,
            backend_timeout: None,
        }
    }

    /// Abort backend calls that take longer than `timeout`.
    #[must_use]
    pub fn with_backend_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.backend_timeout = timeout;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

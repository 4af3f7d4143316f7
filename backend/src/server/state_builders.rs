//! Builders for the shared HTTP state.

use std::sync::Arc;

use actix_web::web;

use oncare_gateway::domain::{BackendRoutes, RouteProxy};
use oncare_gateway::inbound::http::state::HttpState;
use oncare_gateway::outbound::backend::BackendHttpClient;

use super::ServerConfig;

/// Build the route proxy over the reqwest backend adapter.
///
/// # Errors
/// Returns [`std::io::Error`] when the HTTP client cannot be constructed.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let client = BackendHttpClient::new(config.backend_timeout)
        .map_err(|err| std::io::Error::other(format!("backend client setup failed: {err}")))?;
    let routes = BackendRoutes::new(config.backend_base_url.clone());
    let proxy = RouteProxy::new(Arc::new(client), routes);
    Ok(web::Data::new(HttpState::new(Arc::new(proxy))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;
    use url::Url;

    #[test]
    fn state_targets_the_configured_backend() {
        let addr: SocketAddr = "127.0.0.1:0".parse().expect("socket addr");
        let base = Url::parse("http://backend.test").expect("url");
        let config = ServerConfig::new(addr, base);

        let state = build_http_state(&config).expect("http state");

        assert_eq!(state.proxy.routes().base().as_str(), "http://backend.test/");
    }
}

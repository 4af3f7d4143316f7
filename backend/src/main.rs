//! Gateway entry-point: resolves configuration, wires the proxied admin API,
//! health checks, and OpenAPI docs.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

mod server;

use std::env;

use actix_web::web;
use color_eyre::eyre::{Context, Result};
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use oncare_gateway::inbound::http::health::HealthState;
use oncare_gateway::outbound::backend::{BuildMode, backend_base_url_from_env};
use oncare_gateway::settings::GatewaySettings;
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = GatewaySettings::load_from_iter(env::args_os())
        .wrap_err("failed to load gateway settings")?;
    let bind_addr = settings.bind_addr()?;
    let backend_base_url =
        backend_base_url_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())?;
    info!(%bind_addr, backend = %backend_base_url, "starting gateway");

    let config = ServerConfig::new(bind_addr, backend_base_url)
        .with_backend_timeout(settings.backend_timeout());
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config).wrap_err("failed to start HTTP server")?;
    server.await.wrap_err("HTTP server terminated with an error")
}

//! Backend entry-point: loads settings, wires the store adapters, and serves
//! the admin REST API.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server, watch_for_shutdown};
use storefront_admin::inbound::http::health::HealthState;
use storefront_admin::settings::AppSettings;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let config = ServerConfig::from_settings(&settings)
        .map_err(|e| std::io::Error::other(e.to_string()))?;

    info!(bind_addr = %config.bind_addr(), "starting storefront admin API");
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), &config)?;
    watch_for_shutdown(health_state);
    server.await
}

//! Backend entry-point: wires configuration, adapters, and REST endpoints.

use actix_web::web;
use mockable::DefaultEnv;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use backend::inbound::http::session_config::BuildMode;
use backend::server::{self, ServerConfig};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(error) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(%error, "tracing init failed");
    }

    let config = ServerConfig::from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(|error| std::io::Error::other(format!("configuration: {error}")))?;

    let health_state = web::Data::new(HealthState::new());
    let server = server::create_server(health_state, &config)?;
    server.await
}

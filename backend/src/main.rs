//! Service entry-point: loads settings, wires adapters, and serves HTTP.

mod server;

use actix_web::web;
use color_eyre::eyre::{Context, Result};
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use idmapping::domain::Validator;
use idmapping::inbound::http::health::HealthState;
use idmapping::settings::Settings;
use ortho_config::OrthoConfig;

use server::{ServerConfig, create_server};

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

    let settings = Settings::load().wrap_err("failed to load settings")?;
    let validator = Validator::default();
    let config =
        ServerConfig::from_settings(&settings, &validator).wrap_err("invalid settings")?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config, validator)?;
    let result = server.await;
    health_state.mark_unhealthy();
    result.wrap_err("server terminated with an error")
}

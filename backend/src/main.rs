//! Contacts API entry-point: loads settings, wires storage and serves HTTP.

mod server;

use actix_web::web;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use contacts_api::inbound::http::health::HealthState;
use contacts_api::outbound::persistence::{DbPool, run_pending_migrations};
use server::{ServerConfig, ServerSettings, create_server};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(e) = fmt().with_env_filter(filter).json().try_init() {
        warn!(error = %e, "tracing init failed");
    }
}

async fn resolve_config(settings: &ServerSettings) -> std::io::Result<ServerConfig> {
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let mut config = ServerConfig::new(bind_addr);

    if let Some(pool_config) = settings.pool_config() {
        if settings.run_migrations() {
            run_pending_migrations(pool_config.database_url())
                .await
                .map_err(std::io::Error::other)?;
        }
        let pool = DbPool::new(pool_config)
            .await
            .map_err(std::io::Error::other)?;
        config = config.with_db_pool(pool);
    }

    Ok(config)
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    init_tracing();

    let settings = ServerSettings::load_from_args(std::env::args_os()).map_err(|err| {
        error!(error = %err, "invalid configuration");
        std::io::Error::other(err)
    })?;
    let config = resolve_config(&settings).await.inspect_err(|err| {
        error!(error = %err, "startup failed");
    })?;

    info!(bind_addr = %config.bind_addr, "starting contacts API");
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    let outcome = server.await;
    health_state.mark_unhealthy();
    outcome
}

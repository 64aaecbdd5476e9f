//! Backend entry-point: loads settings, prepares the store and serves the REST API.

mod server;

use actix_web::web;
use color_eyre::eyre::{Context, Result};
use ortho_config::OrthoConfig;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use rentals::inbound::http::health::HealthState;
use rentals::outbound::persistence::{DbPool, sync_schema};
use rentals::settings::ServerSettings;
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

    let settings = ServerSettings::load().wrap_err("failed to load server settings")?;
    let bind_addr = settings
        .bind_addr()
        .wrap_err("RENTALS_BIND_ADDR is not a socket address")?;
    let schema_mode = settings
        .schema_mode()
        .wrap_err("RENTALS_SCHEMA_MODE is invalid")?;
    let pool_config = settings.pool_config();
    let pool = DbPool::new_lazy(&pool_config);

    let health_state = web::Data::new(HealthState::new());
    match sync_schema(&pool, schema_mode).await {
        Ok(()) => {
            info!(
                database = pool_config.database_url(),
                mode = %schema_mode,
                "store schema ready"
            );
            health_state.mark_ready();
        }
        Err(err) => error!(
            error = %err,
            database = pool_config.database_url(),
            "store unavailable; serving in degraded mode"
        ),
    }

    let config = ServerConfig::new(bind_addr, pool);
    info!(addr = %config.bind_addr(), "starting HTTP server");
    create_server(health_state, config)?.await?;
    Ok(())
}

//! Backend entry-point: loads settings, wires storage, and serves the REST API.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use foodapp::inbound::http::health::HealthState;
use foodapp::outbound::persistence::{DbPool, run_pending_migrations};
use server::{AppSettings, ServerConfig, create_server};

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
        .map_err(|err| std::io::Error::other(format!("failed to load settings: {err}")))?;
    let mut config = ServerConfig::from_settings(&settings).map_err(std::io::Error::other)?;

    match settings.pool_config() {
        Some(pool_config) => {
            if settings.run_migrations {
                run_pending_migrations(pool_config.database_url())
                    .await
                    .map_err(std::io::Error::other)?;
            }
            let pool = DbPool::new(pool_config)
                .await
                .map_err(|err| std::io::Error::other(format!("database pool: {err}")))?;
            info!("using PostgreSQL storage");
            config = config.with_db_pool(pool);
        }
        None => warn!("no database configured; using in-memory storage"),
    }

    let bind_addr = config.bind_addr();
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "server listening");
    server.await
}

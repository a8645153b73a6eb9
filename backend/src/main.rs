//! Backend entry-point: loads settings, wires storage and serves the REST API.

mod server;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use hostel_backend::inbound::http::health::HealthState;
use hostel_backend::inbound::http::token_config::{
    BuildMode, ProcessEnv, token_settings_from_env,
};
use hostel_backend::outbound::persistence::{DbPool, PoolConfig, run_migrations};
#[cfg(feature = "metrics")]
use server::make_metrics;
use server::{ServerConfig, ServerSettings, create_server};

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
    let token = token_settings_from_env(&ProcessEnv, BuildMode::from_debug_assertions())
        .wrap_err("failed to load token secret")?;
    info!(
        fingerprint = %token.fingerprint(),
        ephemeral = token.is_ephemeral(),
        "token signing secret loaded"
    );

    let bind_addr = settings.socket_addr();
    let mut config = ServerConfig::new(bind_addr, token, settings.token_ttl());
    match settings.database_url() {
        Some(url) => {
            run_migrations(url).await.wrap_err("failed to apply migrations")?;
            let pool = DbPool::new(PoolConfig::new(url))
                .await
                .wrap_err("failed to build database pool")?;
            info!("using PostgreSQL storage");
            config = config.with_db_pool(pool);
        }
        None => warn!("HOSTEL_DATABASE_URL not set; using in-memory storage"),
    }
    #[cfg(feature = "metrics")]
    {
        config = config.with_metrics(Some(make_metrics()?));
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "server listening");
    server.await?;
    Ok(())
}

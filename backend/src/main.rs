//! Backend entry-point: loads settings, prepares storage and serves the API.

mod server;

use actix_web::web;
use color_eyre::eyre::{Context, Result};
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use notes_api::inbound::http::health::HealthState;
use notes_api::inbound::http::token_config::{BuildMode, token_settings_from_env};
use notes_api::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use notes_api::outbound::speller::HttpSpellingCorrector;
use notes_api::settings::AppSettings;

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

    let settings = AppSettings::load().wrap_err("failed to load settings")?;
    let tokens = token_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .wrap_err("invalid token configuration")?;
    let bind_addr = settings.bind_addr()?;
    let database_url = settings.database_url()?;

    run_migrations(&database_url)
        .await
        .wrap_err("failed to migrate database")?;
    let pool = DbPool::new(
        PoolConfig::new(database_url)
            .with_max_size(settings.pool_max_size())
            .with_connection_timeout(settings.storage_timeout()),
    )
    .await
    .wrap_err("failed to build database pool")?;
    pool.ping().await.wrap_err("database is unreachable")?;

    let mut config = ServerConfig::new(bind_addr, tokens, pool, settings.storage_timeout());
    if settings.speller_enabled()? {
        let corrector =
            HttpSpellingCorrector::new(settings.speller_url()?, settings.speller_timeout())
                .wrap_err("failed to build spelling client")?;
        info!(endpoint = %corrector.endpoint(), "spelling correction enabled");
        config = config.with_speller(corrector);
    } else {
        warn!("spelling correction disabled; notes are stored as submitted");
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    let handle = server.handle();
    let shutdown_health = health_state.clone();
    actix_web::rt::spawn(async move {
        shutdown_signal().await;
        info!("shutdown requested");
        shutdown_health.mark_unhealthy();
        handle.stop(true).await;
    });

    info!(%bind_addr, "server listening");
    server.await.wrap_err("server terminated abnormally")?;
    info!("server stopped");
    Ok(())
}

/// Resolve on SIGINT, or SIGTERM where available.
async fn shutdown_signal() {
    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = interrupt => {}
        () = terminate => {}
    }
}

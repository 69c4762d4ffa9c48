//! # servicecored: servicecore daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Initialize logging from the configured filter
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct repository implementations (adapters)
//! - Construct application services, injecting repositories via port traits
//! - Build the axum router, injecting application services
//! - Bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer: no domain logic belongs here.

mod config;

use anyhow::Context;
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

use servicecore_adapter_http_axum::state::AppState;
use servicecore_adapter_storage_sqlite_sqlx::{
    Config as DatabaseConfig, SqliteBusinessHoursRepository, SqliteCatalogueRepository,
    SqliteProviderRepository, SqliteServiceTypeRepository,
};
use servicecore_app::services::business_hours_service::BusinessHoursService;
use servicecore_app::services::catalogue_service::CatalogueService;
use servicecore_app::services::provider_service::ProviderService;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;

    let filter = EnvFilter::try_new(&config.logging.filter)
        .with_context(|| format!("invalid log filter `{}`", config.logging.filter))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Database
    let db = DatabaseConfig {
        database_url: config.database_url().to_string(),
    }
    .build()
    .await
    .context("failed to open database")?;
    let pool = db.pool().clone();

    // Repositories
    let provider_repo = SqliteProviderRepository::new(pool.clone());
    let service_type_repo = SqliteServiceTypeRepository::new(pool.clone());
    let hours_repo = SqliteBusinessHoursRepository::new(pool.clone());
    let catalogue_repo = SqliteCatalogueRepository::new(pool);

    // Services
    let provider_service = ProviderService::new(provider_repo.clone(), service_type_repo);
    let business_hours_service = BusinessHoursService::new(hours_repo, provider_repo.clone());
    let catalogue_service = CatalogueService::new(catalogue_repo, provider_repo);

    // HTTP
    let state = AppState::new(provider_service, business_hours_service, catalogue_service);
    let mut app = servicecore_adapter_http_axum::router::build(state);
    if config.cors.enabled {
        app = app.layer(CorsLayer::permissive());
    }

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!(%bind_addr, cors = config.cors.enabled, "servicecored listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("servicecored stopped");
    Ok(())
}

/// Resolves on Ctrl+C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown signal received");
}

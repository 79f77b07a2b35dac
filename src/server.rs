//! HTTP server initialization and runtime setup.
//!
//! Handles the database pool, migrations, event handler wiring, and the Axum
//! server lifecycle.

use crate::application::handlers::{EventHandler, EventLogHandler};
use crate::application::services::EventEmitter;
use crate::config::Config;
use crate::domain::repositories::ShortLinkRepository;
use crate::infrastructure::persistence::PgShortLinkRepository;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;

/// Builds the event emitter for `repository` from configuration.
///
/// The visit counter is always the built-in handler. External handlers are
/// empty unless `event_log_enabled` is set.
pub fn build_emitter(
    config: &Config,
    repository: Arc<dyn ShortLinkRepository>,
) -> EventEmitter {
    let mut external: Vec<Arc<dyn EventHandler>> = Vec::new();
    if config.event_log_enabled {
        external.push(Arc::new(EventLogHandler::new()));
    }

    EventEmitter::with_default_handlers(repository, config.visit_counter_mode)
        .with_external_handlers(external)
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Migrations
/// - Event emitter with the visit counter
/// - Axum HTTP server, stopped on Ctrl+C
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    let repository: Arc<dyn ShortLinkRepository> =
        Arc::new(PgShortLinkRepository::new(Arc::new(pool)));

    let emitter = build_emitter(&config, repository.clone());
    tracing::info!(
        external = emitter.external_count(),
        builtin = emitter.builtin_count(),
        "Event handlers registered"
    );

    let state = AppState::new(repository, Arc::new(emitter), config.organization_id.clone());

    let app = app_router(state);

    let addr = config.listen_addr;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received");
}

//! Application builder: wires router, middleware and state into an Axum app
//! and runs it.

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;

use cabinet_core::config::AppConfig;
use cabinet_core::error::AppError;
use cabinet_database::{DatabasePool, SqliteEntityStore, seed};
use cabinet_entity::store::EntityStore;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Runs the cabinet server on an already migrated database.
pub async fn run_server(config: AppConfig, db_pool: DatabasePool) -> Result<(), AppError> {
    let store: Arc<dyn EntityStore> = Arc::new(SqliteEntityStore::new(db_pool.pool().clone()));

    if config.seed.enabled {
        seed::seed_demo_project(store.as_ref()).await?;
    }

    let addr = config.server.bind_address();
    let state = AppState::new(config, store).with_database(db_pool.clone());
    let app = build_app(state);

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Cabinet server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    db_pool.close().await;
    tracing::info!("Cabinet server shut down gracefully");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}

//! File Cabinet Server
//!
//! Main entry point: loads configuration, initializes logging, opens the
//! SQLite store and serves the cabinet API.

use std::path::Path;

use tracing_subscriber::{EnvFilter, fmt};

use cabinet_core::config::{AppConfig, DatabaseConfig};
use cabinet_core::error::AppError;
use cabinet_database::DatabasePool;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration for the environment named by `CABINET_ENV`.
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("CABINET_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting File Cabinet v{}", env!("CARGO_PKG_VERSION"));

    create_data_directory(&config.database).await?;

    let db_pool = DatabasePool::connect_and_migrate(&config.database).await?;
    tracing::info!("Database migrations complete");

    cabinet_api::run_server(config, db_pool).await
}

/// Create the directory holding the SQLite file.
async fn create_data_directory(config: &DatabaseConfig) -> Result<(), AppError> {
    if config.is_in_memory() {
        return Ok(());
    }

    let path = config
        .url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:");
    let path = path.split('?').next().unwrap_or(path);

    if let Some(dir) = Path::new(path).parent().filter(|d| !d.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(dir).await.map_err(|e| {
            AppError::internal(format!("Failed to create dir '{}': {e}", dir.display()))
        })?;
    }

    Ok(())
}

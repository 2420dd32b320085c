//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use cabinet_core::config::AppConfig;
use cabinet_database::DatabasePool;
use cabinet_entity::store::EntityStore;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Folder and file store
    pub store: Arc<dyn EntityStore>,
    /// Database pool, when the store is database backed
    pub db_pool: Option<DatabasePool>,
}

impl AppState {
    /// State for a store without a database pool to health-check.
    pub fn new(config: AppConfig, store: Arc<dyn EntityStore>) -> Self {
        Self {
            config: Arc::new(config),
            store,
            db_pool: None,
        }
    }

    /// Attach the database pool reported by the health check.
    pub fn with_database(mut self, db_pool: DatabasePool) -> Self {
        self.db_pool = Some(db_pool);
        self
    }
}

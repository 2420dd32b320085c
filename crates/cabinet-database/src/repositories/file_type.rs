//! File type repository implementation.

use sqlx::SqlitePool;

use cabinet_core::error::{AppError, ErrorKind};
use cabinet_core::result::AppResult;

/// Repository for the file type registry.
#[derive(Debug, Clone)]
pub struct FileTypeRepository {
    pool: SqlitePool,
}

impl FileTypeRepository {
    /// Create a new file type repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Register a file type (or refresh its icon) and return its row id.
    pub async fn upsert(&self, file_type: &str, icon: &str) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "INSERT INTO file_types (file_type, icon) VALUES (?, ?) \
             ON CONFLICT (file_type) DO UPDATE SET icon = excluded.icon RETURNING id",
        )
        .bind(file_type)
        .bind(icon)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to register file type", e))
    }
}

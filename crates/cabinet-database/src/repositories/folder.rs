//! Folder repository implementation.

use chrono::Utc;
use sqlx::SqlitePool;

use cabinet_core::error::{AppError, ErrorKind};
use cabinet_core::result::AppResult;
use cabinet_core::types::FolderId;
use cabinet_entity::folder::Folder;

use super::{is_foreign_key_violation, is_unique_violation};

/// Repository for folder CRUD queries.
#[derive(Debug, Clone)]
pub struct FolderRepository {
    pool: SqlitePool,
}

impl FolderRepository {
    /// Create a new folder repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find a folder by ID.
    pub async fn find_by_id(&self, id: FolderId) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>("SELECT * FROM folders WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find folder", e))
    }

    /// Find a folder by name among the children of `parent` (or the roots).
    pub async fn find_by_name(
        &self,
        name: &str,
        parent: Option<FolderId>,
    ) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>(
            "SELECT * FROM folders WHERE name = ? AND parent_folder_id IS ?",
        )
        .bind(name)
        .bind(parent)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find folder by name", e)
        })
    }

    /// List every folder in id order.
    pub async fn find_all(&self) -> AppResult<Vec<Folder>> {
        sqlx::query_as::<_, Folder>("SELECT * FROM folders ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list folders", e))
    }

    /// Create a folder, or return the existing sibling folder of that name.
    pub async fn create_or_get(&self, name: &str, parent: Option<FolderId>) -> AppResult<FolderId> {
        let now = Utc::now();
        sqlx::query(
            "INSERT INTO folders (name, parent_folder_id, created_at, updated_at) \
             VALUES (?, ?, ?, ?) ON CONFLICT DO NOTHING",
        )
        .bind(name)
        .bind(parent)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                AppError::not_found(format!(
                    "Parent folder {} not found",
                    parent.map(|p| p.to_string()).unwrap_or_default()
                ))
            } else {
                AppError::with_source(ErrorKind::Database, "Failed to create folder", e)
            }
        })?;

        self.find_by_name(name, parent)
            .await?
            .map(|folder| folder.id)
            .ok_or_else(|| AppError::internal(format!("Folder '{name}' vanished after insert")))
    }

    /// Rename a folder.
    pub async fn rename(&self, folder_id: FolderId, new_name: &str) -> AppResult<()> {
        let result = sqlx::query("UPDATE folders SET name = ?, updated_at = ? WHERE id = ?")
            .bind(new_name)
            .bind(Utc::now())
            .bind(folder_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AppError::conflict(format!(
                        "The folder was not renamed because another folder with the same name ({new_name}) already exists in the same folder"
                    ))
                } else {
                    AppError::with_source(ErrorKind::Database, "Failed to rename folder", e)
                }
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Folder {folder_id} not found")));
        }
        Ok(())
    }

    /// Delete a folder (cascades to sub-folders and files).
    pub async fn delete(&self, folder_id: FolderId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM folders WHERE id = ?")
            .bind(folder_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete folder", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    /// Count files directly in a folder.
    pub async fn count_files(&self, folder_id: FolderId) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM files WHERE folder_id = ?")
            .bind(folder_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count files", e))?;
        Ok(count as u64)
    }
}

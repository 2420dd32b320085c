//! File repository implementation.

use chrono::Utc;
use sqlx::SqlitePool;

use cabinet_core::error::{AppError, ErrorKind};
use cabinet_core::result::AppResult;
use cabinet_core::types::{FileId, FolderId};
use cabinet_entity::file::{File, FileDownload, FileUpload};

use super::{is_foreign_key_violation, is_unique_violation};

/// Repository for file CRUD and query operations.
#[derive(Debug, Clone)]
pub struct FileRepository {
    pool: SqlitePool,
}

impl FileRepository {
    /// Create a new file repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find a file by ID.
    pub async fn find_by_id(&self, id: FileId) -> AppResult<Option<File>> {
        sqlx::query_as::<_, File>("SELECT * FROM files WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find file", e))
    }

    /// List the files directly in a folder, ordered by name.
    pub async fn find_by_folder(&self, folder_id: FolderId) -> AppResult<Vec<File>> {
        sqlx::query_as::<_, File>("SELECT * FROM files WHERE folder_id = ? ORDER BY name ASC")
            .bind(folder_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list files", e))
    }

    /// Find a file by folder ID and name (for duplicate checking).
    pub async fn find_by_folder_and_name(
        &self,
        folder_id: FolderId,
        name: &str,
    ) -> AppResult<Option<File>> {
        sqlx::query_as::<_, File>("SELECT * FROM files WHERE folder_id = ? AND name = ?")
            .bind(folder_id)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find file by name", e)
            })
    }

    /// Insert a file, overwriting the same-named file in the folder.
    pub async fn upsert(&self, upload: &FileUpload, file_type_id: i64) -> AppResult<FileId> {
        let now = Utc::now();
        sqlx::query_scalar::<_, FileId>(
            "INSERT INTO files (name, description, file_type_id, folder_id, content, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?) \
             ON CONFLICT (name, folder_id) DO UPDATE SET \
                description = excluded.description, \
                file_type_id = excluded.file_type_id, \
                content = excluded.content, \
                updated_at = excluded.updated_at \
             RETURNING id",
        )
        .bind(&upload.name)
        .bind(&upload.description)
        .bind(file_type_id)
        .bind(upload.folder_id)
        .bind(&upload.content)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                AppError::not_found(format!("Folder {} not found", upload.folder_id))
            } else {
                AppError::with_source(ErrorKind::Database, "Failed to save file", e)
            }
        })
    }

    /// Rename a file and re-point it at the type of its new name.
    pub async fn rename(&self, file_id: FileId, new_name: &str, file_type_id: i64) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE files SET name = ?, file_type_id = ?, updated_at = ? WHERE id = ?",
        )
        .bind(new_name)
        .bind(file_type_id)
        .bind(Utc::now())
        .bind(file_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::conflict(format!(
                    "The file was not renamed because another file with the same name ({new_name}) already exists in the same folder"
                ))
            } else {
                AppError::with_source(ErrorKind::Database, "Failed to rename file", e)
            }
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("File {file_id} not found")));
        }
        Ok(())
    }

    /// Delete a file.
    pub async fn delete(&self, file_id: FileId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM files WHERE id = ?")
            .bind(file_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete file", e))?;
        Ok(result.rows_affected() > 0)
    }

    /// Fetch the description of a file.
    pub async fn description(&self, file_id: FileId) -> AppResult<Option<String>> {
        sqlx::query_scalar::<_, String>("SELECT description FROM files WHERE id = ?")
            .bind(file_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to load file description", e)
            })
    }

    /// Fetch the content of a file.
    pub async fn content(&self, file_id: FileId) -> AppResult<Option<String>> {
        sqlx::query_scalar::<_, String>("SELECT content FROM files WHERE id = ?")
            .bind(file_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to load file content", e)
            })
    }

    /// Fetch the name and content of a file for download.
    pub async fn download(&self, file_id: FileId) -> AppResult<Option<FileDownload>> {
        sqlx::query_as::<_, FileDownload>("SELECT name, content FROM files WHERE id = ?")
            .bind(file_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to download file", e))
    }
}

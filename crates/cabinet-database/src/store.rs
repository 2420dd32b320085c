//! Durable [`EntityStore`] backed by SQLite.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::{debug, info};

use cabinet_core::error::AppError;
use cabinet_core::result::AppResult;
use cabinet_core::types::{FileId, FolderId};
use cabinet_entity::entity::Entity;
use cabinet_entity::file::{DEFAULT_FILE_ICON, FileDownload, FileUpload, file_type_of};
use cabinet_entity::store::EntityStore;

use crate::repositories::{EntityRepository, FileRepository, FileTypeRepository, FolderRepository};

/// Entity store over the `folders`, `files` and `file_types` tables.
#[derive(Debug, Clone)]
pub struct SqliteEntityStore {
    entity_repo: Arc<EntityRepository>,
    folder_repo: Arc<FolderRepository>,
    file_repo: Arc<FileRepository>,
    file_type_repo: Arc<FileTypeRepository>,
}

impl SqliteEntityStore {
    /// Create a store over a migrated pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            entity_repo: Arc::new(EntityRepository::new(pool.clone())),
            folder_repo: Arc::new(FolderRepository::new(pool.clone())),
            file_repo: Arc::new(FileRepository::new(pool.clone())),
            file_type_repo: Arc::new(FileTypeRepository::new(pool)),
        }
    }

    async fn file_type_id_for(&self, name: &str) -> AppResult<i64> {
        self.file_type_repo
            .upsert(file_type_of(name), DEFAULT_FILE_ICON)
            .await
    }
}

#[async_trait]
impl EntityStore for SqliteEntityStore {
    async fn list_entities(&self) -> AppResult<Vec<Entity>> {
        let entities = self.entity_repo.list().await?;
        debug!(count = entities.len(), "Listed entities");
        Ok(entities)
    }

    async fn create_folder(&self, name: &str, parent: Option<FolderId>) -> AppResult<FolderId> {
        let id = self.folder_repo.create_or_get(name, parent).await?;
        info!(folder_id = %id, name = %name, "Folder created");
        Ok(id)
    }

    async fn delete_folder(&self, id: FolderId) -> AppResult<()> {
        if !self.folder_repo.delete(id).await? {
            return Err(AppError::not_found(format!("Folder {id} not found")));
        }
        info!(folder_id = %id, "Folder deleted");
        Ok(())
    }

    async fn rename_folder(&self, id: FolderId, new_name: &str) -> AppResult<()> {
        self.folder_repo.rename(id, new_name).await?;
        info!(folder_id = %id, name = %new_name, "Folder renamed");
        Ok(())
    }

    async fn upload_file(&self, upload: &FileUpload) -> AppResult<()> {
        let file_type_id = self.file_type_id_for(&upload.name).await?;
        let id = self.file_repo.upsert(upload, file_type_id).await?;
        info!(
            file_id = %id,
            folder_id = %upload.folder_id,
            name = %upload.name,
            size = upload.content.len(),
            "File uploaded"
        );
        Ok(())
    }

    async fn delete_file(&self, id: FileId) -> AppResult<()> {
        if !self.file_repo.delete(id).await? {
            return Err(AppError::not_found(format!("File {id} not found")));
        }
        info!(file_id = %id, "File deleted");
        Ok(())
    }

    async fn rename_file(&self, id: FileId, new_name: &str) -> AppResult<()> {
        let file_type_id = self.file_type_id_for(new_name).await?;
        self.file_repo.rename(id, new_name, file_type_id).await?;
        info!(file_id = %id, name = %new_name, "File renamed");
        Ok(())
    }

    async fn file_description(&self, id: FileId) -> AppResult<String> {
        self.file_repo
            .description(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("File {id} not found")))
    }

    async fn file_content(&self, id: FileId) -> AppResult<String> {
        self.file_repo
            .content(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("File {id} not found")))
    }

    async fn download_file(&self, id: FileId) -> AppResult<FileDownload> {
        self.file_repo
            .download(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("File {id} not found")))
    }
}

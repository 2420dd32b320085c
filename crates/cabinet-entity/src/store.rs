//! The query contract between the tree engine and the entity store.

use async_trait::async_trait;

use cabinet_core::result::AppResult;
use cabinet_core::types::{FileId, FolderId};

use crate::entity::Entity;
use crate::file::{FileDownload, FileUpload};

/// Durable folder/file store consumed by the tree engine.
///
/// Implementations enforce the hierarchy invariants: parents exist, no
/// entity is its own parent, folder names are unique among sibling folders
/// and file names among files of one folder. Sibling-name violations on
/// rename come back as an `ErrorKind::Conflict` error and leave the store
/// untouched.
#[async_trait]
pub trait EntityStore: Send + Sync + 'static {
    /// List every folder and file as flat records.
    async fn list_entities(&self) -> AppResult<Vec<Entity>>;

    /// Create a folder, or return the id of the existing sibling folder
    /// with the same name.
    async fn create_folder(&self, name: &str, parent: Option<FolderId>) -> AppResult<FolderId>;

    /// Delete a folder together with all descendant folders and files.
    async fn delete_folder(&self, id: FolderId) -> AppResult<()>;

    /// Rename a folder.
    async fn rename_folder(&self, id: FolderId, new_name: &str) -> AppResult<()>;

    /// Upload a file, overwriting an existing same-named file in the folder.
    async fn upload_file(&self, upload: &FileUpload) -> AppResult<()>;

    /// Delete a file.
    async fn delete_file(&self, id: FileId) -> AppResult<()>;

    /// Rename a file.
    async fn rename_file(&self, id: FileId, new_name: &str) -> AppResult<()>;

    /// The description of a file.
    async fn file_description(&self, id: FileId) -> AppResult<String>;

    /// The content of a file.
    async fn file_content(&self, id: FileId) -> AppResult<String>;

    /// Name and content of a file for download.
    async fn download_file(&self, id: FileId) -> AppResult<FileDownload>;
}

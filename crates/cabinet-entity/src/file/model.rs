//! File entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use cabinet_core::types::{FileId, FolderId};

/// A file stored in the cabinet. Content is kept as text.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct File {
    /// Unique file identifier.
    pub id: FileId,
    /// The file name (including extension), unique within its folder.
    pub name: String,
    /// Free-text description shown in the tree tooltip.
    pub description: String,
    /// Registered file type.
    pub file_type_id: i64,
    /// The folder containing this file.
    pub folder_id: FolderId,
    /// The file's text content.
    pub content: String,
    /// When the file was first uploaded.
    pub created_at: DateTime<Utc>,
    /// When the file was last overwritten or renamed.
    pub updated_at: DateTime<Utc>,
}

/// Data for uploading a file. An existing same-named file in the folder is
/// overwritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileUpload {
    /// The file name.
    pub name: String,
    /// Description shown in the tooltip.
    pub description: String,
    /// Destination folder.
    pub folder_id: FolderId,
    /// Text content.
    pub content: String,
}

/// A downloaded file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct FileDownload {
    /// The file name, used as the attachment name.
    pub name: String,
    /// The file's text content.
    pub content: String,
}

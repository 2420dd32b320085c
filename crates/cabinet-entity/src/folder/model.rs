//! Folder entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use cabinet_core::types::FolderId;

use crate::entity::Entity;

/// A folder in the cabinet hierarchy.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Folder {
    /// Unique folder identifier.
    pub id: FolderId,
    /// Folder name, unique among sibling folders.
    pub name: String,
    /// Parent folder ID (null for root folders).
    pub parent_folder_id: Option<FolderId>,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
    /// When the folder was last renamed.
    pub updated_at: DateTime<Utc>,
}

impl Folder {
    /// Check if this is a root folder (no parent).
    pub fn is_root(&self) -> bool {
        self.parent_folder_id.is_none()
    }
}

impl From<&Folder> for Entity {
    fn from(folder: &Folder) -> Self {
        Entity::folder(folder.id, folder.name.clone(), folder.parent_folder_id)
    }
}

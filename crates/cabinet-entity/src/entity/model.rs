//! Entity record model.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use cabinet_core::types::{FileId, FolderId};

/// Icon shown for a closed folder.
pub const FOLDER_ICON: &str = "📁";

/// Icon shown for the single folder currently marked open.
pub const FOLDER_OPEN_ICON: &str = "📂";

/// Whether an entity is a folder or a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// A folder row.
    Folder,
    /// A file row.
    File,
}

impl EntityKind {
    /// The wire name of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Folder => "folder",
            Self::File => "file",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a row carries an unknown entity type.
#[derive(Debug, Clone, Error)]
#[error("unknown entity type '{0}'")]
pub struct UnknownEntityKind(pub String);

impl TryFrom<String> for EntityKind {
    type Error = UnknownEntityKind;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "folder" => Ok(Self::Folder),
            "file" => Ok(Self::File),
            _ => Err(UnknownEntityKind(value)),
        }
    }
}

/// The true identity of an entity: folder and file ids overlap, so the
/// kind is part of the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityKey {
    /// Folder or file.
    pub kind: EntityKind,
    /// Row id within the kind's table.
    pub id: i64,
}

impl EntityKey {
    /// Key of a folder.
    pub fn folder(id: FolderId) -> Self {
        Self {
            kind: EntityKind::Folder,
            id: id.get(),
        }
    }

    /// Key of a file.
    pub fn file(id: FileId) -> Self {
        Self {
            kind: EntityKind::File,
            id: id.get(),
        }
    }

    /// Whether the key names a folder.
    pub fn is_folder(&self) -> bool {
        self.kind == EntityKind::Folder
    }

    /// The folder id, if this key names a folder.
    pub fn as_folder(&self) -> Option<FolderId> {
        self.is_folder().then_some(FolderId(self.id))
    }

    /// The file id, if this key names a file.
    pub fn as_file(&self) -> Option<FileId> {
        (self.kind == EntityKind::File).then_some(FileId(self.id))
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.kind, self.id)
    }
}

/// A folder or file as listed by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    /// Folder or file.
    #[serde(rename = "type")]
    pub kind: EntityKind,
    /// Row id, unique within `kind`.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Containing folder; `None` for root-level entries.
    pub parent_folder_id: Option<FolderId>,
    /// File extension (empty for folders and extension-less files).
    pub file_type: String,
    /// Icon for the entity's type.
    pub file_type_icon: String,
}

impl Entity {
    /// A folder record.
    pub fn folder(id: FolderId, name: impl Into<String>, parent: Option<FolderId>) -> Self {
        Self {
            kind: EntityKind::Folder,
            id: id.get(),
            name: name.into(),
            parent_folder_id: parent,
            file_type: String::new(),
            file_type_icon: FOLDER_ICON.to_string(),
        }
    }

    /// A file record.
    pub fn file(
        id: FileId,
        name: impl Into<String>,
        folder: FolderId,
        file_type: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        Self {
            kind: EntityKind::File,
            id: id.get(),
            name: name.into(),
            parent_folder_id: Some(folder),
            file_type: file_type.into(),
            file_type_icon: icon.into(),
        }
    }

    /// The entity's key.
    pub fn key(&self) -> EntityKey {
        EntityKey {
            kind: self.kind,
            id: self.id,
        }
    }

    /// Whether this is a folder.
    pub fn is_folder(&self) -> bool {
        self.kind == EntityKind::Folder
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format_matches_api() {
        let entity = Entity::folder(FolderId(3), "bin", Some(FolderId(1)));
        let json = serde_json::to_value(&entity).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "type": "folder",
                "id": 3,
                "name": "bin",
                "parentFolderId": 1,
                "fileType": "",
                "fileTypeIcon": "📁"
            })
        );
    }

    #[test]
    fn test_key_distinguishes_kinds() {
        let folder = Entity::folder(FolderId(1), "a", None);
        let file = Entity::file(FileId(1), "a.txt", FolderId(1), "txt", "📄");
        assert_ne!(folder.key(), file.key());
        assert_eq!(folder.key().to_string(), "folder-1");
        assert_eq!(file.key().as_file(), Some(FileId(1)));
        assert_eq!(file.key().as_folder(), None);
    }

    #[test]
    fn test_kind_from_row_text() {
        assert_eq!(
            EntityKind::try_from("file".to_string()).expect("kind"),
            EntityKind::File
        );
        assert!(EntityKind::try_from("link".to_string()).is_err());
    }
}

//! Flat entity listing across the folder and file tables.

use sqlx::{FromRow, SqlitePool};

use cabinet_core::error::{AppError, ErrorKind};
use cabinet_core::result::AppResult;
use cabinet_core::types::FolderId;
use cabinet_entity::entity::{Entity, EntityKind, FOLDER_ICON};
use cabinet_entity::file::DEFAULT_FILE_ICON;

#[derive(Debug, FromRow)]
struct EntityRow {
    kind: String,
    id: i64,
    name: String,
    parent_folder_id: Option<FolderId>,
    file_type: String,
    file_type_icon: String,
}

impl TryFrom<EntityRow> for Entity {
    type Error = AppError;

    fn try_from(row: EntityRow) -> Result<Self, Self::Error> {
        let kind = EntityKind::try_from(row.kind)
            .map_err(|e| AppError::with_source(ErrorKind::Database, e.to_string(), e))?;
        Ok(Entity {
            kind,
            id: row.id,
            name: row.name,
            parent_folder_id: row.parent_folder_id,
            file_type: row.file_type,
            file_type_icon: row.file_type_icon,
        })
    }
}

/// Repository producing the flat listing the tree builder consumes.
#[derive(Debug, Clone)]
pub struct EntityRepository {
    pool: SqlitePool,
}

impl EntityRepository {
    /// Create a new entity repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List folders first, then files, each in id order.
    pub async fn list(&self) -> AppResult<Vec<Entity>> {
        let rows = sqlx::query_as::<_, EntityRow>(
            "SELECT 'folder' AS kind, id, name, parent_folder_id, \
                    '' AS file_type, ? AS file_type_icon \
             FROM folders \
             UNION ALL \
             SELECT 'file' AS kind, f.id, f.name, f.folder_id AS parent_folder_id, \
                    COALESCE(t.file_type, '') AS file_type, \
                    COALESCE(t.icon, ?) AS file_type_icon \
             FROM files f LEFT JOIN file_types t ON t.id = f.file_type_id \
             ORDER BY kind DESC, id ASC",
        )
        .bind(FOLDER_ICON)
        .bind(DEFAULT_FILE_ICON)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list entities", e))?;

        rows.into_iter().map(Entity::try_from).collect()
    }
}

//! Repository implementations for cabinet tables.

pub mod entity;
pub mod file;
pub mod file_type;
pub mod folder;

pub use entity::EntityRepository;
pub use file::FileRepository;
pub use file_type::FileTypeRepository;
pub use folder::FolderRepository;

/// Whether a sqlx error is a UNIQUE constraint violation.
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}

/// Whether a sqlx error is a FOREIGN KEY constraint violation.
pub(crate) fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation())
}

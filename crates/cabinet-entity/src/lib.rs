//! # cabinet-entity
//!
//! Domain entity models for the file cabinet, and the [`EntityStore`]
//! query contract the tree engine consumes. Table rows derive
//! `sqlx::FromRow`; the flat [`Entity`] record is what the store hands to
//! the tree builder.

pub mod entity;
pub mod file;
pub mod folder;
pub mod store;

pub use entity::{Entity, EntityKey, EntityKind};
pub use file::{File, FileDownload, FileType, FileUpload};
pub use folder::Folder;
pub use store::EntityStore;

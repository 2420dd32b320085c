//! The flat entity record listed by the store.

pub mod model;

pub use model::{Entity, EntityKey, EntityKind, FOLDER_ICON, FOLDER_OPEN_ICON};

//! File type registry model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Icon assigned to every registered file type.
pub const DEFAULT_FILE_ICON: &str = "📄";

/// A registered file extension and its icon.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FileType {
    /// Row id.
    pub id: i64,
    /// The extension without the dot (may be empty).
    pub file_type: String,
    /// Icon shown in the tree.
    pub icon: String,
}

/// Extract the type of a file from its name: the text after the last `.`.
///
/// A name without a dot has type `""`.
pub fn file_type_of(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((_, ext)) => ext,
        None => "",
    }
}

//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use cabinet_core::error::AppError;
use cabinet_core::types::FolderId;

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("Name must not be empty".into()));
    }
    Ok(())
}

/// Query of `POST /api/entities/folders`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateFolderQuery {
    /// Folder name.
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    /// Parent folder; absent for a root folder.
    #[serde(rename = "parentId")]
    pub parent_id: Option<FolderId>,
}

/// Query of the rename endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RenameQuery {
    /// New name.
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub name: String,
}

/// Run `validator` checks, mapping failures to a validation error.
pub fn validated<T: Validate>(value: T) -> Result<T, AppError> {
    value
        .validate()
        .map_err(|e| AppError::validation(format!("Invalid request: {e}")))?;
    Ok(value)
}

//! HTTP request handlers.

pub mod entity;
pub mod file;
pub mod folder;
pub mod health;

use cabinet_core::error::AppError;

use crate::error::ApiError;

/// Fallback for unmatched routes.
pub async fn not_found() -> ApiError {
    AppError::not_found("Not found").into()
}

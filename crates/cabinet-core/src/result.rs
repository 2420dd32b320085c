//! Convenience result type alias for the file cabinet.

use crate::error::AppError;

/// A specialized `Result` type for cabinet operations.
pub type AppResult<T> = Result<T, AppError>;

//! Response DTOs.

use serde::{Deserialize, Serialize};

/// Acknowledges a rename.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OkResponse {
    /// Always `true`.
    pub ok: bool,
}

/// A file's description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DescriptionResponse {
    /// Description text.
    pub description: String,
}

/// A file's content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentResponse {
    /// Content text.
    pub content: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok` or `degraded`.
    pub status: String,
    /// Server version.
    pub version: String,
    /// `connected`, `unavailable` or `not_configured`.
    pub database: String,
}

//! Health check handler.

use axum::Json;
use axum::extract::State;

use crate::dto::response::HealthResponse;
use crate::state::AppState;

/// GET /api/health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = match &state.db_pool {
        Some(db) => match db.health_check().await {
            Ok(true) => "connected",
            Ok(false) | Err(_) => "unavailable",
        },
        None => "not_configured",
    };

    let status = if database == "unavailable" { "degraded" } else { "ok" };

    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: database.to_string(),
    })
}

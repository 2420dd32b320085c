//! Flat entity listing.

use axum::Json;
use axum::extract::State;

use cabinet_entity::Entity;

use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/entities
pub async fn list_entities(State(state): State<AppState>) -> Result<Json<Vec<Entity>>, ApiError> {
    let entities = state.store.list_entities().await?;
    Ok(Json(entities))
}

//! Folder handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use cabinet_core::types::FolderId;

use crate::dto::request::{CreateFolderQuery, RenameQuery, validated};
use crate::dto::response::OkResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/entities/folders?name=&parentId=
///
/// Returns the id of the new folder, or of the existing sibling with the
/// same name.
pub async fn create_folder(
    State(state): State<AppState>,
    Query(query): Query<CreateFolderQuery>,
) -> Result<Json<FolderId>, ApiError> {
    let query = validated(query)?;
    let id = state
        .store
        .create_folder(&query.name, query.parent_id)
        .await?;
    Ok(Json(id))
}

/// DELETE /api/entities/folders/{id}
pub async fn delete_folder(
    State(state): State<AppState>,
    Path(id): Path<FolderId>,
) -> Result<StatusCode, ApiError> {
    state.store.delete_folder(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/entities/folders/{id}?name=
pub async fn rename_folder(
    State(state): State<AppState>,
    Path(id): Path<FolderId>,
    Query(query): Query<RenameQuery>,
) -> Result<Json<OkResponse>, ApiError> {
    let query = validated(query)?;
    state.store.rename_folder(id, &query.name).await?;
    Ok(Json(OkResponse { ok: true }))
}

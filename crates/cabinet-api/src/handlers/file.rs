//! File upload, rename, delete, download and detail handlers.

use axum::Json;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;

use cabinet_core::error::AppError;
use cabinet_core::types::{FileId, FolderId};
use cabinet_entity::FileUpload;

use crate::dto::request::{RenameQuery, validated};
use crate::dto::response::{ContentResponse, DescriptionResponse, OkResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/entities/files (multipart: `file`, `description`, `folderId`)
///
/// Overwrites an existing file with the same name in the folder. Names
/// are stored exactly as sent.
pub async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<StatusCode, ApiError> {
    let mut file: Option<(String, String)> = None;
    let mut description = String::new();
    let mut folder_id: Option<FolderId> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
    {
        let field_name = field.name().unwrap_or("").to_string();
        match field_name.as_str() {
            "file" => {
                let name = field.file_name().unwrap_or("").to_string();
                let content = field
                    .text()
                    .await
                    .map_err(|e| AppError::validation(format!("Failed to read file: {e}")))?;
                file = Some((name, content));
            }
            "description" => {
                description = field
                    .text()
                    .await
                    .map_err(|e| AppError::validation(format!("Invalid description: {e}")))?;
            }
            "folderId" => {
                let raw = field
                    .text()
                    .await
                    .map_err(|e| AppError::validation(format!("Invalid folderId: {e}")))?;
                let id = raw
                    .parse::<FolderId>()
                    .map_err(|_| AppError::validation(format!("Invalid folderId '{raw}'")))?;
                folder_id = Some(id);
            }
            _ => {}
        }
    }

    let (name, content) = file.ok_or_else(|| AppError::validation("No file provided"))?;
    if name.trim().is_empty() {
        return Err(AppError::validation("File name must not be empty").into());
    }
    let folder_id = folder_id.ok_or_else(|| AppError::validation("No folderId provided"))?;

    let upload = FileUpload {
        name,
        description,
        folder_id,
        content,
    };
    state.store.upload_file(&upload).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/entities/files/{id}
pub async fn delete_file(
    State(state): State<AppState>,
    Path(id): Path<FileId>,
) -> Result<StatusCode, ApiError> {
    state.store.delete_file(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/entities/files/{id}?name=
pub async fn rename_file(
    State(state): State<AppState>,
    Path(id): Path<FileId>,
    Query(query): Query<RenameQuery>,
) -> Result<Json<OkResponse>, ApiError> {
    let query = validated(query)?;
    state.store.rename_file(id, &query.name).await?;
    Ok(Json(OkResponse { ok: true }))
}

/// GET /api/entities/files/{id}
///
/// Streams the content back as a `text/plain` attachment.
pub async fn download_file(
    State(state): State<AppState>,
    Path(id): Path<FileId>,
) -> Result<impl IntoResponse, ApiError> {
    let download = state.store.download_file(id).await?;
    let disposition = format!(
        "attachment; filename=\"{}\"",
        download.name.replace(['"', '\\'], "_")
    );

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        download.content,
    ))
}

/// GET /api/entities/files/descriptions/{id}
pub async fn file_description(
    State(state): State<AppState>,
    Path(id): Path<FileId>,
) -> Result<Json<DescriptionResponse>, ApiError> {
    let description = state.store.file_description(id).await?;
    Ok(Json(DescriptionResponse { description }))
}

/// GET /api/entities/files/contents/{id}
pub async fn file_content(
    State(state): State<AppState>,
    Path(id): Path<FileId>,
) -> Result<Json<ContentResponse>, ApiError> {
    let content = state.store.file_content(id).await?;
    Ok(Json(ContentResponse { content }))
}

//! Route definitions for the cabinet API.

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, header};
use axum::middleware as axum_middleware;
use axum::routing::{get, patch, post};
use tower_http::compression::CompressionLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::cors::build_cors_layer;
use crate::middleware::logging::request_logging;
use crate::state::AppState;

/// Build the complete application router.
pub fn build_router(state: AppState) -> Router {
    let entity_routes = Router::new()
        .route("/", get(handlers::entity::list_entities))
        .route("/folders", post(handlers::folder::create_folder))
        .route(
            "/folders/{id}",
            patch(handlers::folder::rename_folder).delete(handlers::folder::delete_folder),
        )
        .route("/files", post(handlers::file::upload_file))
        .route(
            "/files/{id}",
            get(handlers::file::download_file)
                .patch(handlers::file::rename_file)
                .delete(handlers::file::delete_file),
        )
        .route(
            "/files/descriptions/{id}",
            get(handlers::file::file_description),
        )
        .route("/files/contents/{id}", get(handlers::file::file_content));

    let api_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .nest("/entities", entity_routes);

    let cors = build_cors_layer(&state.config.server.cors);
    let body_limit = state.config.server.max_upload_bytes;

    Router::new()
        .nest("/api", api_routes)
        .fallback(handlers::not_found)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(request_logging))
        .with_state(state)
}

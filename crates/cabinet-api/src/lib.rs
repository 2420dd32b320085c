//! # cabinet-api
//!
//! HTTP API for the file cabinet built on Axum.
//!
//! Exposes the entity store under `/api/entities`, a health check, JSON
//! error mapping and the middleware stack (CORS, request logging, tracing,
//! compression, `Cache-Control: no-store`).

pub mod app;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::ApiError;
pub use state::AppState;

//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use cabinet_api::{AppState, build_app};
use cabinet_core::config::{AppConfig, DatabaseConfig};
use cabinet_core::types::FolderId;
use cabinet_database::seed::seed_demo_project;
use cabinet_database::{DatabasePool, SqliteEntityStore};
use cabinet_entity::EntityStore;

const BOUNDARY: &str = "cabinet-test-boundary";

/// Test application over a private in-memory SQLite database.
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// The store behind the router
    pub store: Arc<dyn EntityStore>,
    /// Database pool for direct queries
    pub db: DatabasePool,
}

impl TestApp {
    /// Create an empty test application
    pub async fn new() -> Self {
        let db = DatabasePool::connect_and_migrate(&DatabaseConfig::in_memory())
            .await
            .expect("Failed to open in-memory database");
        let store: Arc<dyn EntityStore> = Arc::new(SqliteEntityStore::new(db.pool().clone()));

        let state = AppState::new(AppConfig::default(), Arc::clone(&store)).with_database(db.clone());
        let router = build_app(state);

        Self { router, store, db }
    }

    /// Create a test application holding the demo project
    pub async fn seeded() -> (Self, FolderId) {
        let app = Self::new().await;
        let root = seed_demo_project(app.store.as_ref())
            .await
            .expect("Failed to seed demo project");
        (app, root)
    }

    /// Make a body-less HTTP request to the test app
    pub async fn request(&self, method: &str, path: &str) -> TestResponse {
        let req = Request::builder()
            .method(method)
            .uri(path)
            .body(Body::empty())
            .expect("Failed to build request");
        self.send(req).await
    }

    /// Upload a text file through the multipart endpoint
    pub async fn upload(
        &self,
        folder: FolderId,
        name: &str,
        description: &str,
        content: &str,
    ) -> TestResponse {
        let body = format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"{name}\"\r\n\
             Content-Type: text/plain\r\n\r\n\
             {content}\r\n\
             --{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"description\"\r\n\r\n\
             {description}\r\n\
             --{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"folderId\"\r\n\r\n\
             {folder}\r\n\
             --{BOUNDARY}--\r\n"
        );

        let req = Request::builder()
            .method("POST")
            .uri("/api/entities/files")
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .expect("Failed to build request");
        self.send(req).await
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let text = String::from_utf8_lossy(&body_bytes).into_owned();
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            text,
            body,
        }
    }

    /// Serve the app on an ephemeral local port and return its base URL
    pub async fn spawn(&self) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("No local address");
        let router = self.router.clone();
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Test server failed");
        });
        format!("http://{addr}")
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Raw body text
    pub text: String,
    /// Parsed JSON body, `Null` when the body is not JSON
    pub body: Value,
}

impl TestResponse {
    /// A header value as text
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

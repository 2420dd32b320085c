//! [`EntityStore`] client for the cabinet HTTP API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use cabinet_core::error::{AppError, ErrorKind};
use cabinet_core::result::AppResult;
use cabinet_core::types::{FileId, FolderId};
use cabinet_entity::entity::Entity;
use cabinet_entity::file::{FileDownload, FileUpload};
use cabinet_entity::store::EntityStore;

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Debug, Deserialize)]
struct DescriptionBody {
    description: String,
}

#[derive(Debug, Deserialize)]
struct ContentBody {
    content: String,
}

/// Talks to a running `cabinet-server`.
#[derive(Debug, Clone)]
pub struct HttpEntityStore {
    client: Client,
    base_url: Url,
}

impl HttpEntityStore {
    /// Create a client for the API at `base_url` (e.g. `http://127.0.0.1:8080`).
    pub fn new(base_url: &str) -> AppResult<Self> {
        let base_url = Url::parse(base_url).map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                format!("Invalid API base URL '{base_url}'"),
                e,
            )
        })?;
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Internal, "Failed to build HTTP client", e)
            })?;
        Ok(Self { client, base_url })
    }

    fn url(&self, path: &str, query: &[(&str, String)]) -> AppResult<Url> {
        let mut url = self.base_url.join(path).map_err(|e| {
            AppError::with_source(ErrorKind::Internal, format!("Invalid API path '{path}'"), e)
        })?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    fn request(&self, method: Method, path: &str, query: &[(&str, String)]) -> AppResult<RequestBuilder> {
        Ok(self.client.request(method, self.url(path, query)?))
    }

    async fn send(&self, request: RequestBuilder) -> AppResult<Response> {
        let response = request.send().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::ExternalService,
                format!("Cabinet API unreachable: {e}"),
                e,
            )
        })?;
        let status = response.status();
        debug!(url = %response.url(), status = status.as_u16(), "Cabinet API response");
        if status.is_success() {
            return Ok(response);
        }

        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.message,
            Err(_) => format!("Cabinet API answered {status}"),
        };
        Err(error_for_status(status, message))
    }

    async fn json<T: DeserializeOwned>(&self, request: RequestBuilder) -> AppResult<T> {
        self.send(request).await?.json::<T>().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Serialization,
                format!("Unexpected response from cabinet API: {e}"),
                e,
            )
        })
    }
}

fn error_for_status(status: StatusCode, message: String) -> AppError {
    match status {
        StatusCode::CONFLICT => AppError::conflict(message),
        StatusCode::BAD_REQUEST => AppError::validation(message),
        StatusCode::NOT_FOUND => AppError::not_found(message),
        _ => AppError::external_service(message),
    }
}

#[async_trait]
impl EntityStore for HttpEntityStore {
    async fn list_entities(&self) -> AppResult<Vec<Entity>> {
        self.json(self.request(Method::GET, "/api/entities", &[])?).await
    }

    async fn create_folder(&self, name: &str, parent: Option<FolderId>) -> AppResult<FolderId> {
        let mut query = vec![("name", name.to_string())];
        if let Some(parent) = parent {
            query.push(("parentId", parent.to_string()));
        }
        self.json(self.request(Method::POST, "/api/entities/folders", &query)?)
            .await
    }

    async fn delete_folder(&self, id: FolderId) -> AppResult<()> {
        let path = format!("/api/entities/folders/{id}");
        self.send(self.request(Method::DELETE, &path, &[])?).await?;
        Ok(())
    }

    async fn rename_folder(&self, id: FolderId, new_name: &str) -> AppResult<()> {
        let path = format!("/api/entities/folders/{id}");
        let query = [("name", new_name.to_string())];
        self.send(self.request(Method::PATCH, &path, &query)?).await?;
        Ok(())
    }

    async fn upload_file(&self, upload: &FileUpload) -> AppResult<()> {
        let part = reqwest::multipart::Part::text(upload.content.clone())
            .file_name(upload.name.clone())
            .mime_str("text/plain")
            .map_err(|e| {
                AppError::with_source(ErrorKind::Internal, "Failed to build upload part", e)
            })?;
        let form = reqwest::multipart::Form::new()
            .text("description", upload.description.clone())
            .text("folderId", upload.folder_id.to_string())
            .part("file", part);

        let request = self
            .request(Method::POST, "/api/entities/files", &[])?
            .multipart(form);
        self.send(request).await?;
        Ok(())
    }

    async fn delete_file(&self, id: FileId) -> AppResult<()> {
        let path = format!("/api/entities/files/{id}");
        self.send(self.request(Method::DELETE, &path, &[])?).await?;
        Ok(())
    }

    async fn rename_file(&self, id: FileId, new_name: &str) -> AppResult<()> {
        let path = format!("/api/entities/files/{id}");
        let query = [("name", new_name.to_string())];
        self.send(self.request(Method::PATCH, &path, &query)?).await?;
        Ok(())
    }

    async fn file_description(&self, id: FileId) -> AppResult<String> {
        let path = format!("/api/entities/files/descriptions/{id}");
        let body: DescriptionBody = self.json(self.request(Method::GET, &path, &[])?).await?;
        Ok(body.description)
    }

    async fn file_content(&self, id: FileId) -> AppResult<String> {
        let path = format!("/api/entities/files/contents/{id}");
        let body: ContentBody = self.json(self.request(Method::GET, &path, &[])?).await?;
        Ok(body.content)
    }

    async fn download_file(&self, id: FileId) -> AppResult<FileDownload> {
        let path = format!("/api/entities/files/{id}");
        let response = self.send(self.request(Method::GET, &path, &[])?).await?;
        let name = response
            .headers()
            .get(reqwest::header::CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(attachment_file_name)
            .unwrap_or_default();
        let content = response.text().await.map_err(|e| {
            AppError::with_source(ErrorKind::ExternalService, "Failed to read download", e)
        })?;
        Ok(FileDownload { name, content })
    }
}

/// Extract the file name from a `Content-Disposition: attachment` header.
fn attachment_file_name(header: &str) -> Option<String> {
    let (_, rest) = header.split_once("filename=")?;
    let name = rest.split(';').next()?.trim().trim_matches('"');
    Some(name.to_string())
}

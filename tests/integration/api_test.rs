//! Integration tests for the cabinet HTTP API.

mod helpers;

use axum::http::StatusCode;
use serde_json::Value;

use helpers::TestApp;

async fn entity_id(app: &TestApp, kind: &str, name: &str) -> i64 {
    let response = app.request("GET", "/api/entities").await;
    response
        .body
        .as_array()
        .expect("entity list")
        .iter()
        .find(|e| e["type"] == kind && e["name"] == name)
        .and_then(|e| e["id"].as_i64())
        .unwrap_or_else(|| panic!("no {kind} named {name}"))
}

#[tokio::test]
async fn test_health_reports_database() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/health").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["database"], "connected");
    assert_eq!(response.header("cache-control"), Some("no-store"));
}

#[tokio::test]
async fn test_unknown_route_is_json_not_found() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/nothing-here").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "NOT_FOUND");
    assert_eq!(response.body["message"], "Not found");
}

#[tokio::test]
async fn test_list_entities_folders_first() {
    let (app, _root) = TestApp::seeded().await;

    let response = app.request("GET", "/api/entities").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.header("cache-control"), Some("no-store"));
    let entities = response.body.as_array().expect("entity list");
    assert_eq!(entities.len(), 7);

    let kinds: Vec<&str> = entities.iter().filter_map(|e| e["type"].as_str()).collect();
    assert_eq!(
        kinds,
        vec!["folder", "folder", "folder", "folder", "file", "file", "file"]
    );
    assert_eq!(entities[0]["name"], "Project_1");
    assert_eq!(entities[0]["parentFolderId"], Value::Null);

    let app_xaml = entities
        .iter()
        .find(|e| e["name"] == "App.xaml")
        .expect("App.xaml listed");
    assert_eq!(app_xaml["fileType"], "xaml");
    assert_eq!(app_xaml["parentFolderId"], entities[0]["id"]);
}

#[tokio::test]
async fn test_create_folder_returns_existing_sibling() {
    let (app, root) = TestApp::seeded().await;

    let created = app
        .request("POST", &format!("/api/entities/folders?name=Docs&parentId={root}"))
        .await;
    assert_eq!(created.status, StatusCode::OK);
    let id = created.body.as_i64().expect("folder id");

    let again = app
        .request("POST", &format!("/api/entities/folders?name=Docs&parentId={root}"))
        .await;
    assert_eq!(again.body.as_i64(), Some(id));

    let root_level = app.request("POST", "/api/entities/folders?name=Archive").await;
    assert_eq!(root_level.status, StatusCode::OK);
    assert_ne!(root_level.body.as_i64(), Some(id));
}

#[tokio::test]
async fn test_blank_names_are_rejected() {
    let (app, _root) = TestApp::seeded().await;
    let bin = entity_id(&app, "folder", "bin").await;

    let create = app.request("POST", "/api/entities/folders?name=%20%20").await;
    assert_eq!(create.status, StatusCode::BAD_REQUEST);
    assert_eq!(create.body["error"], "VALIDATION");

    let rename = app
        .request("PATCH", &format!("/api/entities/folders/{bin}?name="))
        .await;
    assert_eq!(rename.status, StatusCode::BAD_REQUEST);

    let missing = app.request("PATCH", &format!("/api/entities/folders/{bin}")).await;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_rename_folder_conflict_is_409() {
    let (app, _root) = TestApp::seeded().await;
    let bin = entity_id(&app, "folder", "bin").await;

    let response = app
        .request("PATCH", &format!("/api/entities/folders/{bin}?name=Resources"))
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["error"], "CONFLICT");
    assert!(
        response.body["message"]
            .as_str()
            .unwrap_or_default()
            .contains("already exists")
    );
    assert_eq!(entity_id(&app, "folder", "bin").await, bin);
}

#[tokio::test]
async fn test_rename_folder() {
    let (app, _root) = TestApp::seeded().await;
    let bin = entity_id(&app, "folder", "bin").await;

    let response = app
        .request("PATCH", &format!("/api/entities/folders/{bin}?name=Output"))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["ok"], true);
    assert_eq!(entity_id(&app, "folder", "Output").await, bin);
}

#[tokio::test]
async fn test_rename_missing_entity_is_404() {
    let app = TestApp::new().await;

    let folder = app.request("PATCH", "/api/entities/folders/999?name=x").await;
    assert_eq!(folder.status, StatusCode::NOT_FOUND);

    let file = app.request("PATCH", "/api/entities/files/999?name=x.txt").await;
    assert_eq!(file.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_upload_then_read_back() {
    let (app, root) = TestApp::seeded().await;

    let upload = app.upload(root, "notes.txt", "Meeting notes", "line one\nline two").await;
    assert_eq!(upload.status, StatusCode::NO_CONTENT);

    let id = entity_id(&app, "file", "notes.txt").await;

    let description = app
        .request("GET", &format!("/api/entities/files/descriptions/{id}"))
        .await;
    assert_eq!(description.body["description"], "Meeting notes");

    let content = app
        .request("GET", &format!("/api/entities/files/contents/{id}"))
        .await;
    assert_eq!(content.body["content"], "line one\nline two");

    let download = app.request("GET", &format!("/api/entities/files/{id}")).await;
    assert_eq!(download.status, StatusCode::OK);
    assert_eq!(
        download.header("content-disposition"),
        Some("attachment; filename=\"notes.txt\"")
    );
    assert!(
        download
            .header("content-type")
            .unwrap_or_default()
            .starts_with("text/plain")
    );
    assert_eq!(download.text, "line one\nline two");
}

#[tokio::test]
async fn test_upload_overwrites_same_name() {
    let (app, root) = TestApp::seeded().await;
    let before = entity_id(&app, "file", "App.xaml").await;

    let upload = app.upload(root, "App.xaml", "Replaced", "new body").await;
    assert_eq!(upload.status, StatusCode::NO_CONTENT);

    let listing = app.request("GET", "/api/entities").await;
    assert_eq!(listing.body.as_array().map(Vec::len), Some(7));
    assert_eq!(entity_id(&app, "file", "App.xaml").await, before);

    let content = app
        .request("GET", &format!("/api/entities/files/contents/{before}"))
        .await;
    assert_eq!(content.body["content"], "new body");
}

#[tokio::test]
async fn test_names_are_stored_verbatim() {
    let (app, root) = TestApp::seeded().await;

    let upload = app.upload(root, " App.xaml", "Padded", "padded body").await;
    assert_eq!(upload.status, StatusCode::NO_CONTENT);

    let original = entity_id(&app, "file", "App.xaml").await;
    let padded = entity_id(&app, "file", " App.xaml").await;
    assert_ne!(original, padded);

    let content = app
        .request("GET", &format!("/api/entities/files/contents/{original}"))
        .await;
    assert_ne!(content.body["content"], "padded body");

    let folder = app
        .request("POST", &format!("/api/entities/folders?name=%20bin&parentId={root}"))
        .await;
    assert_eq!(folder.status, StatusCode::OK);
    assert_eq!(folder.body.as_i64(), Some(entity_id(&app, "folder", " bin").await));
    assert_ne!(folder.body.as_i64(), Some(entity_id(&app, "folder", "bin").await));
}

#[tokio::test]
async fn test_upload_into_missing_folder_is_404() {
    let app = TestApp::new().await;

    let upload = app
        .upload(cabinet_core::types::FolderId(42), "a.txt", "", "x")
        .await;

    assert_eq!(upload.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_rename_file_updates_type_and_detects_conflict() {
    let (app, _root) = TestApp::seeded().await;
    let app_xaml = entity_id(&app, "file", "App.xaml").await;

    let conflict = app
        .request("PATCH", &format!("/api/entities/files/{app_xaml}?name=MainWindow.cs"))
        .await;
    assert_eq!(conflict.status, StatusCode::CONFLICT);

    let renamed = app
        .request("PATCH", &format!("/api/entities/files/{app_xaml}?name=App.txt"))
        .await;
    assert_eq!(renamed.status, StatusCode::OK);

    let listing = app.request("GET", "/api/entities").await;
    let entry = listing
        .body
        .as_array()
        .and_then(|all| all.iter().find(|e| e["name"] == "App.txt").cloned())
        .expect("renamed file listed");
    assert_eq!(entry["id"].as_i64(), Some(app_xaml));
    assert_eq!(entry["fileType"], "txt");
}

#[tokio::test]
async fn test_delete_folder_cascades() {
    let (app, root) = TestApp::seeded().await;
    let app_xaml = entity_id(&app, "file", "App.xaml").await;

    let response = app
        .request("DELETE", &format!("/api/entities/folders/{root}"))
        .await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let listing = app.request("GET", "/api/entities").await;
    assert_eq!(listing.body.as_array().map(Vec::len), Some(0));

    let gone = app
        .request("GET", &format!("/api/entities/files/descriptions/{app_xaml}"))
        .await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_file() {
    let (app, _root) = TestApp::seeded().await;
    let cs = entity_id(&app, "file", "MainWindow.cs").await;

    let response = app.request("DELETE", &format!("/api/entities/files/{cs}")).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let again = app.request("DELETE", &format!("/api/entities/files/{cs}")).await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}

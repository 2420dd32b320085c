//! End-to-end tests: the tree engine driving a live cabinet server through
//! the HTTP entity store.

mod helpers;

use std::sync::Arc;

use cabinet_core::config::UiConfig;
use cabinet_core::error::ErrorKind;
use cabinet_core::types::{FileId, FolderId};
use cabinet_engine::{Cabinet, HttpEntityStore, NewFile, UploadOutcome};
use cabinet_entity::{EntityKey, EntityStore};

use helpers::TestApp;

async fn connect(app: &TestApp) -> (Arc<HttpEntityStore>, Cabinet) {
    let base_url = app.spawn().await;
    let store = Arc::new(HttpEntityStore::new(&base_url).expect("client"));
    let cabinet = Cabinet::new(store.clone(), &UiConfig::default());
    cabinet.update_state().await.expect("initial load");
    (store, cabinet)
}

async fn folder_named(cabinet: &Cabinet, name: &str) -> FolderId {
    let workspace = cabinet.workspace().await;
    workspace
        .tree()
        .iter()
        .find(|n| n.is_folder() && n.name() == name)
        .map(|n| FolderId(n.entity.id))
        .unwrap_or_else(|| panic!("no folder named {name}"))
}

async fn file_named(cabinet: &Cabinet, name: &str) -> FileId {
    let workspace = cabinet.workspace().await;
    workspace
        .tree()
        .iter()
        .find(|n| !n.is_folder() && n.name() == name)
        .map(|n| FileId(n.entity.id))
        .unwrap_or_else(|| panic!("no file named {name}"))
}

fn new_file(name: &str, content: &str) -> NewFile {
    NewFile {
        name: name.to_string(),
        description: format!("About {name}"),
        content: content.to_string(),
    }
}

#[tokio::test]
async fn test_http_store_lists_seeded_project() {
    let (app, root) = TestApp::seeded().await;
    let (store, cabinet) = connect(&app).await;

    let entities = store.list_entities().await.expect("list");
    assert_eq!(entities.len(), 7);

    let workspace = cabinet.workspace().await;
    assert_eq!(workspace.tree().roots().len(), 1);
    assert_eq!(workspace.tree().roots()[0].entity.id, root.get());
    assert_eq!(workspace.cards().len(), 7);
}

#[tokio::test]
async fn test_http_store_maps_error_statuses() {
    let (app, _root) = TestApp::seeded().await;
    let (store, cabinet) = connect(&app).await;
    let bin = folder_named(&cabinet, "bin").await;

    let conflict = store.rename_folder(bin, "Resources").await.unwrap_err();
    assert_eq!(conflict.kind, ErrorKind::Conflict);
    assert!(conflict.message.contains("already exists"));

    let missing = store.file_description(FileId(999)).await.unwrap_err();
    assert_eq!(missing.kind, ErrorKind::NotFound);

    let blank = store.create_folder("   ", None).await.unwrap_err();
    assert_eq!(blank.kind, ErrorKind::Validation);
}

#[tokio::test]
async fn test_upload_asks_before_overwriting() {
    let app = TestApp::new().await;
    let (store, cabinet) = connect(&app).await;

    let docs = cabinet
        .create_folder("Docs", || true)
        .await
        .expect("create Docs")
        .expect("root creation confirmed");
    cabinet.click_folder(docs).await.expect("select Docs");
    let first = cabinet
        .upload(new_file("a.txt", "first"), |_, _| panic!("no prompt for a new file"))
        .await
        .expect("upload");
    assert_eq!(first, UploadOutcome::Uploaded);

    cabinet.click_folder(docs).await.expect("select Docs");
    let mut asked = None;
    let declined = cabinet
        .upload(new_file("a.txt", "second"), |folder, file| {
            asked = Some((folder.to_string(), file.to_string()));
            false
        })
        .await
        .expect("upload");
    assert_eq!(declined, UploadOutcome::Cancelled);
    assert_eq!(asked, Some(("Docs".to_string(), "a.txt".to_string())));

    let a = file_named(&cabinet, "a.txt").await;
    assert_eq!(store.file_content(a).await.expect("content"), "first");

    cabinet.click_folder(docs).await.expect("select Docs");
    let accepted = cabinet
        .upload(new_file("a.txt", "second"), |_, _| true)
        .await
        .expect("upload");
    assert_eq!(accepted, UploadOutcome::Uploaded);
    assert_eq!(store.file_content(a).await.expect("content"), "second");

    let workspace = cabinet.workspace().await;
    let card = workspace.cards().get(EntityKey::file(a)).expect("card");
    assert_eq!(card.content, "second");
}

#[tokio::test]
async fn test_padded_upload_name_is_a_separate_file() {
    let app = TestApp::new().await;
    let (store, cabinet) = connect(&app).await;

    let docs = cabinet
        .create_folder("Docs", || true)
        .await
        .expect("create Docs")
        .expect("root creation confirmed");
    cabinet.click_folder(docs).await.expect("select Docs");
    cabinet
        .upload(new_file("a.txt", "first"), |_, _| true)
        .await
        .expect("upload");

    cabinet.click_folder(docs).await.expect("select Docs");
    let outcome = cabinet
        .upload(new_file(" a.txt", "second"), |_, _| {
            panic!("a differently named file needs no overwrite prompt")
        })
        .await
        .expect("upload");
    assert_eq!(outcome, UploadOutcome::Uploaded);

    let a = file_named(&cabinet, "a.txt").await;
    let padded = file_named(&cabinet, " a.txt").await;
    assert_ne!(a, padded);
    assert_eq!(store.file_content(a).await.expect("content"), "first");
    assert_eq!(store.file_content(padded).await.expect("content"), "second");
}

#[tokio::test]
async fn test_root_folder_creation_can_be_declined() {
    let app = TestApp::new().await;
    let (store, cabinet) = connect(&app).await;

    let mut asked = false;
    let created = cabinet
        .create_folder("Docs", || {
            asked = true;
            false
        })
        .await
        .expect("create");

    assert!(asked);
    assert_eq!(created, None);
    assert!(store.list_entities().await.expect("list").is_empty());
}

#[tokio::test]
async fn test_blank_rename_keeps_everything() {
    let (app, _root) = TestApp::seeded().await;
    let (store, cabinet) = connect(&app).await;
    let app_xaml = file_named(&cabinet, "App.xaml").await;
    cabinet.click_file(app_xaml).await.expect("open");

    let err = cabinet.rename("  ").await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::EmptyInput);
    let names: Vec<String> = store
        .list_entities()
        .await
        .expect("list")
        .into_iter()
        .map(|e| e.name)
        .collect();
    assert!(names.contains(&"App.xaml".to_string()));
    assert_eq!(cabinet.workspace().await.tabs().len(), 1);
}

#[tokio::test]
async fn test_conflicting_rename_is_reported() {
    let (app, _root) = TestApp::seeded().await;
    let (_store, cabinet) = connect(&app).await;
    let bin = folder_named(&cabinet, "bin").await;
    cabinet.click_folder(bin).await.expect("select bin");

    let err = cabinet.rename("Resources").await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::Conflict);
    let workspace = cabinet.workspace().await;
    assert_eq!(
        workspace.tree().find(EntityKey::folder(bin)).map(|n| n.name()),
        Some("bin")
    );
    assert_eq!(workspace.selection().active_folder.get(), Some(bin));
}

#[tokio::test]
async fn test_rename_file_reloads_its_card() {
    let (app, _root) = TestApp::seeded().await;
    let (_store, cabinet) = connect(&app).await;
    let cs = file_named(&cabinet, "MainWindow.cs").await;
    cabinet.click_file(cs).await.expect("open");

    cabinet.rename("Program.cs").await.expect("rename");

    let workspace = cabinet.workspace().await;
    let card = workspace.cards().get(EntityKey::file(cs)).expect("card reloaded");
    assert_eq!(card.name, "Program.cs");
    assert!(!card.is_shown());
}

#[tokio::test]
async fn test_delete_folder_with_open_file() {
    let (app, root) = TestApp::seeded().await;
    let (store, cabinet) = connect(&app).await;
    let app_xaml = file_named(&cabinet, "App.xaml").await;
    cabinet.click_file(app_xaml).await.expect("open");
    cabinet.click_folder(root).await.expect("select root");

    cabinet.delete_folder().await.expect("delete");

    assert!(store.list_entities().await.expect("list").is_empty());
    let workspace = cabinet.workspace().await;
    assert!(workspace.tree().is_empty());
    assert!(workspace.tabs().is_empty());
    assert_eq!(workspace.open_content(), None);
}

#[tokio::test]
async fn test_download_active_file() {
    let (app, _root) = TestApp::seeded().await;
    let (_store, cabinet) = connect(&app).await;
    let main_window = file_named(&cabinet, "MainWindow.xaml").await;
    cabinet.click_file(main_window).await.expect("open");

    let download = cabinet.download().await.expect("download");

    assert_eq!(download.name, "MainWindow.xaml");
    assert!(download.content.starts_with("Content of MainWindow.xaml "));
}

//! Demo project seeded on start-up.

use tracing::info;

use cabinet_core::result::AppResult;
use cabinet_core::types::FolderId;
use cabinet_entity::file::FileUpload;
use cabinet_entity::store::EntityStore;

/// Name of the seeded root folder.
pub const DEMO_ROOT_FOLDER: &str = "Project_1";

fn repeated(name: &str, per_line: usize, lines: usize) -> String {
    format!("{}\n", format!("Content of {name} ").repeat(per_line)).repeat(lines)
}

/// Seed the demo project into any store.
///
/// Safe to run on every start: folders are created conflict-tolerantly and
/// uploads overwrite the same-named files.
pub async fn seed_demo_project(store: &dyn EntityStore) -> AppResult<FolderId> {
    let root = store.create_folder(DEMO_ROOT_FOLDER, None).await?;
    let bin = store.create_folder("bin", Some(root)).await?;
    store.create_folder("Resources", Some(root)).await?;
    store.create_folder("Debug", Some(bin)).await?;

    let files = [
        (
            "App.xaml",
            "The file in which application resources are declared",
            repeated("App.xaml", 10, 30),
        ),
        (
            "MainWindow.xaml",
            "The file that defines the interface of the main application window",
            repeated("MainWindow.xaml", 5, 20),
        ),
        (
            "MainWindow.cs",
            "Interaction logic for MainWindow.xaml",
            repeated("MainWindow.cs", 5, 40),
        ),
    ];

    for (name, description, content) in files {
        store
            .upload_file(&FileUpload {
                name: name.to_string(),
                description: description.to_string(),
                folder_id: root,
                content,
            })
            .await?;
    }

    info!(root_folder_id = %root, "Demo project seeded");
    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryEntityStore;

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let store = MemoryEntityStore::new();
        let first = seed_demo_project(&store).await.unwrap();
        let count = store.list_entities().await.unwrap().len();
        assert_eq!(count, 7);

        let second = seed_demo_project(&store).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(store.list_entities().await.unwrap().len(), count);
    }

    #[tokio::test]
    async fn test_seed_content_shape() {
        let store = MemoryEntityStore::new();
        let root = seed_demo_project(&store).await.unwrap();
        assert_eq!(store.file_count(root).await, 3);

        let content = repeated("App.xaml", 10, 30);
        assert_eq!(content.lines().count(), 30);
        assert!(content.starts_with("Content of App.xaml Content of App.xaml "));
    }
}

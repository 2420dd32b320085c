//! In-process [`EntityStore`] used by tests and embedders.
//!
//! Mirrors the SQLite store's invariants: parents must exist, sibling names
//! are unique, folder deletion cascades, uploads overwrite same-named files.
//! Per-call counters let callers assert how often file data was fetched.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::info;

use cabinet_core::error::AppError;
use cabinet_core::result::AppResult;
use cabinet_core::types::{FileId, FolderId};
use cabinet_entity::entity::Entity;
use cabinet_entity::file::{DEFAULT_FILE_ICON, File, FileDownload, FileType, FileUpload, file_type_of};
use cabinet_entity::folder::Folder;
use cabinet_entity::store::EntityStore;

#[derive(Debug, Default)]
struct Tables {
    folders: BTreeMap<FolderId, Folder>,
    files: BTreeMap<FileId, File>,
    file_types: Vec<FileType>,
    last_folder_id: i64,
    last_file_id: i64,
}

impl Tables {
    fn folder_exists(&self, id: FolderId) -> bool {
        self.folders.contains_key(&id)
    }

    fn sibling_folder(&self, name: &str, parent: Option<FolderId>) -> Option<FolderId> {
        self.folders
            .values()
            .find(|f| f.name == name && f.parent_folder_id == parent)
            .map(|f| f.id)
    }

    fn sibling_file(&self, name: &str, folder: FolderId) -> Option<FileId> {
        self.files
            .values()
            .find(|f| f.name == name && f.folder_id == folder)
            .map(|f| f.id)
    }

    fn register_file_type(&mut self, name: &str) -> i64 {
        let ext = file_type_of(name);
        if let Some(existing) = self.file_types.iter().find(|t| t.file_type == ext) {
            return existing.id;
        }
        let id = self.file_types.len() as i64 + 1;
        self.file_types.push(FileType {
            id,
            file_type: ext.to_string(),
            icon: DEFAULT_FILE_ICON.to_string(),
        });
        id
    }

    fn file_type(&self, id: i64) -> Option<&FileType> {
        self.file_types.iter().find(|t| t.id == id)
    }

    /// The folder and every folder below it.
    fn subtree(&self, root: FolderId) -> Vec<FolderId> {
        let mut found = vec![root];
        let mut cursor = 0;
        while cursor < found.len() {
            let current = found[cursor];
            found.extend(
                self.folders
                    .values()
                    .filter(|f| f.parent_folder_id == Some(current))
                    .map(|f| f.id),
            );
            cursor += 1;
        }
        found
    }

    fn file(&self, id: FileId) -> AppResult<&File> {
        self.files
            .get(&id)
            .ok_or_else(|| AppError::not_found(format!("File {id} not found")))
    }
}

/// Entity store kept entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryEntityStore {
    tables: RwLock<Tables>,
    list_calls: AtomicUsize,
    description_fetches: AtomicUsize,
    content_fetches: AtomicUsize,
}

impl MemoryEntityStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `list_entities` calls served.
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Number of `file_description` calls served.
    pub fn description_fetches(&self) -> usize {
        self.description_fetches.load(Ordering::SeqCst)
    }

    /// Number of `file_content` calls served.
    pub fn content_fetches(&self) -> usize {
        self.content_fetches.load(Ordering::SeqCst)
    }

    /// Number of files directly in a folder.
    pub async fn file_count(&self, folder: FolderId) -> usize {
        self.tables
            .read()
            .await
            .files
            .values()
            .filter(|f| f.folder_id == folder)
            .count()
    }
}

#[async_trait]
impl EntityStore for MemoryEntityStore {
    async fn list_entities(&self) -> AppResult<Vec<Entity>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let tables = self.tables.read().await;

        let mut entities: Vec<Entity> = tables.folders.values().map(Entity::from).collect();
        entities.extend(tables.files.values().map(|file| {
            let (file_type, icon) = tables
                .file_type(file.file_type_id)
                .map(|t| (t.file_type.clone(), t.icon.clone()))
                .unwrap_or_else(|| (String::new(), DEFAULT_FILE_ICON.to_string()));
            Entity::file(file.id, file.name.clone(), file.folder_id, file_type, icon)
        }));
        Ok(entities)
    }

    async fn create_folder(&self, name: &str, parent: Option<FolderId>) -> AppResult<FolderId> {
        let mut tables = self.tables.write().await;
        if let Some(missing) = parent.filter(|p| !tables.folder_exists(*p)) {
            return Err(AppError::not_found(format!("Parent folder {missing} not found")));
        }
        if let Some(existing) = tables.sibling_folder(name, parent) {
            return Ok(existing);
        }

        tables.last_folder_id += 1;
        let id = FolderId(tables.last_folder_id);
        let now = Utc::now();
        tables.folders.insert(
            id,
            Folder {
                id,
                name: name.to_string(),
                parent_folder_id: parent,
                created_at: now,
                updated_at: now,
            },
        );
        info!(folder_id = %id, name = %name, "Folder created");
        Ok(id)
    }

    async fn delete_folder(&self, id: FolderId) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        if !tables.folder_exists(id) {
            return Err(AppError::not_found(format!("Folder {id} not found")));
        }
        let doomed = tables.subtree(id);
        tables.files.retain(|_, f| !doomed.contains(&f.folder_id));
        tables.folders.retain(|fid, _| !doomed.contains(fid));
        info!(folder_id = %id, removed_folders = doomed.len(), "Folder deleted");
        Ok(())
    }

    async fn rename_folder(&self, id: FolderId, new_name: &str) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        let parent = tables
            .folders
            .get(&id)
            .map(|f| f.parent_folder_id)
            .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))?;
        if tables
            .sibling_folder(new_name, parent)
            .is_some_and(|other| other != id)
        {
            return Err(AppError::conflict(format!(
                "The folder was not renamed because another folder with the same name ({new_name}) already exists in the same folder"
            )));
        }
        if let Some(folder) = tables.folders.get_mut(&id) {
            folder.name = new_name.to_string();
            folder.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn upload_file(&self, upload: &FileUpload) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        if !tables.folder_exists(upload.folder_id) {
            return Err(AppError::not_found(format!(
                "Folder {} not found",
                upload.folder_id
            )));
        }
        let file_type_id = tables.register_file_type(&upload.name);
        let now = Utc::now();

        match tables.sibling_file(&upload.name, upload.folder_id) {
            Some(existing) => {
                if let Some(file) = tables.files.get_mut(&existing) {
                    file.description = upload.description.clone();
                    file.file_type_id = file_type_id;
                    file.content = upload.content.clone();
                    file.updated_at = now;
                }
            }
            None => {
                tables.last_file_id += 1;
                let id = FileId(tables.last_file_id);
                tables.files.insert(
                    id,
                    File {
                        id,
                        name: upload.name.clone(),
                        description: upload.description.clone(),
                        file_type_id,
                        folder_id: upload.folder_id,
                        content: upload.content.clone(),
                        created_at: now,
                        updated_at: now,
                    },
                );
            }
        }
        info!(folder_id = %upload.folder_id, name = %upload.name, "File uploaded");
        Ok(())
    }

    async fn delete_file(&self, id: FileId) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        tables
            .files
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::not_found(format!("File {id} not found")))
    }

    async fn rename_file(&self, id: FileId, new_name: &str) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        let folder = tables.file(id)?.folder_id;
        if tables
            .sibling_file(new_name, folder)
            .is_some_and(|other| other != id)
        {
            return Err(AppError::conflict(format!(
                "The file was not renamed because another file with the same name ({new_name}) already exists in the same folder"
            )));
        }
        let file_type_id = tables.register_file_type(new_name);
        if let Some(file) = tables.files.get_mut(&id) {
            file.name = new_name.to_string();
            file.file_type_id = file_type_id;
            file.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn file_description(&self, id: FileId) -> AppResult<String> {
        self.description_fetches.fetch_add(1, Ordering::SeqCst);
        let tables = self.tables.read().await;
        Ok(tables.file(id)?.description.clone())
    }

    async fn file_content(&self, id: FileId) -> AppResult<String> {
        self.content_fetches.fetch_add(1, Ordering::SeqCst);
        let tables = self.tables.read().await;
        Ok(tables.file(id)?.content.clone())
    }

    async fn download_file(&self, id: FileId) -> AppResult<FileDownload> {
        let tables = self.tables.read().await;
        let file = tables.file(id)?;
        Ok(FileDownload {
            name: file.name.clone(),
            content: file.content.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cabinet_core::error::ErrorKind;

    fn upload(name: &str, folder: FolderId, content: &str) -> FileUpload {
        FileUpload {
            name: name.to_string(),
            description: String::new(),
            folder_id: folder,
            content: content.to_string(),
        }
    }

    #[tokio::test]
    async fn test_sibling_folder_names_are_reused() {
        let store = MemoryEntityStore::new();
        let a = store.create_folder("Docs", None).await.unwrap();
        assert_eq!(store.create_folder("Docs", None).await.unwrap(), a);
        let nested = store.create_folder("Docs", Some(a)).await.unwrap();
        assert_ne!(nested, a);
    }

    #[tokio::test]
    async fn test_delete_folder_removes_descendants() {
        let store = MemoryEntityStore::new();
        let root = store.create_folder("Project", None).await.unwrap();
        let bin = store.create_folder("bin", Some(root)).await.unwrap();
        let debug = store.create_folder("Debug", Some(bin)).await.unwrap();
        let other = store.create_folder("Other", None).await.unwrap();
        store.upload_file(&upload("app.exe", debug, "MZ")).await.unwrap();
        store.upload_file(&upload("keep.txt", other, "k")).await.unwrap();

        store.delete_folder(root).await.unwrap();

        let names: Vec<_> = store
            .list_entities()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["Other", "keep.txt"]);
        assert_eq!(store.file_count(debug).await, 0);
    }

    #[tokio::test]
    async fn test_upload_overwrites_and_rename_conflicts() {
        let store = MemoryEntityStore::new();
        let docs = store.create_folder("Docs", None).await.unwrap();
        store.upload_file(&upload("a.txt", docs, "old")).await.unwrap();
        store.upload_file(&upload("a.txt", docs, "new")).await.unwrap();
        store.upload_file(&upload("b.txt", docs, "b")).await.unwrap();
        assert_eq!(store.file_count(docs).await, 2);
        assert_eq!(store.file_content(FileId(1)).await.unwrap(), "new");

        let err = store.rename_file(FileId(1), "b.txt").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
        store.rename_file(FileId(1), "a.txt").await.unwrap();
    }

    #[tokio::test]
    async fn test_fetch_counters() {
        let store = MemoryEntityStore::new();
        let docs = store.create_folder("Docs", None).await.unwrap();
        store.upload_file(&upload("a.txt", docs, "x")).await.unwrap();
        store.file_description(FileId(1)).await.unwrap();
        store.file_content(FileId(1)).await.unwrap();
        store.file_content(FileId(1)).await.unwrap();
        assert_eq!(store.description_fetches(), 1);
        assert_eq!(store.content_fetches(), 2);
    }

    #[tokio::test]
    async fn test_missing_parent_is_not_found() {
        let store = MemoryEntityStore::new();
        let err = store.create_folder("x", Some(FolderId(5))).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        let err = store.upload_file(&upload("a", FolderId(5), "")).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}

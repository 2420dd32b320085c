//! User commands: clicks, hovers and the store-backed structural
//! operations, each followed by the matching rebuild.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};

use cabinet_core::config::UiConfig;
use cabinet_core::error::AppError;
use cabinet_core::result::AppResult;
use cabinet_core::types::{FileId, FolderId};
use cabinet_entity::entity::EntityKey;
use cabinet_entity::file::{FileDownload, FileUpload};
use cabinet_entity::store::EntityStore;

use crate::selection::RenameTarget;
use crate::tooltip::{Position, TimerToken};
use crate::tree::TreeBuilder;
use crate::workspace::Workspace;

/// A file picked for upload into the active folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFile {
    /// File name.
    pub name: String,
    /// Description shown in the tooltip.
    pub description: String,
    /// Text content.
    pub content: String,
}

/// Result of an upload request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadOutcome {
    /// The file was stored.
    Uploaded,
    /// The user declined to overwrite an existing file.
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rebuild {
    /// Purge every card first.
    Full,
    /// Keep cards still present in the new tree.
    Partial,
}

/// The engine facade handed to a UI host.
///
/// Cheap to clone; clones share the same workspace and store.
#[derive(Clone)]
pub struct Cabinet {
    store: Arc<dyn EntityStore>,
    workspace: Arc<Mutex<Workspace>>,
    rebuild_gate: Arc<Mutex<()>>,
    builder: TreeBuilder,
    tooltip_delay: Duration,
}

impl Cabinet {
    /// Create a cabinet over a store. Call [`Cabinet::update_state`] to
    /// load the tree.
    pub fn new(store: Arc<dyn EntityStore>, config: &UiConfig) -> Self {
        Self {
            store,
            workspace: Arc::new(Mutex::new(Workspace::new())),
            rebuild_gate: Arc::new(Mutex::new(())),
            builder: TreeBuilder::from_config(config),
            tooltip_delay: config.tooltip_hide_delay(),
        }
    }

    /// Lock the workspace for reading projections.
    pub async fn workspace(&self) -> MutexGuard<'_, Workspace> {
        self.workspace.lock().await
    }

    /// Purge all cards and rebuild everything from the store.
    pub async fn update_state(&self) -> AppResult<()> {
        self.rebuild(Rebuild::Full).await
    }

    /// Rebuild the tree, keeping cards whose entities still exist.
    pub async fn refresh_tree(&self) -> AppResult<()> {
        self.rebuild(Rebuild::Partial).await
    }

    async fn rebuild(&self, mode: Rebuild) -> AppResult<()> {
        let _gate = self.rebuild_gate.lock().await;

        let entities = self.store.list_entities().await?;
        let tree = self.builder.build(entities)?;

        let (generation, missing) = {
            let mut workspace = self.workspace.lock().await;
            if mode == Rebuild::Full {
                workspace.reset_all();
            }
            let generation = workspace.replace_tree(tree);
            (generation, workspace.missing_file_cards())
        };

        let fetched = missing.len();
        for entity in missing {
            let file = FileId(entity.id);
            let description = self.store.file_description(file).await?;
            let content = self.store.file_content(file).await?;
            self.workspace
                .lock()
                .await
                .install_file_card(generation, &entity, description, content);
        }

        debug!(?mode, generation, fetched, "Rebuild complete");
        Ok(())
    }

    /// Click on a tree node.
    pub async fn click_node(&self, key: EntityKey) -> AppResult<()> {
        self.workspace.lock().await.click_node(key)
    }

    /// Click on a folder node.
    pub async fn click_folder(&self, folder: FolderId) -> AppResult<()> {
        self.workspace.lock().await.click_folder(folder)
    }

    /// Click on a file node.
    pub async fn click_file(&self, file: FileId) -> AppResult<()> {
        self.workspace.lock().await.click_file(file)
    }

    /// Click on a file's tab.
    pub async fn click_tab(&self, file: FileId) -> AppResult<()> {
        self.workspace.lock().await.click_tab(file)
    }

    /// Show the file's description and schedule the auto-hide.
    pub async fn hover_enter(&self, file: FileId, position: Position) -> AppResult<TimerToken> {
        let token = self.workspace.lock().await.hover_enter(file, position)?;

        let workspace = Arc::clone(&self.workspace);
        let delay = self.tooltip_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            workspace.lock().await.tooltip_timer_fired(token);
        });
        Ok(token)
    }

    /// Hide the tooltip.
    pub async fn hover_leave(&self, position: Position) {
        self.workspace.lock().await.hover_leave(position);
    }

    /// Create a folder inside the active folder.
    ///
    /// With no active folder, `confirm_root` is asked whether to create it
    /// at the root instead; `Ok(None)` means the host declined.
    pub async fn create_folder<F>(&self, name: &str, confirm_root: F) -> AppResult<Option<FolderId>>
    where
        F: FnOnce() -> bool,
    {
        let parent = self.workspace.lock().await.selection().active_folder.get();
        if parent.is_none() && !confirm_root() {
            info!(name = %name, "Folder creation at the root cancelled");
            return Ok(None);
        }
        if name.trim().is_empty() {
            return Err(AppError::empty_input(
                "An empty folder name is not allowed, so the folder was not created",
            ));
        }

        let id = self.store.create_folder(name, parent).await?;
        info!(folder_id = %id, parent = ?parent, name = %name, "Folder created");

        self.update_state().await?;
        Ok(Some(id))
    }

    /// Delete the active folder with everything inside it.
    pub async fn delete_folder(&self) -> AppResult<()> {
        let folder = self
            .workspace
            .lock()
            .await
            .selection()
            .active_folder
            .require("Select the folder to delete in the tree first")?;

        self.store.delete_folder(folder).await?;
        self.workspace.lock().await.forget_folder(folder);
        info!(folder_id = %folder, "Folder deleted");

        self.refresh_tree().await
    }

    /// Delete the active file.
    pub async fn delete_file(&self) -> AppResult<()> {
        let file = self
            .workspace
            .lock()
            .await
            .selection()
            .active_file
            .require("Select the file to delete in the tree first")?;

        self.store.delete_file(file).await?;
        self.workspace.lock().await.forget_file(file);
        info!(file_id = %file, "File deleted");

        self.refresh_tree().await
    }

    /// Rename the most recently activated folder or file.
    ///
    /// A blank name or a name clash leaves the store and the workspace
    /// untouched.
    pub async fn rename(&self, new_name: &str) -> AppResult<()> {
        let (target, old_name) = self.workspace.lock().await.rename_target()?;
        if new_name.trim().is_empty() {
            return Err(AppError::empty_input(match target {
                RenameTarget::Folder(_) => "An empty name is not allowed, so the folder was not renamed",
                RenameTarget::File(_) => "An empty name is not allowed, so the file was not renamed",
            }));
        }

        let renamed = match target {
            RenameTarget::Folder(id) => self.store.rename_folder(id, new_name).await,
            RenameTarget::File(id) => self.store.rename_file(id, new_name).await,
        };
        if let Err(err) = renamed {
            if err.is_conflict() {
                warn!(key = %target.key(), name = %new_name, "Rename rejected: name already taken");
            }
            return Err(err);
        }
        info!(key = %target.key(), from = %old_name, to = %new_name, "Renamed");

        if let RenameTarget::File(id) = target {
            self.workspace.lock().await.forget_file(id);
        }
        self.refresh_tree().await
    }

    /// Upload a file into the active folder.
    ///
    /// When the folder already shows a file of the same name, `confirm` is
    /// asked with the folder and file names whether to overwrite it.
    pub async fn upload<F>(&self, file: NewFile, confirm: F) -> AppResult<UploadOutcome>
    where
        F: FnOnce(&str, &str) -> bool,
    {
        let (folder, folder_name, duplicate) = {
            let workspace = self.workspace.lock().await;
            let (folder, folder_name) = workspace.active_folder().ok_or_else(|| {
                AppError::missing_selection("Select the folder to upload into in the tree first")
            })?;
            let duplicate = workspace
                .file_names_in(folder)
                .contains(&file.name.as_str());
            (folder, folder_name, duplicate)
        };
        if file.name.trim().is_empty() {
            return Err(AppError::empty_input("The uploaded file has no name"));
        }

        if duplicate && !confirm(&folder_name, &file.name) {
            info!(folder_id = %folder, name = %file.name, "Upload cancelled: overwrite declined");
            return Ok(UploadOutcome::Cancelled);
        }

        self.store
            .upload_file(&FileUpload {
                name: file.name,
                description: file.description,
                folder_id: folder,
                content: file.content,
            })
            .await?;

        self.update_state().await?;
        Ok(UploadOutcome::Uploaded)
    }

    /// Download the active file.
    pub async fn download(&self) -> AppResult<FileDownload> {
        let file = self
            .workspace
            .lock()
            .await
            .selection()
            .active_file
            .require("Select the file to download in the tree first")?;
        self.store.download_file(file).await
    }
}

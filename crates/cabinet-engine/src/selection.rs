//! Selection state and the click transitions that drive it.
//!
//! Folder and file selection are independent axes. A folder click selects
//! the folder and drops the file selection; a file click does the reverse.
//! `last_activated_was_folder` records which axis the overloaded rename
//! command acts on.

use serde::Serialize;

use cabinet_core::error::AppError;
use cabinet_core::result::AppResult;
use cabinet_core::types::{FileId, FolderId};
use cabinet_entity::entity::EntityKey;

use crate::card::CardRegistry;
use crate::tree::Tree;

/// Either nothing or one selected item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Selection<T> {
    /// Nothing selected.
    #[default]
    None,
    /// The selected item.
    Active(T),
}

impl<T: Copy> Selection<T> {
    /// The selected item, if any.
    pub fn get(&self) -> Option<T> {
        match self {
            Self::None => None,
            Self::Active(value) => Some(*value),
        }
    }

    /// Whether nothing is selected.
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// The selected item, or a `MissingSelection` error with `message`.
    pub fn require(&self, message: &str) -> AppResult<T> {
        self.get().ok_or_else(|| AppError::missing_selection(message))
    }
}

/// What the rename command applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameTarget {
    /// The active folder.
    Folder(FolderId),
    /// The active file.
    File(FileId),
}

impl RenameTarget {
    /// Entity key of the target.
    pub fn key(self) -> EntityKey {
        match self {
            Self::Folder(id) => EntityKey::folder(id),
            Self::File(id) => EntityKey::file(id),
        }
    }
}

/// Which folder is current and which file is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SelectionState {
    /// The current folder.
    pub active_folder: Selection<FolderId>,
    /// The open file.
    pub active_file: Selection<FileId>,
    /// Whether the most recent activation was a folder.
    pub last_activated_was_folder: bool,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            active_folder: Selection::None,
            active_file: Selection::None,
            last_activated_was_folder: true,
        }
    }
}

impl SelectionState {
    /// Clear both selections and deactivate their cards.
    pub fn reset(&mut self, cards: &mut CardRegistry) {
        cards.deactivate_all();
        *self = Self::default();
    }

    /// Handle a click on a folder node.
    ///
    /// Toggles the folder's expanded state, makes it the single open
    /// folder icon and the single active folder card, and drops the file
    /// selection.
    pub fn click_folder(
        &mut self,
        folder: FolderId,
        tree: &mut Tree,
        cards: &mut CardRegistry,
    ) -> AppResult<()> {
        let key = EntityKey::folder(folder);
        let node = tree
            .find_mut(key)
            .ok_or_else(|| AppError::not_found(format!("Folder {folder} is not in the tree")))?;
        node.expanded = !node.expanded;
        tree.mark_open(folder);

        if let Some(file) = self.active_file.get() {
            cards.deactivate(EntityKey::file(file));
        }
        cards.activate(key);

        self.active_folder = Selection::Active(folder);
        self.active_file = Selection::None;
        self.last_activated_was_folder = true;
        Ok(())
    }

    /// Handle a click on a file node.
    ///
    /// A hidden card is shown (tab moved rightmost), a shown one is
    /// activated. Fails with `NotReady` if the file's card has not loaded.
    pub fn click_file(&mut self, file: FileId, tree: &Tree, cards: &mut CardRegistry) -> AppResult<()> {
        let key = EntityKey::file(file);
        if !tree.contains(key) {
            return Err(AppError::not_found(format!("File {file} is not in the tree")));
        }
        let hidden = match cards.get(key) {
            Some(card) => !card.is_shown(),
            None => return Err(AppError::not_ready(format!("File {file} is still loading"))),
        };

        if let Some(previous) = self.active_file.get() {
            cards.deactivate(EntityKey::file(previous));
        }
        if let Some(folder) = self.active_folder.get() {
            cards.deactivate(EntityKey::folder(folder));
        }
        if hidden {
            cards.show(key);
        } else {
            cards.activate(key);
        }

        self.active_folder = Selection::None;
        self.active_file = Selection::Active(file);
        self.last_activated_was_folder = false;
        Ok(())
    }

    /// Handle a click on a file's tab.
    ///
    /// The active tab closes; an inactive one becomes active again without
    /// touching the folder selection.
    pub fn click_tab(&mut self, file: FileId, cards: &mut CardRegistry) -> AppResult<()> {
        let key = EntityKey::file(file);
        let card = cards
            .get(key)
            .filter(|card| card.is_shown())
            .ok_or_else(|| AppError::not_found(format!("File {file} has no open tab")))?;

        if card.is_active() {
            cards.hide(key);
            self.active_file = Selection::None;
        } else {
            cards.activate(key);
            self.active_file = Selection::Active(file);
            self.last_activated_was_folder = false;
        }
        Ok(())
    }

    /// Resolve the overloaded rename command.
    pub fn rename_target(&self) -> AppResult<RenameTarget> {
        if self.last_activated_was_folder {
            self.active_folder
                .require("Select a folder or file in the tree before renaming")
                .map(RenameTarget::Folder)
        } else {
            self.active_file
                .require("Select a folder or file in the tree before renaming")
                .map(RenameTarget::File)
        }
    }

    /// Drop references to an entity that no longer exists.
    pub fn forget(&mut self, key: EntityKey) {
        if key.as_folder().is_some_and(|id| self.active_folder == Selection::Active(id)) {
            self.active_folder = Selection::None;
        }
        if key.as_file().is_some_and(|id| self.active_file == Selection::Active(id)) {
            self.active_file = Selection::None;
        }
    }
}

//! The single owner of tree, cards, selection and tooltip state.

use serde::Serialize;
use tracing::{debug, warn};

use cabinet_core::error::AppError;
use cabinet_core::result::AppResult;
use cabinet_core::types::{FileId, FolderId};
use cabinet_entity::entity::{Entity, EntityKey};

use crate::card::CardRegistry;
use crate::selection::{RenameTarget, SelectionState};
use crate::tooltip::{Position, TimerToken, TooltipController};
use crate::tree::Tree;

/// One tab in the tab strip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TabView {
    /// File shown by the tab.
    pub file_id: FileId,
    /// Tab label.
    pub name: String,
    /// Whether this is the active tab.
    pub active: bool,
}

/// Synchronous engine state.
///
/// Every mutation of the tree, the card registry, the selection or the
/// tooltip goes through this type.
#[derive(Debug, Default)]
pub struct Workspace {
    tree: Tree,
    cards: CardRegistry,
    selection: SelectionState,
    tooltip: TooltipController,
    generation: u64,
}

impl Workspace {
    /// An empty workspace.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current tree.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// The card registry.
    pub fn cards(&self) -> &CardRegistry {
        &self.cards
    }

    /// The selection state.
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// The tooltip.
    pub fn tooltip(&self) -> &TooltipController {
        &self.tooltip
    }

    /// Incremented by every tree replacement.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Drop every card, clear the selection and hide the tooltip.
    pub fn reset_all(&mut self) {
        self.cards.purge();
        self.selection = SelectionState::default();
        self.tooltip.reset();
    }

    /// Install a freshly built tree and return its generation.
    ///
    /// Clears the selection, drops cards whose entity is gone, refreshes
    /// the rest and creates the missing folder cards.
    pub fn replace_tree(&mut self, tree: Tree) -> u64 {
        self.selection.reset(&mut self.cards);
        self.tree = tree;
        self.generation += 1;
        self.cards.retain_tree(&self.tree);
        for node in self.tree.iter().filter(|node| node.is_folder()) {
            self.cards.ensure_folder_card(node);
        }
        debug!(
            generation = self.generation,
            nodes = self.tree.len(),
            cards = self.cards.len(),
            "Tree replaced"
        );
        self.generation
    }

    /// File entities in the tree that have no card yet, in tree order.
    pub fn missing_file_cards(&self) -> Vec<Entity> {
        self.tree
            .iter()
            .filter(|node| !node.is_folder() && !self.cards.contains(node.key()))
            .map(|node| node.entity.clone())
            .collect()
    }

    /// Install a fetched file card.
    ///
    /// Results fetched for an older generation, or for a file that left the
    /// tree meanwhile, are discarded. Returns whether the card was
    /// installed.
    pub fn install_file_card(
        &mut self,
        generation: u64,
        entity: &Entity,
        description: String,
        content: String,
    ) -> bool {
        let key = entity.key();
        if generation != self.generation {
            warn!(
                key = %key,
                fetched_for = generation,
                current = self.generation,
                "Discarding file card from a stale rebuild"
            );
            return false;
        }
        if !self.tree.contains(key) {
            warn!(key = %key, "Discarding file card for an entity no longer in the tree");
            return false;
        }
        self.cards.ensure_file_card(entity, description, content);
        true
    }

    /// Click on a tree node.
    pub fn click_node(&mut self, key: EntityKey) -> AppResult<()> {
        match (key.as_folder(), key.as_file()) {
            (Some(folder), _) => self.click_folder(folder),
            (_, Some(file)) => self.click_file(file),
            _ => Err(AppError::internal(format!("Unroutable key {key}"))),
        }
    }

    /// Click on a folder node.
    pub fn click_folder(&mut self, folder: FolderId) -> AppResult<()> {
        self.selection
            .click_folder(folder, &mut self.tree, &mut self.cards)
    }

    /// Click on a file node.
    pub fn click_file(&mut self, file: FileId) -> AppResult<()> {
        self.selection.click_file(file, &self.tree, &mut self.cards)
    }

    /// Click on a file's tab.
    pub fn click_tab(&mut self, file: FileId) -> AppResult<()> {
        self.selection.click_tab(file, &mut self.cards)
    }

    /// What rename would act on, with the current name.
    pub fn rename_target(&self) -> AppResult<(RenameTarget, String)> {
        let target = self.selection.rename_target()?;
        let name = self
            .cards
            .get(target.key())
            .map(|card| card.name.clone())
            .ok_or_else(|| AppError::not_found(format!("No card for {}", target.key())))?;
        Ok((target, name))
    }

    /// The active folder with its name.
    pub fn active_folder(&self) -> Option<(FolderId, String)> {
        let id = self.selection.active_folder.get()?;
        let name = self.cards.get(EntityKey::folder(id))?.name.clone();
        Some((id, name))
    }

    /// The active file.
    pub fn active_file(&self) -> Option<FileId> {
        self.selection.active_file.get()
    }

    /// Remove a deleted file's card and selection.
    pub fn forget_file(&mut self, file: FileId) {
        let key = EntityKey::file(file);
        self.cards.delete_card(key);
        self.selection.forget(key);
    }

    /// Remove a deleted folder's card, every card below it, and any
    /// selection pointing into it.
    pub fn forget_folder(&mut self, folder: FolderId) {
        let mut removed = self.cards.delete_cards_under_folder(folder);
        let key = EntityKey::folder(folder);
        self.cards.delete_card(key);
        removed.push(key);
        for key in removed {
            self.selection.forget(key);
        }
    }

    /// Names of the files directly inside `folder` as shown in the tree.
    pub fn file_names_in(&self, folder: FolderId) -> Vec<&str> {
        self.tree.file_names_in(folder)
    }

    /// Tabs in strip order, rightmost last.
    pub fn tabs(&self) -> Vec<TabView> {
        self.cards
            .tabs()
            .into_iter()
            .filter_map(|card| {
                card.key.as_file().map(|file_id| TabView {
                    file_id,
                    name: card.name.clone(),
                    active: card.is_active(),
                })
            })
            .collect()
    }

    /// Content of the active file card.
    pub fn open_content(&self) -> Option<&str> {
        let file = self.selection.active_file.get()?;
        self.cards
            .get(EntityKey::file(file))
            .filter(|card| card.is_active())
            .map(|card| card.content.as_str())
    }

    /// Pointer entered a file node.
    pub fn hover_enter(&mut self, file: FileId, position: Position) -> AppResult<TimerToken> {
        let card = self
            .cards
            .get(EntityKey::file(file))
            .ok_or_else(|| AppError::not_ready(format!("File {file} is still loading")))?;
        Ok(self.tooltip.hover_enter(&card.description, position))
    }

    /// Pointer left a file node.
    pub fn hover_leave(&mut self, position: Position) {
        self.tooltip.hover_leave(position);
    }

    /// An auto-hide timer elapsed.
    pub fn tooltip_timer_fired(&mut self, token: TimerToken) -> bool {
        self.tooltip.timer_fired(token)
    }
}

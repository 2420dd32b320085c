//! Card registry keyed by entity.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use cabinet_core::types::FolderId;
use cabinet_entity::entity::{Entity, EntityKey};

use super::model::{Activation, Card, Visibility};
use crate::tree::{Tree, TreeNode};

/// Owns every card plus the tab-strip and content stacking orders.
///
/// The tab order lists keys left to right (rightmost last); the content
/// order lists content panels bottom to top.
#[derive(Debug, Default)]
pub struct CardRegistry {
    cards: HashMap<EntityKey, Card>,
    tab_order: Vec<EntityKey>,
    content_order: Vec<EntityKey>,
}

impl CardRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cards.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether there are no cards.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Whether a card exists for `key`.
    pub fn contains(&self, key: EntityKey) -> bool {
        self.cards.contains_key(&key)
    }

    /// Look up a card.
    pub fn get(&self, key: EntityKey) -> Option<&Card> {
        self.cards.get(&key)
    }

    /// All cards, in no particular order.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.values()
    }

    /// The card for a folder node, created on first request.
    pub fn ensure_folder_card(&mut self, node: &TreeNode) -> &Card {
        self.cards
            .entry(node.key())
            .or_insert_with(|| Card::folder(node))
    }

    /// The card for a file, created from fetched data on first request.
    ///
    /// An existing card is returned untouched.
    pub fn ensure_file_card(&mut self, entity: &Entity, description: String, content: String) -> &Card {
        let key = entity.key();
        if !self.cards.contains_key(&key) {
            self.content_order.push(key);
        }
        self.cards
            .entry(key)
            .or_insert_with(|| Card::file(entity, description, content))
    }

    /// Remove a card together with its tab and content panel.
    pub fn delete_card(&mut self, key: EntityKey) -> Option<Card> {
        self.tab_order.retain(|k| *k != key);
        self.content_order.retain(|k| *k != key);
        self.cards.remove(&key)
    }

    /// Remove every card whose entity sits, transitively, inside `folder`.
    ///
    /// The folder's own card is kept. Returns the removed keys.
    pub fn delete_cards_under_folder(&mut self, folder: FolderId) -> Vec<EntityKey> {
        let mut folders: HashSet<FolderId> = HashSet::from([folder]);
        loop {
            let found: Vec<FolderId> = self
                .cards
                .values()
                .filter(|card| card.parent_folder_id.is_some_and(|p| folders.contains(&p)))
                .filter_map(|card| card.key.as_folder())
                .filter(|id| !folders.contains(id))
                .collect();
            if found.is_empty() {
                break;
            }
            folders.extend(found);
        }

        let doomed: Vec<EntityKey> = self
            .cards
            .values()
            .filter(|card| card.parent_folder_id.is_some_and(|p| folders.contains(&p)))
            .map(|card| card.key)
            .collect();
        for key in &doomed {
            self.delete_card(*key);
        }
        debug!(folder_id = %folder, removed = doomed.len(), "Cards under folder removed");
        doomed
    }

    /// Remove every card.
    pub fn purge(&mut self) {
        self.cards.clear();
        self.tab_order.clear();
        self.content_order.clear();
    }

    /// Drop cards whose entity left the tree and refresh names and parents
    /// of the rest.
    pub fn retain_tree(&mut self, tree: &Tree) {
        let stale: Vec<EntityKey> = self
            .cards
            .keys()
            .filter(|key| !tree.contains(**key))
            .copied()
            .collect();
        for key in stale {
            self.delete_card(key);
        }

        for node in tree.iter() {
            if let Some(card) = self.cards.get_mut(&node.key()) {
                card.name = node.name().to_string();
                card.parent_folder_id = node.parent_folder_id();
            }
        }
    }

    /// Show a card's tab at the rightmost position, raise its content and
    /// make it the active card of its kind.
    pub fn show(&mut self, key: EntityKey) {
        let Some(card) = self.cards.get_mut(&key) else {
            return;
        };
        card.visibility = Visibility::Shown;
        self.tab_order.retain(|k| *k != key);
        self.tab_order.push(key);
        self.content_order.retain(|k| *k != key);
        self.content_order.push(key);
        self.activate(key);
    }

    /// Remove a card's tab and deactivate it. The card itself stays.
    pub fn hide(&mut self, key: EntityKey) {
        if let Some(card) = self.cards.get_mut(&key) {
            card.visibility = Visibility::Hidden;
            card.activation = Activation::Inactive;
        }
    }

    /// Make `key` the only active card of its kind.
    pub fn activate(&mut self, key: EntityKey) {
        if !self.cards.contains_key(&key) {
            return;
        }
        for card in self.cards.values_mut() {
            if card.key.kind == key.kind {
                card.activation = if card.key == key {
                    Activation::Active
                } else {
                    Activation::Inactive
                };
            }
        }
    }

    /// Deactivate a card.
    pub fn deactivate(&mut self, key: EntityKey) {
        if let Some(card) = self.cards.get_mut(&key) {
            card.activation = Activation::Inactive;
        }
    }

    /// Deactivate every card.
    pub fn deactivate_all(&mut self) {
        for card in self.cards.values_mut() {
            card.activation = Activation::Inactive;
        }
    }

    /// Shown cards in tab-strip order.
    pub fn tabs(&self) -> Vec<&Card> {
        self.tab_order
            .iter()
            .filter_map(|key| self.cards.get(key))
            .filter(|card| card.is_shown())
            .collect()
    }

    /// Content panels from bottom to top.
    pub fn content_stack(&self) -> Vec<&Card> {
        self.content_order
            .iter()
            .filter_map(|key| self.cards.get(key))
            .collect()
    }
}

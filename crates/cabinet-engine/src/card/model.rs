//! Card state.

use serde::Serialize;

use cabinet_core::types::FolderId;
use cabinet_entity::entity::{Entity, EntityKey};

use crate::tree::TreeNode;

/// Whether a card's tab is in the tab strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// No tab.
    Hidden,
    /// Tab visible.
    Shown,
}

/// Whether a card is the active one of its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    /// Not selected.
    Inactive,
    /// Selected; for files, its content is the one on display.
    Active,
}

/// Presentation state for one entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    /// Entity key.
    pub key: EntityKey,
    /// Label shown on the tab.
    pub name: String,
    /// Containing folder.
    pub parent_folder_id: Option<FolderId>,
    /// Tooltip text. Empty for folders.
    pub description: String,
    /// File content. Empty for folders.
    pub content: String,
    /// Tab visibility.
    pub visibility: Visibility,
    /// Activation state.
    pub activation: Activation,
}

impl Card {
    /// A hidden, inactive folder card.
    pub fn folder(node: &TreeNode) -> Self {
        Self {
            key: node.key(),
            name: node.name().to_string(),
            parent_folder_id: node.parent_folder_id(),
            description: String::new(),
            content: String::new(),
            visibility: Visibility::Hidden,
            activation: Activation::Inactive,
        }
    }

    /// A hidden, inactive file card holding fetched data.
    pub fn file(entity: &Entity, description: String, content: String) -> Self {
        Self {
            key: entity.key(),
            name: entity.name.clone(),
            parent_folder_id: entity.parent_folder_id,
            description,
            content,
            visibility: Visibility::Hidden,
            activation: Activation::Inactive,
        }
    }

    /// Whether the tab is visible.
    pub fn is_shown(&self) -> bool {
        self.visibility == Visibility::Shown
    }

    /// Whether the card is active.
    pub fn is_active(&self) -> bool {
        self.activation == Activation::Active
    }

    /// Whether the card belongs to a folder.
    pub fn is_folder(&self) -> bool {
        self.key.is_folder()
    }
}

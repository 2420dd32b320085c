//! Builds the nested tree from the store's flat entity listing.

use std::collections::HashSet;

use tracing::debug;

use cabinet_core::config::UiConfig;
use cabinet_core::error::AppError;
use cabinet_core::result::AppResult;
use cabinet_core::types::FolderId;
use cabinet_entity::entity::{Entity, EntityKey};

use super::node::{Tree, TreeNode};

/// Converts flat entity records into a [`Tree`].
#[derive(Debug, Clone, Copy)]
pub struct TreeBuilder {
    max_depth: usize,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new(UiConfig::default().max_tree_depth)
    }
}

impl TreeBuilder {
    /// A builder that rejects folder chains deeper than `max_depth`.
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// A builder configured from the UI section.
    pub fn from_config(config: &UiConfig) -> Self {
        Self::new(config.max_tree_depth)
    }

    /// Build the tree.
    ///
    /// Every entity is placed exactly once under the folder its
    /// `parent_folder_id` names; sibling order follows input order. Dangling
    /// parents, cycles, self-parented folders and duplicate keys are
    /// reported as `MalformedHierarchy`.
    pub fn build(&self, entities: Vec<Entity>) -> AppResult<Tree> {
        validate(&entities)?;
        let total = entities.len();

        let (roots, worklist): (Vec<Entity>, Vec<Entity>) = entities
            .into_iter()
            .partition(|entity| entity.parent_folder_id.is_none());

        let mut visited = HashSet::new();
        let mut remaining = worklist;
        let mut nodes = Vec::with_capacity(roots.len());
        for root in roots {
            let (node, rest) = self.expand(root, remaining, &mut visited, 0)?;
            remaining = rest;
            nodes.push(node);
        }

        if !remaining.is_empty() {
            let orphans: Vec<String> = remaining
                .iter()
                .map(|e| format!("{} '{}'", e.key(), e.name))
                .collect();
            return Err(AppError::malformed_hierarchy(format!(
                "Entities unreachable from the root (dangling parent or cycle): {}",
                orphans.join(", ")
            )));
        }

        suppress_empty_arrows(&mut nodes);
        debug!(entities = total, roots = nodes.len(), "Tree built");
        Ok(Tree::new(nodes))
    }

    /// Move the children of `entity` out of the worklist, recursively, and
    /// hand back what is left.
    fn expand(
        &self,
        entity: Entity,
        worklist: Vec<Entity>,
        visited: &mut HashSet<FolderId>,
        depth: usize,
    ) -> AppResult<(TreeNode, Vec<Entity>)> {
        if depth > self.max_depth {
            return Err(AppError::malformed_hierarchy(format!(
                "Folder nesting exceeds the maximum depth of {} at '{}'",
                self.max_depth, entity.name
            )));
        }

        let mut node = TreeNode::new(entity);
        if !node.is_folder() {
            return Ok((node, worklist));
        }

        let folder_id = FolderId(node.entity.id);
        if !visited.insert(folder_id) {
            return Err(AppError::malformed_hierarchy(format!(
                "Folder {folder_id} is reachable twice"
            )));
        }

        let (children, mut rest): (Vec<Entity>, Vec<Entity>) = worklist
            .into_iter()
            .partition(|e| e.parent_folder_id == Some(folder_id));

        for child in children {
            let (child_node, remainder) = self.expand(child, rest, visited, depth + 1)?;
            rest = remainder;
            node.children.push(child_node);
        }
        Ok((node, rest))
    }
}

fn validate(entities: &[Entity]) -> AppResult<()> {
    let mut seen: HashSet<EntityKey> = HashSet::with_capacity(entities.len());
    for entity in entities {
        let key = entity.key();
        if !seen.insert(key) {
            return Err(AppError::malformed_hierarchy(format!(
                "Duplicate entity {key}"
            )));
        }
        if entity.is_folder() && entity.parent_folder_id == Some(FolderId(entity.id)) {
            return Err(AppError::malformed_hierarchy(format!(
                "Folder '{}' is its own parent",
                entity.name
            )));
        }
    }
    Ok(())
}

/// Folders without children lose their expand/collapse arrow.
fn suppress_empty_arrows(nodes: &mut [TreeNode]) {
    for node in nodes {
        if node.is_folder() && node.children.is_empty() {
            node.has_arrow = false;
        }
        suppress_empty_arrows(&mut node.children);
    }
}

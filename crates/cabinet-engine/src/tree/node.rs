//! Tree node state.

use cabinet_core::types::FolderId;
use cabinet_entity::entity::{Entity, EntityKey, FOLDER_ICON, FOLDER_OPEN_ICON};

/// Icon currently shown next to a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeIcon {
    /// Closed folder.
    Closed,
    /// The folder most recently opened by a click.
    Open,
    /// A file, with its type icon.
    File(String),
}

impl NodeIcon {
    /// The glyph to render.
    pub fn glyph(&self) -> &str {
        match self {
            Self::Closed => FOLDER_ICON,
            Self::Open => FOLDER_OPEN_ICON,
            Self::File(icon) => icon,
        }
    }
}

/// One folder or file in the built tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    /// The entity this node shows.
    pub entity: Entity,
    /// Child nodes in store order. Always empty for files.
    pub children: Vec<TreeNode>,
    /// Whether the children are visible.
    pub expanded: bool,
    /// Whether the expand/collapse arrow is drawn.
    pub has_arrow: bool,
    /// Current icon.
    pub icon: NodeIcon,
}

impl TreeNode {
    /// A fresh, expanded node with no children.
    pub fn new(entity: Entity) -> Self {
        let is_folder = entity.is_folder();
        let icon = if is_folder {
            NodeIcon::Closed
        } else {
            NodeIcon::File(entity.file_type_icon.clone())
        };
        Self {
            entity,
            children: Vec::new(),
            expanded: true,
            has_arrow: is_folder,
            icon,
        }
    }

    /// The node's entity key.
    pub fn key(&self) -> EntityKey {
        self.entity.key()
    }

    /// Whether this node is a folder.
    pub fn is_folder(&self) -> bool {
        self.entity.is_folder()
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.entity.name
    }

    /// Containing folder, if any.
    pub fn parent_folder_id(&self) -> Option<FolderId> {
        self.entity.parent_folder_id
    }

    fn find(&self, key: EntityKey) -> Option<&TreeNode> {
        if self.key() == key {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(key))
    }

    fn find_mut(&mut self, key: EntityKey) -> Option<&mut TreeNode> {
        if self.key() == key {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| child.find_mut(key))
    }

    fn for_each_mut(&mut self, f: &mut impl FnMut(&mut TreeNode)) {
        f(self);
        for child in &mut self.children {
            child.for_each_mut(f);
        }
    }
}

/// The folder/file forest shown in the navigation pane.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    roots: Vec<TreeNode>,
}

impl Tree {
    /// Wrap a list of root nodes.
    pub fn new(roots: Vec<TreeNode>) -> Self {
        Self { roots }
    }

    /// Root-level nodes.
    pub fn roots(&self) -> &[TreeNode] {
        &self.roots
    }

    /// Whether the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Total number of nodes.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Depth-first, pre-order iteration over every node.
    pub fn iter(&self) -> Nodes<'_> {
        Nodes {
            stack: self.roots.iter().rev().collect(),
        }
    }

    /// Look up a node by key.
    pub fn find(&self, key: EntityKey) -> Option<&TreeNode> {
        self.roots.iter().find_map(|root| root.find(key))
    }

    /// Look up a node by key for mutation.
    pub fn find_mut(&mut self, key: EntityKey) -> Option<&mut TreeNode> {
        self.roots.iter_mut().find_map(|root| root.find_mut(key))
    }

    /// Whether a node with this key exists.
    pub fn contains(&self, key: EntityKey) -> bool {
        self.find(key).is_some()
    }

    /// Names of the files directly inside a folder.
    pub fn file_names_in(&self, folder: FolderId) -> Vec<&str> {
        self.find(EntityKey::folder(folder))
            .map(|node| {
                node.children
                    .iter()
                    .filter(|child| !child.is_folder())
                    .map(TreeNode::name)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Show `folder` as the single open folder.
    ///
    /// Only acts when the folder currently shows [`NodeIcon::Closed`]: every
    /// other open folder reverts to closed first. Expanded state is not
    /// touched.
    pub fn mark_open(&mut self, folder: FolderId) {
        let key = EntityKey::folder(folder);
        if self.find(key).map(|node| &node.icon) != Some(&NodeIcon::Closed) {
            return;
        }
        self.for_each_mut(|node| {
            if node.icon == NodeIcon::Open {
                node.icon = NodeIcon::Closed;
            }
        });
        if let Some(node) = self.find_mut(key) {
            node.icon = NodeIcon::Open;
        }
    }

    /// Apply `f` to every node, parents before children.
    pub fn for_each_mut(&mut self, mut f: impl FnMut(&mut TreeNode)) {
        for root in &mut self.roots {
            root.for_each_mut(&mut f);
        }
    }
}

/// Pre-order iterator over tree nodes.
#[derive(Debug)]
pub struct Nodes<'a> {
    stack: Vec<&'a TreeNode>,
}

impl<'a> Iterator for Nodes<'a> {
    type Item = &'a TreeNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cabinet_core::types::FileId;

    fn sample() -> Tree {
        let mut a = TreeNode::new(Entity::folder(FolderId(1), "A", None));
        let mut b = TreeNode::new(Entity::folder(FolderId(2), "B", Some(FolderId(1))));
        b.children.push(TreeNode::new(Entity::file(
            FileId(1),
            "b.txt",
            FolderId(2),
            "txt",
            "📄",
        )));
        a.children.push(b);
        a.children.push(TreeNode::new(Entity::file(
            FileId(2),
            "a.txt",
            FolderId(1),
            "txt",
            "📄",
        )));
        let c = TreeNode::new(Entity::folder(FolderId(3), "C", None));
        Tree::new(vec![a, c])
    }

    #[test]
    fn test_iter_is_preorder() {
        let tree = sample();
        let names: Vec<_> = tree.iter().map(TreeNode::name).collect();
        assert_eq!(names, vec!["A", "B", "b.txt", "a.txt", "C"]);
        assert_eq!(tree.len(), 5);
    }

    #[test]
    fn test_file_names_in_lists_direct_files_only() {
        let tree = sample();
        assert_eq!(tree.file_names_in(FolderId(1)), vec!["a.txt"]);
        assert!(tree.file_names_in(FolderId(3)).is_empty());
        assert!(tree.file_names_in(FolderId(99)).is_empty());
    }

    #[test]
    fn test_mark_open_keeps_a_single_open_folder() {
        let mut tree = sample();
        tree.find_mut(EntityKey::folder(FolderId(1))).unwrap().expanded = false;

        tree.mark_open(FolderId(1));
        tree.mark_open(FolderId(3));

        let a = tree.find(EntityKey::folder(FolderId(1))).unwrap();
        assert_eq!(a.icon, NodeIcon::Closed);
        assert!(!a.expanded);
        let open: Vec<_> = tree
            .iter()
            .filter(|n| n.icon == NodeIcon::Open)
            .map(TreeNode::name)
            .collect();
        assert_eq!(open, vec!["C"]);
    }

    #[test]
    fn test_file_icon_glyph() {
        let node = TreeNode::new(Entity::file(FileId(1), "x.cs", FolderId(1), "cs", "📄"));
        assert_eq!(node.icon.glyph(), "📄");
        assert!(!node.has_arrow);
    }
}

//! The navigation tree: node state and the builder that produces it.

pub mod builder;
pub mod node;

pub use builder::TreeBuilder;
pub use node::{NodeIcon, Nodes, Tree, TreeNode};

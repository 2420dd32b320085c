//! Cards: per-entity presentation state and the registry that owns them.

pub mod model;
pub mod registry;

pub use model::{Activation, Card, Visibility};
pub use registry::CardRegistry;

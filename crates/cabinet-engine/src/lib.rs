//! # cabinet-engine
//!
//! The tree-state synchronization engine behind the file cabinet UI.
//!
//! - [`tree`]: builds the nested folder/file tree from the store's flat
//!   listing and tracks per-node expanded/icon/arrow state.
//! - [`card`]: one card per entity with tab visibility and activation, plus
//!   tab-strip and content stacking orders.
//! - [`selection`]: active folder, active file and the click transitions.
//! - [`tooltip`]: hover description with a single pending auto-hide timer.
//! - [`workspace`]: the synchronous owner of all of the above.
//! - [`cabinet`]: async commands that call an [`EntityStore`] and rebuild.
//! - [`http`]: an [`EntityStore`] client for the cabinet HTTP API.
//!
//! [`EntityStore`]: cabinet_entity::EntityStore

pub mod cabinet;
pub mod card;
pub mod http;
pub mod selection;
pub mod tooltip;
pub mod tree;
pub mod workspace;

pub use cabinet::{Cabinet, NewFile, UploadOutcome};
pub use card::{Activation, Card, CardRegistry, Visibility};
pub use http::HttpEntityStore;
pub use selection::{RenameTarget, Selection, SelectionState};
pub use tooltip::{Position, TimerToken, TooltipController};
pub use tree::{NodeIcon, Tree, TreeBuilder, TreeNode};
pub use workspace::{TabView, Workspace};

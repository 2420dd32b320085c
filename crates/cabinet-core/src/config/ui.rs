//! Tree engine configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Settings for the tree engine and its tooltip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Delay before a shown tooltip hides on its own, in milliseconds.
    #[serde(default = "default_tooltip_delay")]
    pub tooltip_hide_delay_ms: u64,
    /// Deepest folder nesting the tree builder accepts.
    #[serde(default = "default_max_depth")]
    pub max_tree_depth: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tooltip_hide_delay_ms: default_tooltip_delay(),
            max_tree_depth: default_max_depth(),
        }
    }
}

impl UiConfig {
    /// Tooltip auto-hide delay as a [`Duration`].
    pub fn tooltip_hide_delay(&self) -> Duration {
        Duration::from_millis(self.tooltip_hide_delay_ms)
    }
}

fn default_tooltip_delay() -> u64 {
    5000
}

fn default_max_depth() -> usize {
    256
}

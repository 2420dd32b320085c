//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! optional TOML files and `CABINET__`-prefixed environment variables.
//! Each sub-module represents a logical configuration section.

pub mod app;
pub mod database;
pub mod logging;
pub mod ui;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::database::DatabaseConfig;
pub use self::logging::LoggingConfig;
pub use self::ui::UiConfig;

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Tree engine settings.
    #[serde(default)]
    pub ui: UiConfig,
    /// Demo data seeding.
    #[serde(default)]
    pub seed: SeedConfig,
}

/// Demo data seeding configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Whether to seed the demo project on start-up. Seeding is idempotent.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl AppConfig {
    /// Load configuration.
    ///
    /// Merges `config/default.toml`, an environment-specific overlay
    /// `config/{env}.toml` (both optional), and environment variables
    /// prefixed with `CABINET__` (e.g. `CABINET__SERVER__PORT=9000`).
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("CABINET")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_deserialize_from_empty_source() {
        let config: AppConfig = config::Config::builder()
            .build()
            .expect("build")
            .try_deserialize()
            .expect("deserialize");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.ui.tooltip_hide_delay_ms, 5000);
        assert!(config.seed.enabled);
        assert_eq!(config.logging.level, "info");
    }
}

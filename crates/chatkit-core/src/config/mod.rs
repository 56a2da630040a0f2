//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section, and every field has a serde default so an empty source is a
//! valid configuration.

pub mod client;
pub mod logging;
pub mod offline;
pub mod plugin;

use serde::{Deserialize, Serialize};

use self::client::ClientConfig;
use self::logging::LoggingConfig;
use self::offline::OfflineConfig;
use self::plugin::PluginConfig;

use crate::error::ChatError;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Plugin system settings.
    #[serde(default)]
    pub plugins: PluginConfig,
    /// Offline plugin settings.
    #[serde(default)]
    pub offline: OfflineConfig,
    /// Client paging settings.
    #[serde(default)]
    pub client: ClientConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges `config/default`, an environment-specific overlay and
    /// environment variables prefixed with `CHATKIT__`.
    pub fn load(env: &str) -> Result<Self, ChatError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("CHATKIT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| ChatError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| ChatError::configuration(format!("Failed to deserialize config: {e}")))?;

        tracing::debug!(env, plugins_disabled = config.plugins.disabled.len(), "Configuration loaded");
        Ok(config)
    }

    /// Parse configuration from an inline TOML document.
    pub fn from_toml(source: &str) -> Result<Self, ChatError> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

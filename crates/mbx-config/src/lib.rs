//! # mbx-config
//!
//! Layered configuration loading for mbx using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`MBX_*` prefix, `__` as separator)
//! 2. Project-level `.mbx/config.toml`
//! 3. User-level `~/.config/mbx/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `MBX_API__BASE_URL` -> `api.base_url`,
//! `MBX_ENTRA__CLIENT_ID` -> `entra.client_id`, etc. The `__` (double
//! underscore) separates nested config sections.

mod api;
mod app;
mod entra;
mod error;

pub use api::ApiConfig;
pub use app::AppConfig;
pub use entra::EntraConfig;
pub use error::ConfigError;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MbxConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub entra: EntraConfig,
    #[serde(default)]
    pub app: AppConfig,
}

impl MbxConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` — use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` when extraction fails.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` when extraction fails.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can layer additional providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(".mbx/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("MBX_").split("__"))
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("mbx").join("config.toml"))
    }
}

//! Configuration system for Jotlist.
//!
//! Values are resolved with a clear supersedence hierarchy (highest
//! priority wins):
//!
//! 1. **Code** (field assignment after load)
//! 2. **Environment variables** (`JL_*`)
//! 3. **Config file** (`config.toml`)
//! 4. **Defaults**

pub mod logging;
pub mod server;
pub mod storage;

pub use logging::LoggingConfig;
pub use server::ServerConfig;
pub use storage::StorageConfig;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Complete Jotlist configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JotlistConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

impl JotlistConfig {
    /// Load with full supersedence: defaults, then `./config.toml` when
    /// present, then environment variables.
    pub fn load() -> Result<Self> {
        if Path::new("config.toml").exists() {
            return Self::from_file("config.toml");
        }
        let mut config = Self::default();
        config.apply_env_vars();
        Ok(config)
    }

    /// Load from a specific TOML file, then apply environment variables.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let mut config: Self = toml::from_str(&raw)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        config.apply_env_vars();
        Ok(config)
    }

    /// Apply `JL_*` environment variables on top of the current values.
    pub fn apply_env_vars(&mut self) {
        self.server.apply_env_vars();
        self.storage.apply_env_vars();
        self.logging.apply_env_vars();
    }

    /// Validate the resolved configuration before serving.
    pub fn validate(&self) -> Result<()> {
        self.server.validate()?;
        self.storage.validate()?;
        Ok(())
    }
}

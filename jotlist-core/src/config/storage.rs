//! Storage configuration

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// SQLite database file path
    /// Env: JL_DB_PATH
    /// Default: "./data/jotlist.db"
    pub db_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { db_path: PathBuf::from("./data/jotlist.db") }
    }
}

impl StorageConfig {
    /// Apply environment variables
    pub fn apply_env_vars(&mut self) {
        if let Ok(path) = env::var("JL_DB_PATH") {
            self.db_path = PathBuf::from(path);
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.db_path.as_os_str().is_empty() {
            bail!("storage.db_path must not be empty");
        }
        Ok(())
    }
}

//! Logging configuration

use serde::{Deserialize, Serialize};
use std::env;

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter, in env_logger syntax
    /// Env: JL_LOG
    /// Default: "info"
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_owned() }
    }
}

impl LoggingConfig {
    /// Apply environment variables
    pub fn apply_env_vars(&mut self) {
        if let Ok(level) = env::var("JL_LOG") {
            self.level = level;
        }
    }
}

//! Terminal configuration (from `tessera.toml`).

use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, TesseraError};

/// Runtime configuration for the terminal.
///
/// Every field is optional in the TOML file; missing keys fall back to
/// [`TesseraConfig::default`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TesseraConfig {
    /// Text shown before the working directory in the prompt.
    pub prompt_prefix: String,
    /// Initial working directory.
    pub start_dir: String,
    /// Maximum number of history entries to retain.
    pub history_limit: usize,
    /// Print the version banner at startup.
    pub show_banner: bool,
    /// Default `env_logger` filter when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for TesseraConfig {
    fn default() -> Self {
        Self {
            prompt_prefix: "cmd:".to_string(),
            start_dir: "/".to_string(),
            history_limit: 100,
            show_banner: true,
            log_filter: "warn".to_string(),
        }
    }
}

impl TesseraConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str).map_err(|e| TesseraError::Config(format!("tessera.toml: {e}")))
    }

    /// Read and parse a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }
}

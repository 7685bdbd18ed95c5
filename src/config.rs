//! Input configuration persistence
//!
//! Stored in `~/.config/resource-input/config.yaml`.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::runtime::transport::TransportKind;

/// Settings for one input instance and its runtime
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Delay before a focus loss counts as a real blur, in milliseconds
    pub blur_debounce_ms: u64,
    /// Maximum number of submitted inputs kept for recall
    pub history_limit: usize,
    /// Restore the previous submission on `recall-previous` in the runtime
    pub recall_history: bool,
    /// Force a transport instead of probing for one
    pub transport: Option<TransportKind>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            blur_debounce_ms: 200,
            history_limit: 100,
            recall_history: true,
            transport: None,
        }
    }
}

impl InputConfig {
    /// Load config from the default location, or defaults if missing/invalid
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("{:#}", e);
                Self::default()
            }
        }
    }

    /// Load config from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config at {}", path.display()))
    }

    /// Save config to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        let content = serde_yaml::to_string(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    pub fn blur_debounce(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.blur_debounce_ms)
    }
}

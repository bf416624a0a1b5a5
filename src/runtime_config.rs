// =============================================================================
// Runtime Configuration — dashboard backend settings
// =============================================================================
//
// Every tunable for the StockLens backend lives here.  All fields carry
// `#[serde(default)]` so that adding new fields never breaks loading an older
// config file.  Persistence uses the atomic tmp + rename pattern.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_bind_addr() -> String {
    "0.0.0.0:8000".to_string()
}

fn default_history_days() -> i64 {
    // Five years of daily history before weekly down-sampling.
    5 * 365
}

fn default_sample_step() -> usize {
    7
}

fn default_favorites_path() -> String {
    "favorites.json".to_string()
}

// =============================================================================
// RuntimeConfig
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Socket address the REST API listens on.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Base URL of a real data backend.  When unset (or blank) all market
    /// data is served from the deterministic mock generator.
    #[serde(default)]
    pub remote_base_url: Option<String>,

    /// Calendar days of daily mock history to generate per ticker.
    #[serde(default = "default_history_days")]
    pub mock_history_days: i64,

    /// Keep every n-th daily record when down-sampling (7 => weekly).
    #[serde(default = "default_sample_step")]
    pub mock_sample_step: usize,

    /// Path of the persisted favorites file.
    #[serde(default = "default_favorites_path")]
    pub favorites_path: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            remote_base_url: None,
            mock_history_days: default_history_days(),
            mock_sample_step: default_sample_step(),
            favorites_path: default_favorites_path(),
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from a JSON file at `path`.
    ///
    /// If the file does not exist, returns an error so the caller can fall
    /// back to defaults with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read runtime config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse runtime config from {}", path.display()))?;

        info!(
            path = %path.display(),
            bind_addr = %config.bind_addr,
            remote = config.remote_base_url.is_some(),
            "runtime config loaded"
        );

        Ok(config)
    }

    /// Persist the current configuration to `path` using an atomic write
    /// (write to `.tmp`, then rename).
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let content = serde_json::to_string_pretty(self)
            .context("failed to serialise runtime config to JSON")?;

        let tmp_path = path.with_extension("json.tmp");
        std::fs::write(&tmp_path, &content)
            .with_context(|| format!("failed to write tmp config to {}", tmp_path.display()))?;
        std::fs::rename(&tmp_path, path)
            .with_context(|| format!("failed to rename tmp config to {}", path.display()))?;

        info!(path = %path.display(), "runtime config saved (atomic)");
        Ok(())
    }
}

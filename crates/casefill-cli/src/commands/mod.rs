//! Subcommands.

pub mod batch;
pub mod config;
pub mod inspect;

use std::path::{Path, PathBuf};

use casefill_core::CasefillConfig;
use tracing::debug;

/// Per-user configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("casefill")
        .join("config.json")
}

/// The file named by `--config`, or the per-user default.
pub fn config_file_path(config_path: Option<&str>) -> PathBuf {
    config_path.map(PathBuf::from).unwrap_or_else(default_config_path)
}

/// Load the configuration selected by `--config`.
///
/// Without `--config` the per-user file is used when it exists, otherwise
/// the built-in defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<CasefillConfig> {
    if let Some(path) = config_path {
        return CasefillConfig::from_file(Path::new(path))
            .map_err(|e| anyhow::anyhow!("Failed to load config {}: {}", path, e));
    }

    let path = default_config_path();
    if path.exists() {
        debug!("Using config from {}", path.display());
        Ok(CasefillConfig::from_file(&path)?)
    } else {
        Ok(CasefillConfig::default())
    }
}

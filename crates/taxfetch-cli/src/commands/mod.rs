//! Subcommand implementations.

pub mod config;
pub mod lookup;
pub mod run;
pub mod schema;

use std::path::{Path, PathBuf};

use tracing::debug;

use taxfetch_core::TaxFetchConfig;

/// `<config dir>/taxfetch/config.json`
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("taxfetch")
        .join("config.json")
}

/// The config file in effect: the `--config` path, else the default location.
pub fn config_file(config_path: Option<&str>) -> PathBuf {
    config_path
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path)
}

/// Load configuration.
///
/// An explicit `--config` file must exist; the default file is optional.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<TaxFetchConfig> {
    if let Some(path) = config_path {
        debug!("Loading config from {}", path);
        return Ok(TaxFetchConfig::from_file(Path::new(path))?);
    }

    let path = default_config_path();
    if path.exists() {
        debug!("Loading config from {}", path.display());
        Ok(TaxFetchConfig::from_file(&path)?)
    } else {
        Ok(TaxFetchConfig::default())
    }
}

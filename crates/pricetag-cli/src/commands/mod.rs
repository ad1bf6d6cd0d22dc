//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod output;
pub mod parse;

use std::path::Path;

use tracing::debug;

use pricetag_core::PriceConfig;

/// Load the config from `--config`, the default location, or built-in defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<PriceConfig> {
    if let Some(path) = config_path {
        return Ok(PriceConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        debug!("Using config from {}", default_path.display());
        Ok(PriceConfig::from_file(&default_path)?)
    } else {
        Ok(PriceConfig::default())
    }
}

//! Configuration loading
//!
//! Reads the panel configuration from a TOML file. Every key is optional;
//! a missing file means the production defaults.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{info, warn};
use thiserror::Error;
use xsynth_core::PanelConfig;

/// Where the service looks for its configuration
pub const DEFAULT_CONFIG_PATH: &str = "/etc/xsynth/panel.toml";

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid TOML in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("rejected configuration: {0:?}")]
    Invalid(xsynth_core::ConfigError),
}

/// Parse and validate configuration text
pub fn parse(text: &str, path: &Path) -> Result<PanelConfig, LoadError> {
    let config: PanelConfig = toml::from_str(text).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    config.validate().map_err(LoadError::Invalid)?;
    Ok(config)
}

/// Load configuration from `path`
///
/// Falls back to defaults (with a warning) if the file does not exist.
/// Unreadable or invalid files are errors.
pub fn load(path: &Path) -> Result<PanelConfig, LoadError> {
    match fs::read_to_string(path) {
        Ok(text) => {
            let config = parse(&text, path)?;
            info!("loaded configuration from {}", path.display());
            Ok(config)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            warn!("{} not found, using defaults", path.display());
            Ok(PanelConfig::default())
        }
        Err(source) => Err(LoadError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

//! JSON configuration file adapter.
//!
//! Implements [`ConfigPort`] over a single JSON document on disk.  Every
//! load and every save goes through [`MonitorConfig::validate`]; a file
//! that does not exist reads as [`ConfigError::NotFound`] so callers can
//! fall back to defaults.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::app::ports::{ConfigError, ConfigPort};
use crate::config::MonitorConfig;

/// Config store backed by a JSON file.
#[derive(Debug, Clone)]
pub struct JsonConfigFile {
    path: PathBuf,
}

impl JsonConfigFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigPort for JsonConfigFile {
    fn load(&self) -> Result<MonitorConfig, ConfigError> {
        let text = std::fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ConfigError::NotFound,
            _ => {
                warn!("JsonConfigFile: read {} failed: {}", self.path.display(), e);
                ConfigError::IoError
            }
        })?;
        let config: MonitorConfig =
            serde_json::from_str(&text).map_err(|_| ConfigError::Corrupted)?;
        config.validate()?;
        info!("JsonConfigFile: loaded {}", self.path.display());
        Ok(config)
    }

    fn save(&self, config: &MonitorConfig) -> Result<(), ConfigError> {
        config.validate()?;
        let text = serde_json::to_string_pretty(config).map_err(|_| ConfigError::IoError)?;
        std::fs::write(&self.path, text).map_err(|e| {
            warn!("JsonConfigFile: write {} failed: {}", self.path.display(), e);
            ConfigError::IoError
        })?;
        info!("JsonConfigFile: saved {}", self.path.display());
        Ok(())
    }
}

//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::ImportConfig;
use crate::error::ImportError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from defaults and environment, plus `path` when given.
    pub fn load(path: Option<&Path>) -> Result<ImportConfig, ImportError> {
        let config = match path {
            Some(path) => MergeService::load_from_file(path)?,
            None => MergeService::load()?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Create default configuration.
    pub fn default() -> ImportConfig {
        ImportConfig::default()
    }
}

//! MergeService: orchestrates sources, applies merge policy, deserializes to ImportConfig.

use crate::config::sources::{environment, file};
use crate::config::ImportConfig;
use config::ConfigError;
use std::path::Path;
use tracing::debug;

use super::merge_policy;

/// Merge service for config composition.
pub struct MergeService;

impl MergeService {
    /// Load config from defaults and environment.
    /// Precedence: defaults (lowest) -> environment (highest).
    pub fn load() -> Result<ImportConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = environment::add_to_builder(builder)?;

        Self::finish(builder)
    }

    /// Load config from a specific file with environment overlay.
    /// Precedence: defaults (lowest) -> file -> environment (highest).
    pub fn load_from_file(path: &Path) -> Result<ImportConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = file::add_to_builder(builder, path)?;
        let builder = environment::add_to_builder(builder)?;

        debug!(path = %path.display(), "Loading import config file");
        Self::finish(builder)
    }

    fn finish(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<ImportConfig, ConfigError> {
        let env_keys = environment::overridden_keys();
        if !env_keys.is_empty() {
            debug!(keys = ?env_keys, "Config overridden from environment");
        }
        builder.build()?.try_deserialize()
    }
}

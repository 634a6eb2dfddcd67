//! Built-in defaults, the lowest-precedence layer.

use crate::config::{DEFAULT_FOLDER_SEPARATOR, DEFAULT_QUEUE_CAPACITY, DEFAULT_ROOT_FOLDER};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

/// Builder preloaded with the default import settings.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("root_folder", DEFAULT_ROOT_FOLDER)?
        .set_default("folder_separator", DEFAULT_FOLDER_SEPARATOR)?
        .set_default("queue_capacity", DEFAULT_QUEUE_CAPACITY as i64)
}

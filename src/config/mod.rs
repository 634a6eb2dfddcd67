//! Import configuration
//!
//! Layered loading (defaults, optional file, `XBEL_IMPORT__*` environment) of
//! the settings an import run needs.

pub mod facade;
pub mod merge;
pub mod sources;

pub use facade::ConfigLoader;

use crate::error::ImportError;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

pub(crate) const DEFAULT_ROOT_FOLDER: &str = "/IMPORTED";
pub(crate) const DEFAULT_FOLDER_SEPARATOR: &str = "/";
pub(crate) const DEFAULT_QUEUE_CAPACITY: usize = 1000;

/// Settings for one XBEL import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportConfig {
    /// Fixed prefix of every folder path
    #[serde(default = "default_root_folder")]
    pub root_folder: String,

    /// Joins folder titles into a path
    #[serde(default = "default_folder_separator")]
    pub folder_separator: String,

    /// Maximum number of records waiting for a consumer
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,

    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_root_folder() -> String {
    DEFAULT_ROOT_FOLDER.to_string()
}

fn default_folder_separator() -> String {
    DEFAULT_FOLDER_SEPARATOR.to_string()
}

fn default_queue_capacity() -> usize {
    DEFAULT_QUEUE_CAPACITY
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            root_folder: default_root_folder(),
            folder_separator: default_folder_separator(),
            queue_capacity: default_queue_capacity(),
            logging: LoggingConfig::default(),
        }
    }
}

impl ImportConfig {
    /// Reject settings the importer cannot run with.
    pub fn validate(&self) -> Result<(), ImportError> {
        if self.queue_capacity == 0 {
            return Err(ImportError::InvalidConfig(
                "queue_capacity must be at least 1".to_string(),
            ));
        }
        if self.folder_separator.is_empty() {
            return Err(ImportError::InvalidConfig(
                "folder_separator must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

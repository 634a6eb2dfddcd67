//! Error types for the XBEL import pipeline.

use thiserror::Error;

/// Errors that end an import run.
///
/// Attribute-level and structural problems in the document never surface as an
/// `ImportError`; the handler absorbs them and keeps going.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Malformed attribute: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("Invalid UTF-8 in document: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Import interrupted while waiting for queue capacity")]
    Interrupted,

    #[error("All record consumers were dropped")]
    Disconnected,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Logging setup failed: {0}")]
    Logging(String),

    #[error("Import worker panicked")]
    WorkerPanicked,
}

/// A date attribute that could not be read as an ISO-8601 timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unrecognized timestamp: {input:?}")]
pub struct DateParseError {
    pub input: String,
}

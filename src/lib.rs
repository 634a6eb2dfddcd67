//! xbel-import: Streaming XBEL Bookmark Import
//!
//! Parses an XBEL document into bookmark records, rebuilding each bookmark's
//! folder path and merging alias locations, and hands the records to
//! consumers through a bounded queue filled from a parser thread.

pub mod alias;
pub mod config;
pub mod date;
pub mod error;
pub mod folder;
pub mod handler;
pub mod importer;
pub mod logging;
pub mod queue;
pub mod source;
pub mod tooling;
pub mod types;

pub use config::ImportConfig;
pub use error::ImportError;
pub use handler::{ImportSummary, RecordSink, XbelHandler};
pub use importer::{ImportHandle, XbelImporter};
pub use queue::{ImportItem, RecordConsumer, RecordProducer};
pub use types::{BookmarkField, BookmarkRecord};

//! Import runner
//!
//! Runs the XBEL state machine over an input stream on a dedicated thread and
//! hands records to consumers through the bounded queue. The queue is closed
//! whenever the run ends, however it ends.

use crate::config::ImportConfig;
use crate::error::ImportError;
use crate::handler::{ImportSummary, XbelHandler};
use crate::queue::{self, CancelHandle, ImportItem, RecordConsumer, RecordProducer};
use crate::source::XmlEventSource;
use std::io::BufRead;
use std::thread::{self, JoinHandle};
use std::time::Instant;
use tracing::{error, info};

/// Parses one XBEL document into a record queue.
pub struct XbelImporter<R: BufRead> {
    input: R,
    config: ImportConfig,
}

impl<R: BufRead> XbelImporter<R> {
    pub fn new(input: R, config: ImportConfig) -> Self {
        Self { input, config }
    }

    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// Parse the whole input on the current thread, feeding `producer`.
    ///
    /// The producer is consumed; it is dropped (closing the queue) before this
    /// returns, on success and on error alike.
    pub fn run(self, producer: RecordProducer) -> Result<ImportSummary, ImportError> {
        self.config.validate()?;
        let start = Instant::now();
        info!(
            root_folder = %self.config.root_folder,
            queue_capacity = self.config.queue_capacity,
            "Starting XBEL import"
        );

        let mut handler = XbelHandler::new(
            &self.config.root_folder,
            &self.config.folder_separator,
            producer,
        );
        let result = XmlEventSource::new(self.input).drive(&mut handler);
        let summary = handler.summary().clone();
        drop(handler);
        info!("XBEL importer closed the record queue");

        match result {
            Ok(()) => {
                info!(
                    bookmarks = summary.bookmarks,
                    aliases = summary.aliases,
                    alias_targets = summary.alias_targets,
                    invalid_dates = summary.invalid_dates,
                    ignored_elements = summary.ignored_elements,
                    duration_ms = start.elapsed().as_millis(),
                    "XBEL import completed"
                );
                Ok(summary)
            }
            Err(e) => {
                error!(
                    error = %e,
                    bookmarks = summary.bookmarks,
                    "XBEL import aborted"
                );
                Err(e)
            }
        }
    }
}

impl<R: BufRead + Send + 'static> XbelImporter<R> {
    /// Start the import on its own thread and return the consuming side.
    pub fn spawn(self) -> Result<ImportHandle, ImportError> {
        self.config.validate()?;
        let (producer, consumer) = queue::bounded(self.config.queue_capacity)?;
        let cancel = producer.cancel_handle();
        let worker = thread::Builder::new()
            .name("xbel-import".to_string())
            .spawn(move || self.run(producer))?;
        Ok(ImportHandle {
            consumer,
            cancel,
            worker,
        })
    }
}

/// Consumer side of a spawned import.
///
/// Dropping the handle before end of stream, with no other consumer left,
/// stops the producer thread and releases its input.
pub struct ImportHandle {
    consumer: RecordConsumer,
    cancel: CancelHandle,
    worker: JoinHandle<Result<ImportSummary, ImportError>>,
}

impl ImportHandle {
    /// Next record or end of stream; blocks until one is available.
    pub fn take(&self) -> ImportItem {
        self.consumer.take()
    }

    /// Additional consumer on the same queue.
    pub fn consumer(&self) -> RecordConsumer {
        self.consumer.clone()
    }

    /// Interrupt a producer blocked on a full queue.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Wait for the producer thread and return its outcome.
    pub fn join(self) -> Result<ImportSummary, ImportError> {
        self.worker
            .join()
            .map_err(|_| ImportError::WorkerPanicked)?
    }
}

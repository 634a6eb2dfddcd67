//! Record Hand-off Queue
//!
//! Bounded, blocking FIFO between the parsing thread and any number of
//! consumers. The producer blocks while the queue is full; consumers block while
//! it is empty. Dropping the producer closes the queue, after which consumers
//! drain what is pending and then observe [`ImportItem::EndOfStream`].
//! Dropping the last consumer disconnects the queue, which fails any further
//! or blocked [`RecordProducer::put`].

use crate::error::ImportError;
use crate::types::BookmarkRecord;
use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::{debug, trace};

/// Item handed to a consumer by [`RecordConsumer::take`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportItem {
    Record(BookmarkRecord),
    /// The producer is done; no further records will arrive.
    EndOfStream,
}

impl ImportItem {
    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, ImportItem::EndOfStream)
    }

    pub fn into_record(self) -> Option<BookmarkRecord> {
        match self {
            ImportItem::Record(record) => Some(record),
            ImportItem::EndOfStream => None,
        }
    }
}

/// Queue statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueueStats {
    /// Records waiting to be taken
    pub pending: usize,
    /// Records accepted from the producer
    pub enqueued: usize,
    /// Records handed to consumers
    pub taken: usize,
    /// Whether the producer has closed the queue
    pub closed: bool,
}

#[derive(Debug)]
struct QueueState {
    items: VecDeque<BookmarkRecord>,
    closed: bool,
    cancelled: bool,
    consumers: usize,
    enqueued: usize,
    taken: usize,
}

#[derive(Debug)]
struct Shared {
    state: Mutex<QueueState>,
    not_empty: Condvar,
    not_full: Condvar,
    capacity: usize,
}

impl Shared {
    fn close(&self) {
        let mut state = self.state.lock();
        if state.closed {
            return;
        }
        state.closed = true;
        debug!(
            pending = state.items.len(),
            enqueued = state.enqueued,
            "Record queue closed"
        );
        drop(state);
        self.not_empty.notify_all();
        self.not_full.notify_all();
    }
}

/// Create a bounded queue holding at most `capacity` pending records.
pub fn bounded(capacity: usize) -> Result<(RecordProducer, RecordConsumer), ImportError> {
    if capacity == 0 {
        return Err(ImportError::InvalidConfig(
            "queue capacity must be at least 1".to_string(),
        ));
    }
    let shared = Arc::new(Shared {
        state: Mutex::new(QueueState {
            items: VecDeque::with_capacity(capacity.min(1024)),
            closed: false,
            cancelled: false,
            consumers: 1,
            enqueued: 0,
            taken: 0,
        }),
        not_empty: Condvar::new(),
        not_full: Condvar::new(),
        capacity,
    });
    Ok((
        RecordProducer {
            shared: Arc::clone(&shared),
        },
        RecordConsumer { shared },
    ))
}

/// Producing end of the queue. Only one exists per queue.
///
/// Dropping it closes the queue, so every way out of a producer's scope
/// (normal return, `?`, panic) releases blocked consumers.
#[derive(Debug)]
pub struct RecordProducer {
    shared: Arc<Shared>,
}

impl RecordProducer {
    /// Enqueue a record, blocking while the queue is full.
    ///
    /// Fails with [`ImportError::Interrupted`] if the queue is cancelled before
    /// room becomes available, and with [`ImportError::Disconnected`] once every
    /// consumer is gone. The record is dropped in both cases.
    pub fn put(&self, record: BookmarkRecord) -> Result<(), ImportError> {
        let mut state = self.shared.state.lock();
        while state.items.len() >= self.shared.capacity
            && !state.cancelled
            && state.consumers > 0
        {
            trace!(capacity = self.shared.capacity, "Record queue full, producer waiting");
            self.shared.not_full.wait(&mut state);
        }
        if state.cancelled {
            return Err(ImportError::Interrupted);
        }
        if state.consumers == 0 {
            return Err(ImportError::Disconnected);
        }
        state.items.push_back(record);
        state.enqueued += 1;
        trace!(pending = state.items.len(), "Enqueued record");
        drop(state);
        self.shared.not_empty.notify_one();
        Ok(())
    }

    /// Handle that can interrupt a blocked [`put`](Self::put) from another thread.
    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Close the queue explicitly. Dropping the producer does the same.
    pub fn close(self) {
        drop(self);
    }

    pub fn stats(&self) -> QueueStats {
        stats_of(&self.shared)
    }
}

impl Drop for RecordProducer {
    fn drop(&mut self) {
        self.shared.close();
    }
}

/// Consuming end of the queue. Clones share the same queue.
#[derive(Debug)]
pub struct RecordConsumer {
    shared: Arc<Shared>,
}

impl RecordConsumer {
    /// Take the next record, blocking until one is available or the queue is
    /// closed and empty. Keeps returning `EndOfStream` once the stream is over.
    pub fn take(&self) -> ImportItem {
        let mut state = self.shared.state.lock();
        loop {
            if let Some(record) = state.items.pop_front() {
                state.taken += 1;
                trace!(pending = state.items.len(), "Took record");
                drop(state);
                self.shared.not_full.notify_one();
                return ImportItem::Record(record);
            }
            if state.closed {
                return ImportItem::EndOfStream;
            }
            self.shared.not_empty.wait(&mut state);
        }
    }

    /// Non-blocking variant of [`take`](Self::take); `None` when nothing is
    /// pending yet and the queue is still open.
    pub fn try_take(&self) -> Option<ImportItem> {
        let mut state = self.shared.state.lock();
        match state.items.pop_front() {
            Some(record) => {
                state.taken += 1;
                drop(state);
                self.shared.not_full.notify_one();
                Some(ImportItem::Record(record))
            }
            None if state.closed => Some(ImportItem::EndOfStream),
            None => None,
        }
    }

    /// Iterate over records until end of stream.
    pub fn records(&self) -> Records<'_> {
        Records {
            consumer: self,
            done: false,
        }
    }

    pub fn pending(&self) -> usize {
        self.shared.state.lock().items.len()
    }

    pub fn capacity(&self) -> usize {
        self.shared.capacity
    }

    pub fn stats(&self) -> QueueStats {
        stats_of(&self.shared)
    }
}

impl Clone for RecordConsumer {
    fn clone(&self) -> Self {
        self.shared.state.lock().consumers += 1;
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl Drop for RecordConsumer {
    fn drop(&mut self) {
        let mut state = self.shared.state.lock();
        state.consumers -= 1;
        if state.consumers > 0 {
            return;
        }
        debug!(pending = state.items.len(), "Last record consumer dropped");
        drop(state);
        self.shared.not_full.notify_all();
    }
}

/// Blocking iterator returned by [`RecordConsumer::records`].
pub struct Records<'a> {
    consumer: &'a RecordConsumer,
    done: bool,
}

impl Iterator for Records<'_> {
    type Item = BookmarkRecord;

    fn next(&mut self) -> Option<BookmarkRecord> {
        if self.done {
            return None;
        }
        let record = self.consumer.take().into_record();
        self.done = record.is_none();
        record
    }
}

/// Interrupts a producer blocked on a full queue.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    shared: Arc<Shared>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        let mut state = self.shared.state.lock();
        if state.cancelled {
            return;
        }
        state.cancelled = true;
        debug!(pending = state.items.len(), "Record queue cancelled");
        drop(state);
        self.shared.not_full.notify_all();
    }

    pub fn is_cancelled(&self) -> bool {
        self.shared.state.lock().cancelled
    }
}

fn stats_of(shared: &Shared) -> QueueStats {
    let state = shared.state.lock();
    QueueStats {
        pending: state.items.len(),
        enqueued: state.enqueued,
        taken: state.taken,
        closed: state.closed,
    }
}

use std::io::{self, BufReader, Cursor, Read};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use xbel_import::{ImportError, ImportItem, XbelImporter};

use crate::integration::support::{config, drain, flat_document, spawn, wait_until};

#[test]
fn fatal_error_mid_document_still_ends_stream() {
    let xml = r#"<xbel>
  <bookmark href="http://ok.example/"><title>OK</title></bookmark>
  <folder><title>Broken</title></bookmark>
  <bookmark href="http://never.example/"/>
</xbel>"#;
    let handle = spawn(xml, "R", 4);
    let records = drain(&handle);

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].url(), Some("http://ok.example/"));
    assert!(matches!(handle.join(), Err(ImportError::Xml(_))));
}

#[test]
fn fatal_error_skips_alias_drain() {
    let xml = r#"<xbel>
  <bookmark href="http://a.example/" id="a"/>
  <folder><title>X</title><alias ref="a"/></folder>
  <oops></xbel>"#;
    let handle = spawn(xml, "R", 4);
    let records = drain(&handle);
    assert_eq!(records.len(), 1);
    assert!(handle.join().is_err());
}

/// Yields `limit` bytes of the wrapped document, then fails.
struct FailingReader {
    inner: Cursor<Vec<u8>>,
    limit: usize,
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.limit == 0 {
            return Err(io::Error::new(io::ErrorKind::ConnectionReset, "source went away"));
        }
        let max = buf.len().min(self.limit);
        let n = self.inner.read(&mut buf[..max])?;
        self.limit -= n;
        Ok(n)
    }
}

#[test]
fn io_failure_still_ends_stream() {
    let doc = flat_document(20);
    let reader = BufReader::with_capacity(
        64,
        FailingReader {
            inner: Cursor::new(doc.into_bytes()),
            limit: 300,
        },
    );
    let handle = XbelImporter::new(reader, config("R", 4)).spawn().unwrap();
    let records = drain(&handle);

    assert!(records.len() < 20);
    assert!(handle.join().is_err());
}

#[test]
fn cancel_releases_blocked_producer() {
    let handle = spawn(&flat_document(50), "R", 1);
    let consumer = handle.consumer();
    assert!(wait_until(|| consumer.pending() == 1));

    handle.cancel();
    let records = drain(&handle);
    assert!(records.len() <= 2);
    assert!(matches!(handle.join(), Err(ImportError::Interrupted)));
}

#[test]
fn every_consumer_observes_end_of_stream() {
    let handle = spawn(&flat_document(40), "R", 2);
    let workers: Vec<_> = (0..3)
        .map(|_| {
            let consumer = handle.consumer();
            thread::spawn(move || {
                let mut taken = 0usize;
                while let ImportItem::Record(_) = consumer.take() {
                    taken += 1;
                }
                taken
            })
        })
        .collect();

    let total: usize = workers.into_iter().map(|w| w.join().unwrap()).sum();
    assert_eq!(total, 40);
    assert!(handle.take().is_end_of_stream());
    assert_eq!(handle.join().unwrap().bookmarks, 40);
}

/// Flags when the importer lets go of its input.
struct TrackedReader {
    inner: Cursor<Vec<u8>>,
    released: Arc<AtomicBool>,
}

impl Read for TrackedReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl Drop for TrackedReader {
    fn drop(&mut self) {
        self.released.store(true, Ordering::SeqCst);
    }
}

#[test]
fn dropping_handle_early_releases_input() {
    let released = Arc::new(AtomicBool::new(false));
    let reader = BufReader::new(TrackedReader {
        inner: Cursor::new(flat_document(50).into_bytes()),
        released: Arc::clone(&released),
    });
    let handle = XbelImporter::new(reader, config("R", 1)).spawn().unwrap();
    assert!(handle.take().into_record().is_some());

    drop(handle);
    assert!(wait_until(|| released.load(Ordering::SeqCst)));
}

#[test]
fn extra_consumer_keeps_import_alive_after_handle_drop() {
    let handle = spawn(&flat_document(10), "R", 1);
    let consumer = handle.consumer();
    drop(handle);

    let records: Vec<_> = consumer.records().collect();
    assert_eq!(records.len(), 10);
}

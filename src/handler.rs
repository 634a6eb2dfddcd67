//! XBEL state machine
//!
//! Turns XML callbacks into finished bookmark records. Structural context
//! (inside a bookmark or a folder) and text context (inside a title,
//! description or info block) are tracked separately because they change
//! independently: a `title` means a bookmark title under `Bookmark` and a new
//! folder level under `Folder`.

use crate::alias::AliasTable;
use crate::date;
use crate::error::ImportError;
use crate::folder::FolderPath;
use crate::queue::RecordProducer;
use crate::source::{Attributes, EventHandler};
use crate::types::{BookmarkField, BookmarkRecord};
use serde::Serialize;
use tracing::{debug, warn};

const ID_ATTRIBUTE: &str = "id";
const REF_ATTRIBUTE: &str = "ref";

/// Destination for finished records.
pub trait RecordSink {
    fn put(&mut self, record: BookmarkRecord) -> Result<(), ImportError>;
}

impl RecordSink for RecordProducer {
    fn put(&mut self, record: BookmarkRecord) -> Result<(), ImportError> {
        RecordProducer::put(self, record)
    }
}

impl RecordSink for Vec<BookmarkRecord> {
    fn put(&mut self, record: BookmarkRecord) -> Result<(), ImportError> {
        self.push(record);
        Ok(())
    }
}

/// Enclosing structural element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OuterState {
    None,
    Bookmark,
    Folder,
}

/// Enclosing text-bearing element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InnerState {
    None,
    Title,
    Description,
    Info,
}

/// XBEL elements the state machine reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum XbelElement {
    Bookmark,
    Folder,
    Desc,
    Title,
    Info,
    Metadata,
    Alias,
    Other,
}

impl XbelElement {
    fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "bookmark" => XbelElement::Bookmark,
            "folder" => XbelElement::Folder,
            "desc" => XbelElement::Desc,
            "title" => XbelElement::Title,
            "info" => XbelElement::Info,
            "metadata" => XbelElement::Metadata,
            "alias" => XbelElement::Alias,
            _ => XbelElement::Other,
        }
    }
}

/// Counters for one import run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    /// Primary bookmark records emitted
    pub bookmarks: usize,
    /// `alias` elements seen
    pub aliases: usize,
    /// Alias-target records emitted at end of document
    pub alias_targets: usize,
    /// Date attributes that could not be parsed
    pub invalid_dates: usize,
    /// Unrecognized elements that reset the parser state
    pub ignored_elements: usize,
}

/// Event handler building bookmark records for a [`RecordSink`].
pub struct XbelHandler<S: RecordSink> {
    sink: S,
    folder: FolderPath,
    aliases: AliasTable,
    bookmark: BookmarkRecord,
    outer: OuterState,
    inner: InnerState,
    capturing: bool,
    text: String,
    summary: ImportSummary,
}

impl<S: RecordSink> XbelHandler<S> {
    pub fn new(root_folder: &str, folder_separator: &str, sink: S) -> Self {
        Self {
            sink,
            folder: FolderPath::new(root_folder, folder_separator),
            aliases: AliasTable::new(),
            bookmark: BookmarkRecord::new(),
            outer: OuterState::None,
            inner: InnerState::None,
            capturing: false,
            text: String::new(),
            summary: ImportSummary::default(),
        }
    }

    pub fn folder_path(&self) -> &str {
        self.folder.as_str()
    }

    pub fn outer_state(&self) -> OuterState {
        self.outer
    }

    pub fn inner_state(&self) -> InnerState {
        self.inner
    }

    pub fn is_capturing(&self) -> bool {
        self.capturing
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    pub fn summary(&self) -> &ImportSummary {
        &self.summary
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    fn start_bookmark(&mut self, attributes: &dyn Attributes) {
        let mut record = BookmarkRecord::new();
        let url = BookmarkField::Url
            .xbel_attribute()
            .and_then(|name| attributes.value(name))
            .unwrap_or_default();
        record.set(BookmarkField::Url, url);

        for field in BookmarkField::dates() {
            let Some(raw) = field.xbel_attribute().and_then(|name| attributes.value(name)) else {
                continue;
            };
            match date::normalize(raw) {
                Ok(value) => record.set(field, value),
                Err(e) => {
                    self.summary.invalid_dates += 1;
                    debug!(field = %field, url, error = %e, "Ignoring unparseable bookmark date");
                }
            }
        }

        match attributes.value(ID_ATTRIBUTE) {
            Some(id) => {
                self.aliases.refresh(id, self.folder.as_str(), record.url());
            }
            None => debug!(url, "Bookmark has no id; it cannot be aliased"),
        }

        self.bookmark = record;
        self.outer = OuterState::Bookmark;
        self.inner = InnerState::None;
        self.capturing = false;
    }

    fn start_alias(&mut self, attributes: &dyn Attributes) {
        self.summary.aliases += 1;
        let Some(id) = attributes.value(REF_ATTRIBUTE) else {
            debug!(folder = %self.folder.as_str(), "Ignoring alias without ref");
            return;
        };
        let index = self.aliases.refresh(id, self.folder.as_str(), None);
        self.aliases.mark_target(index);
    }

    fn end_bookmark(&mut self) -> Result<(), ImportError> {
        if !self.bookmark.is_empty() {
            let mut record = std::mem::take(&mut self.bookmark);
            record.set(BookmarkField::Folders, self.folder.as_str());
            self.sink.put(record)?;
            self.summary.bookmarks += 1;
        }
        self.outer = OuterState::Folder;
        Ok(())
    }
}

impl<S: RecordSink> EventHandler for XbelHandler<S> {
    fn start_element(
        &mut self,
        name: &str,
        attributes: &dyn Attributes,
    ) -> Result<(), ImportError> {
        match XbelElement::from_name(name) {
            XbelElement::Bookmark => self.start_bookmark(attributes),
            XbelElement::Folder => {
                self.outer = OuterState::Folder;
                self.inner = InnerState::None;
            }
            XbelElement::Desc => {
                self.inner = InnerState::Description;
                self.capturing = true;
            }
            XbelElement::Title => {
                self.inner = InnerState::Title;
                self.capturing = true;
            }
            XbelElement::Info => {
                self.inner = InnerState::Info;
                self.capturing = false;
            }
            XbelElement::Metadata => {}
            XbelElement::Alias => self.start_alias(attributes),
            XbelElement::Other => {
                self.summary.ignored_elements += 1;
                self.outer = OuterState::None;
                self.inner = InnerState::None;
                self.capturing = false;
            }
        }
        Ok(())
    }

    fn end_element(&mut self, name: &str) -> Result<(), ImportError> {
        match XbelElement::from_name(name) {
            XbelElement::Bookmark => self.end_bookmark()?,
            XbelElement::Folder => {
                self.folder.pop();
                self.outer = OuterState::Folder;
            }
            XbelElement::Info => self.inner = InnerState::None,
            XbelElement::Metadata => self.inner = InnerState::Info,
            _ => {}
        }
        Ok(())
    }

    fn characters(&mut self, text: &str) -> Result<(), ImportError> {
        if !self.capturing {
            return Ok(());
        }
        self.text.push_str(text);
        match (self.outer, self.inner) {
            (OuterState::Bookmark, InnerState::Description) => {
                self.bookmark.set(BookmarkField::Description, self.text.as_str());
            }
            (OuterState::Bookmark, InnerState::Title) => {
                self.bookmark.set(BookmarkField::Title, self.text.as_str());
            }
            (OuterState::Folder, InnerState::Title) => self.folder.push(&self.text),
            _ => {}
        }
        self.text.clear();
        self.capturing = false;
        Ok(())
    }

    fn end_document(&mut self) -> Result<(), ImportError> {
        let targets = self.aliases.drain_targets();
        debug!(count = targets.len(), "Emitting alias targets");
        for record in targets {
            if record.url().is_none() {
                warn!(
                    folders = record.folders().unwrap_or_default(),
                    "Alias refers to a bookmark that was never defined"
                );
            }
            self.sink.put(record)?;
            self.summary.alias_targets += 1;
        }
        Ok(())
    }
}

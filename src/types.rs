//! Core types for the XBEL importer: record field keys and the bookmark record.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Delimiter between folder paths in a FOLDERS value that lists several locations.
pub const FOLDER_LIST_DELIMITER: char = ',';

/// Field of a bookmark record
///
/// Variant order is the serialization order of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BookmarkField {
    Url,
    DateAdded,
    DateVisited,
    DateModified,
    Folders,
    Title,
    Description,
}

impl BookmarkField {
    pub const ALL: [BookmarkField; 7] = [
        BookmarkField::Url,
        BookmarkField::DateAdded,
        BookmarkField::DateVisited,
        BookmarkField::DateModified,
        BookmarkField::Folders,
        BookmarkField::Title,
        BookmarkField::Description,
    ];

    /// Key used by downstream importers
    pub fn key(self) -> &'static str {
        match self {
            BookmarkField::Url => "url",
            BookmarkField::DateAdded => "date_added",
            BookmarkField::DateVisited => "date_visited",
            BookmarkField::DateModified => "date_modified",
            BookmarkField::Folders => "folders",
            BookmarkField::Title => "title",
            BookmarkField::Description => "desc",
        }
    }

    /// Attribute carrying this field on an XBEL `bookmark` element, if any.
    ///
    /// Folders, title and description are derived from document structure.
    pub fn xbel_attribute(self) -> Option<&'static str> {
        match self {
            BookmarkField::Url => Some("href"),
            BookmarkField::DateAdded => Some("added"),
            BookmarkField::DateVisited => Some("visited"),
            BookmarkField::DateModified => Some("modified"),
            BookmarkField::Folders | BookmarkField::Title | BookmarkField::Description => None,
        }
    }

    /// Date fields, in the order they are read from a `bookmark` element.
    pub fn dates() -> [BookmarkField; 3] {
        [
            BookmarkField::DateAdded,
            BookmarkField::DateVisited,
            BookmarkField::DateModified,
        ]
    }
}

impl fmt::Display for BookmarkField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A bookmark as handed to downstream importers: field to string value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookmarkRecord {
    fields: BTreeMap<BookmarkField, String>,
}

impl BookmarkRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: BookmarkField) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    /// Set a field, replacing any previous value.
    pub fn set(&mut self, field: BookmarkField, value: impl Into<String>) {
        self.fields.insert(field, value.into());
    }

    pub fn remove(&mut self, field: BookmarkField) -> Option<String> {
        self.fields.remove(&field)
    }

    pub fn contains(&self, field: BookmarkField) -> bool {
        self.fields.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn url(&self) -> Option<&str> {
        self.get(BookmarkField::Url)
    }

    pub fn title(&self) -> Option<&str> {
        self.get(BookmarkField::Title)
    }

    pub fn folders(&self) -> Option<&str> {
        self.get(BookmarkField::Folders)
    }

    /// Individual folder paths listed in FOLDERS.
    pub fn folder_list(&self) -> Vec<&str> {
        self.folders()
            .map(|f| f.split(FOLDER_LIST_DELIMITER).collect())
            .unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BookmarkField, &str)> {
        self.fields.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

impl Serialize for BookmarkRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (field, value) in &self.fields {
            map.serialize_entry(field.key(), value)?;
        }
        map.end()
    }
}

//! Alias bookkeeping
//!
//! Bookmark definitions and `alias` elements both refresh an entry keyed by the
//! bookmark identifier. Entries live in an arena; the alias set stores arena
//! indices, so an entry updated after it joined the set is drained with its
//! final FOLDERS value.

use crate::types::{BookmarkField, BookmarkRecord, FOLDER_LIST_DELIMITER};
use std::collections::{HashMap, HashSet};

/// Index of an entry in the alias arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryIndex(usize);

/// Identifier-keyed reference records plus the set of alias targets.
#[derive(Debug, Default)]
pub struct AliasTable {
    entries: Vec<BookmarkRecord>,
    by_id: HashMap<String, EntryIndex>,
    targets: Vec<EntryIndex>,
    target_set: HashSet<EntryIndex>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the current folder for `id`.
    ///
    /// An existing entry gets `,<folder>` appended to its FOLDERS; a new entry
    /// starts with FOLDERS equal to `folder`. When `url` is given it replaces
    /// the entry's URL.
    pub fn refresh(&mut self, id: &str, folder: &str, url: Option<&str>) -> EntryIndex {
        let index = match self.by_id.get(id) {
            Some(index) => {
                let entry = &mut self.entries[index.0];
                let mut folders = entry
                    .remove(BookmarkField::Folders)
                    .unwrap_or_default();
                folders.push(FOLDER_LIST_DELIMITER);
                folders.push_str(folder);
                entry.set(BookmarkField::Folders, folders);
                *index
            }
            None => {
                let index = EntryIndex(self.entries.len());
                let mut entry = BookmarkRecord::new();
                entry.set(BookmarkField::Folders, folder);
                self.entries.push(entry);
                self.by_id.insert(id.to_string(), index);
                index
            }
        };
        if let Some(url) = url {
            self.entries[index.0].set(BookmarkField::Url, url);
        }
        index
    }

    /// Mark an entry as an alias target. Returns false if it already was one.
    pub fn mark_target(&mut self, index: EntryIndex) -> bool {
        if self.target_set.insert(index) {
            self.targets.push(index);
            true
        } else {
            false
        }
    }

    pub fn get(&self, id: &str) -> Option<&BookmarkRecord> {
        self.by_id.get(id).map(|index| &self.entries[index.0])
    }

    pub fn entry(&self, index: EntryIndex) -> &BookmarkRecord {
        &self.entries[index.0]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    /// Take every alias target, in first-reference order, and clear the table.
    pub fn drain_targets(&mut self) -> Vec<BookmarkRecord> {
        let mut entries: Vec<Option<BookmarkRecord>> =
            std::mem::take(&mut self.entries).into_iter().map(Some).collect();
        let drained = self
            .targets
            .drain(..)
            .filter_map(|index| entries[index.0].take())
            .collect();
        self.by_id.clear();
        self.target_set.clear();
        drained
    }
}

//! Folder path accumulator.
//!
//! Tracks the current position in the folder hierarchy as a single string:
//! the root name followed by `separator + title` for every open folder.

/// Current folder path, rooted at a fixed, non-removable prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderPath {
    root: String,
    separator: String,
    path: String,
}

impl FolderPath {
    pub fn new(root: impl Into<String>, separator: impl Into<String>) -> Self {
        let root = root.into();
        Self {
            path: root.clone(),
            root,
            separator: separator.into(),
        }
    }

    /// Open a folder level named `title`.
    pub fn push(&mut self, title: &str) {
        self.path.push_str(&self.separator);
        self.path.push_str(title);
    }

    /// Close the innermost folder level.
    ///
    /// Truncates back to the last separator. Never removes the root; returns
    /// false when the path already is the root.
    pub fn pop(&mut self) -> bool {
        if self.is_root() {
            return false;
        }
        let cut = self
            .path
            .rfind(self.separator.as_str())
            .filter(|idx| *idx >= self.root.len())
            .unwrap_or(self.root.len());
        self.path.truncate(cut);
        true
    }

    pub fn is_root(&self) -> bool {
        self.path == self.root
    }

    pub fn as_str(&self) -> &str {
        &self.path
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Back to the bare root.
    pub fn reset(&mut self) {
        self.path.clear();
        self.path.push_str(&self.root);
    }
}

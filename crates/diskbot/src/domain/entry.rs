/// Kind of one item reported by a folder listing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
}

/// A single item contained in a remote folder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirectoryEntry {
    /// Whether this entry is a file or a folder.
    pub kind: EntryKind,
    /// Display name (last path segment).
    pub name: String,
    /// Provider path used for follow-up calls (e.g., `disk:/pics/dog.png`).
    pub path: String,
}

impl DirectoryEntry {
    /// Creates a file entry.
    pub fn file(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            kind: EntryKind::File,
            name: name.into(),
            path: path.into(),
        }
    }

    /// Creates a folder entry.
    pub fn directory(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            kind: EntryKind::Directory,
            name: name.into(),
            path: path.into(),
        }
    }

    /// Returns whether this entry is a folder.
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

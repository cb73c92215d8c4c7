use std::fs::Metadata;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// A single file-system object surfaced by a listing.
///
/// Entries are rebuilt on every listing call. `path` is the identity within a
/// pass; timestamps only feed sorting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// The entry's base name.
    pub name: String,

    /// Absolute, platform-native path.
    pub path: PathBuf,

    /// What kind of entry this is.
    pub kind: EntryKind,

    /// Last modification time.
    pub modified: SystemTime,

    /// Creation (birth) time. Falls back to `modified` where the platform
    /// does not record it.
    pub created: SystemTime,

    /// Directory this entry was listed under, for display grouping only.
    pub parent: Option<PathBuf>,

    /// Set by [`Explorer::annotate`](crate::Explorer::annotate) when the path
    /// is in the caller's bookmark store.
    pub bookmarked: bool,
}

impl Entry {
    /// Build an entry from a fresh stat result.
    pub(crate) fn from_metadata(path: &Path, meta: &Metadata, parent: Option<&Path>) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let modified = meta.modified().unwrap_or(SystemTime::UNIX_EPOCH);
        let created = meta.created().unwrap_or(modified);
        let kind = if meta.is_dir() {
            EntryKind::Dir
        } else {
            EntryKind::File
        };

        Self {
            name,
            path: path.to_path_buf(),
            kind,
            modified,
            created,
            parent: parent.map(Path::to_path_buf),
            bookmarked: false,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }
}

/// The kind of a listed entry.
///
/// Symlinks are resolved by stat, so they surface as whatever they point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// A regular file (or anything that is not a directory).
    File,

    /// A directory. Terminal in flat mode, expandable in tree mode.
    Dir,
}

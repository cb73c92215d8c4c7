use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::entry::Entry;

/// The key files are ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    Name,
    Created,
    #[default]
    Modified,
}

impl SortBy {
    /// Every key, in the order a "select sort by" picker presents them.
    pub const ALL: [SortBy; 3] = [SortBy::Name, SortBy::Created, SortBy::Modified];

    /// The next key in [`SortBy::ALL`], wrapping around.
    pub fn next(self) -> Self {
        match self {
            SortBy::Name => SortBy::Created,
            SortBy::Created => SortBy::Modified,
            SortBy::Modified => SortBy::Name,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn toggle(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    fn apply(self, ord: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    }
}

/// Orders a listing for display.
///
/// Directories are pulled to the front in their original order and only files
/// are sorted, whatever the direction. The sort is stable: entries with equal
/// keys keep their discovery order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortingStrategy {
    pub key: SortBy,
    pub direction: SortDirection,
}

impl SortingStrategy {
    pub fn new(key: SortBy, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Return a sorted copy of `entries`.
    pub fn sort(&self, entries: &[Entry]) -> Vec<Entry> {
        let (mut out, mut files): (Vec<Entry>, Vec<Entry>) =
            entries.iter().cloned().partition(Entry::is_dir);

        files.sort_by(|a, b| self.direction.apply(self.compare(a, b)));
        out.append(&mut files);
        out
    }

    fn compare(&self, a: &Entry, b: &Entry) -> Ordering {
        match self.key {
            SortBy::Name => compare_names(&a.name, &b.name),
            SortBy::Created => a.created.cmp(&b.created),
            SortBy::Modified => a.modified.cmp(&b.modified),
        }
    }
}

/// Case-insensitive comparison with a byte-wise tiebreak, so `apple` sorts
/// next to `Apple` rather than after every uppercase name.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

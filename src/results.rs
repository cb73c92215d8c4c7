use std::time::Duration;

use crate::entry::Entry;

/// The raw output of one directory scan, partitioned by kind.
///
/// Both vectors are in discovery order. Callers that need a display order
/// sort afterwards with a [`SortingStrategy`](crate::SortingStrategy).
#[derive(Debug, Default)]
pub struct ScanOutcome {
    /// Directories that survived exclude pruning.
    pub directories: Vec<Entry>,

    /// Files that survived exclude filtering. Include patterns are not
    /// applied here; that is the listing strategy's job.
    pub files: Vec<Entry>,

    /// Scan statistics, for diagnostics.
    pub stats: ScanStats,
}

/// Statistics for a completed scan.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScanStats {
    /// Files yielded.
    pub files: usize,

    /// Directories yielded.
    pub dirs: usize,

    /// Entries dropped because they could not be read or stat'ed
    /// (usually deleted mid-walk).
    pub skipped: usize,

    /// Wall-clock time from scan start to completion.
    pub duration: Duration,
}

impl ScanStats {
    pub(crate) fn compute(files: usize, dirs: usize, skipped: usize, duration: Duration) -> Self {
        Self {
            files,
            dirs,
            skipped,
            duration,
        }
    }

    /// Total entries yielded.
    pub fn total(&self) -> usize {
        self.files + self.dirs
    }
}

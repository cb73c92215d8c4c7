use std::path::{Path, PathBuf};
use std::time::Instant;

use ignore::{DirEntry, WalkBuilder};
use tracing::debug;

use crate::entry::Entry;
use crate::error::ExplorerError;
use crate::pattern::{normalize_separators, PatternMatcher};
use crate::results::{ScanOutcome, ScanStats};

// ---------------------------------------------------------------------------
// Depth
// ---------------------------------------------------------------------------

/// How far below the root a scan descends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Depth {
    /// Immediate children only. Used by tree listing and directory expansion.
    Shallow,

    /// The whole subtree. Used by flat listing.
    Unbounded,
}

impl Depth {
    fn max_depth(self) -> Option<usize> {
        match self {
            Depth::Shallow => Some(1),
            Depth::Unbounded => None,
        }
    }
}

// ---------------------------------------------------------------------------
// scan()
// ---------------------------------------------------------------------------

/// Walk `dir` and return its surviving entries.
///
/// Hidden (dot-prefixed) entries are skipped. Directories that `matcher`
/// excludes are pruned whole; excluded files are dropped. Patterns see paths
/// relative to `base`, the workspace root, so `dir` may be any directory
/// below it. Include patterns are *not* applied.
///
/// The walk is sequential. An unreadable or missing `dir` yields an empty
/// outcome; entries that vanish before they can be stat'ed are dropped.
pub fn scan(dir: &Path, base: &Path, depth: Depth, matcher: &PatternMatcher) -> ScanOutcome {
    let start = Instant::now();

    let mut builder = WalkBuilder::new(dir);
    builder
        .standard_filters(false)
        .hidden(true)
        .follow_links(false)
        .same_file_system(false)
        .max_depth(depth.max_depth());

    let prune_base = base.to_path_buf();
    let prune_matcher = matcher.clone();
    builder.filter_entry(move |entry| keep_entry(&prune_base, &prune_matcher, entry));

    let mut directories = Vec::new();
    let mut files = Vec::new();
    let mut skipped = 0usize;

    for res in builder.build() {
        let entry = match res {
            Ok(e) => e,
            Err(e) => {
                debug!(error = %map_walk_error(e), "skipping unreadable path");
                skipped += 1;
                continue;
            }
        };

        // Skip the root itself
        if entry.depth() == 0 {
            continue;
        }

        // Stat through symlinks; a failure means the entry went away mid-walk.
        let meta = match std::fs::metadata(entry.path()) {
            Ok(m) => m,
            Err(err) => {
                debug!(path = %entry.path().display(), %err, "dropping entry that failed to stat");
                skipped += 1;
                continue;
            }
        };

        let parent = match depth {
            Depth::Shallow => Some(dir),
            Depth::Unbounded => None,
        };
        let item = Entry::from_metadata(entry.path(), &meta, parent);

        if item.is_dir() {
            directories.push(item);
        } else {
            files.push(item);
        }
    }

    let stats = ScanStats::compute(files.len(), directories.len(), skipped, start.elapsed());
    debug!(
        dir = %dir.display(),
        ?depth,
        files = stats.files,
        dirs = stats.dirs,
        skipped = stats.skipped,
        elapsed_ms = stats.duration.as_millis() as u64,
        "scan complete"
    );

    ScanOutcome {
        directories,
        files,
        stats,
    }
}

/// `path` relative to `base`, with `/` separators.
///
/// Falls back to the whole path when `path` is not under `base`.
pub fn relative_path(base: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(base).unwrap_or(path);
    normalize_separators(&rel.to_string_lossy()).into_owned()
}

fn keep_entry(base: &Path, matcher: &PatternMatcher, entry: &DirEntry) -> bool {
    if entry.depth() == 0 || !matcher.has_excludes() {
        return true;
    }

    let rel = relative_path(base, entry.path());
    let is_dir = entry.file_type().map(|ft| ft.is_dir()).unwrap_or(false);
    if is_dir {
        !matcher.prunes_dir(&rel)
    } else {
        !matcher.matches_exclude(&rel)
    }
}

// ---------------------------------------------------------------------------
// Map ignore::Error to ExplorerError
// ---------------------------------------------------------------------------

fn map_walk_error(e: ignore::Error) -> ExplorerError {
    match e {
        ignore::Error::WithPath { path, err } => match *err {
            ignore::Error::Io(io_err) => ExplorerError::from_io(path, io_err),
            other => ExplorerError::Io {
                path,
                source: std::io::Error::other(other.to_string()),
            },
        },
        ignore::Error::WithDepth { err, .. } => map_walk_error(*err),
        ignore::Error::Loop { child, .. } => ExplorerError::Io {
            path: child,
            source: std::io::Error::other("symlink loop"),
        },
        ignore::Error::Io(io_err) => ExplorerError::from_io(PathBuf::new(), io_err),
        other => ExplorerError::Io {
            path: PathBuf::new(),
            source: std::io::Error::other(other.to_string()),
        },
    }
}

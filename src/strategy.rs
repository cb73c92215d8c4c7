use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::entry::Entry;
use crate::pattern::PatternMatcher;
use crate::scanner::{relative_path, scan, Depth};

/// How a listing is assembled for display.
///
/// The set is closed: a flat list of every matching file, or a tree expanded
/// one directory at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingStrategy {
    /// Every matching file under the root, no directories.
    Flat,

    /// Immediate children of one directory, directories first.
    Tree,
}

impl ListingStrategy {
    /// List the top level of `root`.
    ///
    /// Never fails: a missing or unreadable root produces an empty listing.
    pub fn list_root<I, E>(self, root: &Path, includes: &[I], excludes: &[E]) -> Vec<Entry>
    where
        I: AsRef<str>,
        E: AsRef<str>,
    {
        let matcher = PatternMatcher::new(includes, excludes);
        match self {
            ListingStrategy::Flat => flat(root, root, &matcher),
            ListingStrategy::Tree => one_level(root, root, &matcher),
        }
    }

    /// List the children of `directory`, a directory under the workspace
    /// `root`, for lazy expansion.
    ///
    /// In tree mode this is the same single-level listing as [`list_root`].
    /// Patterns are still evaluated against paths relative to `root`, so an
    /// expanded directory hides exactly what the root listing would. A
    /// directory that has disappeared yields an empty listing.
    ///
    /// [`list_root`]: ListingStrategy::list_root
    pub fn list_children<I, E>(
        self,
        root: &Path,
        directory: &Path,
        includes: &[I],
        excludes: &[E],
    ) -> Vec<Entry>
    where
        I: AsRef<str>,
        E: AsRef<str>,
    {
        if !directory.is_dir() {
            debug!(dir = %directory.display(), "expansion target is gone, returning no children");
            return Vec::new();
        }

        let matcher = PatternMatcher::new(includes, excludes);
        match self {
            ListingStrategy::Flat => flat(directory, root, &matcher),
            ListingStrategy::Tree => one_level(directory, root, &matcher),
        }
    }
}

fn flat(dir: &Path, root: &Path, matcher: &PatternMatcher) -> Vec<Entry> {
    scan(dir, root, Depth::Unbounded, matcher)
        .files
        .into_iter()
        .filter(|file| matcher.should_display(&relative_path(root, &file.path)))
        .collect()
}

/// Directories pass on exclude alone (the scan already pruned those); files
/// must also pass include.
fn one_level(dir: &Path, root: &Path, matcher: &PatternMatcher) -> Vec<Entry> {
    let outcome = scan(dir, root, Depth::Shallow, matcher);

    let mut entries = outcome.directories;
    entries.extend(
        outcome
            .files
            .into_iter()
            .filter(|file| matcher.should_display(&relative_path(root, &file.path))),
    );
    entries
}

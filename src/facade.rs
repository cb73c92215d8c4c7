use std::collections::HashMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use tracing::{debug, info, warn};

use crate::bookmarks::BookmarkStore;
use crate::builder::ListingRequest;
use crate::config::{ExplorerConfig, ViewMode};
use crate::entry::Entry;
use crate::error::{ExplorerError, Result};
use crate::strategy::ListingStrategy;

/// Entry point for listing workspaces and creating notes.
///
/// `Explorer` holds no state: every call works purely on its arguments and
/// the live file system, so one value can be shared freely across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct Explorer;

impl Explorer {
    pub fn new() -> Self {
        Self
    }

    // ── Listing ───────────────────────────────────────────────────────────

    /// Entries for `request`, in discovery order.
    ///
    /// Modes without a listing strategy of their own list flat. When the
    /// request names a directory to expand, only its children are returned.
    pub fn entries(&self, request: &ListingRequest) -> Vec<Entry> {
        let strategy = request.mode.listing_strategy();
        match &request.expand {
            Some(dir) => strategy.list_children(&request.root, dir, &request.includes, &request.excludes),
            None => strategy.list_root(&request.root, &request.includes, &request.excludes),
        }
    }

    /// Children of `directory` under `mode`, for lazy tree expansion.
    ///
    /// Patterns are matched relative to the workspace `root`.
    pub fn children<I, E>(
        &self,
        root: &Path,
        directory: &Path,
        includes: &[I],
        excludes: &[E],
        mode: ViewMode,
    ) -> Vec<Entry>
    where
        I: AsRef<str>,
        E: AsRef<str>,
    {
        mode.listing_strategy().list_children(root, directory, includes, excludes)
    }

    /// List every root with `config`'s patterns and mode, concatenate, and
    /// sort for display.
    ///
    /// In bookmark mode the root listing is flat; use
    /// [`bookmarked_entries`](Explorer::bookmarked_entries) for the bookmark view.
    pub fn list_workspace(&self, roots: &[PathBuf], config: &ExplorerConfig) -> Vec<Entry> {
        let all: Vec<Entry> = roots
            .iter()
            .flat_map(|root| self.entries(&ListingRequest::from_config(root, config)))
            .collect();
        config.sorting().sort(&all)
    }

    /// The bookmark view: bookmarked files visible under the configured
    /// patterns, most recently bookmarked first.
    ///
    /// Bookmarks pointing at paths that no longer list are skipped, not
    /// reported.
    pub fn bookmarked_entries(&self, roots: &[PathBuf], config: &ExplorerConfig, store: &BookmarkStore) -> Vec<Entry> {
        if store.is_empty() {
            return Vec::new();
        }

        let rank: HashMap<&Path, usize> = store
            .paths_by_recency()
            .into_iter()
            .enumerate()
            .map(|(i, p)| (p, i))
            .collect();

        let mut marked: Vec<Entry> = roots
            .iter()
            .flat_map(|root| {
                ListingStrategy::Flat.list_root(root, &config.include_patterns, &config.exclude_patterns)
            })
            .filter(|entry| !entry.is_dir() && rank.contains_key(entry.path.as_path()))
            .map(|mut entry| {
                entry.bookmarked = true;
                entry
            })
            .collect();

        marked.sort_by_key(|entry| rank.get(entry.path.as_path()).copied().unwrap_or(usize::MAX));
        marked
    }

    /// Set the bookmark flag on every entry whose path is in `store`.
    pub fn annotate(&self, entries: &mut [Entry], store: &BookmarkStore) {
        for entry in entries {
            entry.bookmarked = store.contains(&entry.path);
        }
    }

    // ── Notes ─────────────────────────────────────────────────────────────

    /// Create `YYYYMMDD_<title>.md` in `directory` using today's local date.
    ///
    /// See [`create_note_on`](Explorer::create_note_on).
    pub fn create_note(&self, directory: &Path, title: &str) -> Result<PathBuf> {
        self.create_note_on(directory, title, Local::now().date_naive())
    }

    /// Create a note named after `date` and `title`, with `# <title>` as its
    /// content, and return its path.
    ///
    /// If the name is taken, `_1`, `_2`, … are appended until a free one is
    /// found. Each candidate is created with `create_new`, so two callers
    /// racing on the same title never end up sharing a file.
    ///
    /// # Errors
    ///
    /// `InvalidName` for an empty title or one containing a path separator;
    /// any I/O failure other than a name collision is returned as is.
    pub fn create_note_on(&self, directory: &Path, title: &str, date: NaiveDate) -> Result<PathBuf> {
        if title.trim().is_empty() || title.contains(['/', '\\']) {
            return Err(ExplorerError::InvalidName(title.to_string()));
        }

        let base = format!("{}_{}", date.format("%Y%m%d"), title);
        let content = format!("# {title}");

        let mut counter = 0usize;
        loop {
            let file_name = if counter == 0 {
                format!("{base}.md")
            } else {
                format!("{base}_{counter}.md")
            };
            let path = directory.join(&file_name);

            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => {
                    write_or_remove(&path, file, &content)?;
                    info!(path = %path.display(), "created note");
                    return Ok(path);
                }
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                    debug!(candidate = %file_name, "note name taken, trying next suffix");
                    counter += 1;
                }
                Err(e) => return Err(ExplorerError::from_io(&path, e)),
            }
        }
    }
}

/// Write `content` to the freshly created `path`, removing it again if the
/// write fails so no empty note is left behind.
fn write_or_remove<W: Write>(path: &Path, mut file: W, content: &str) -> Result<()> {
    if let Err(err) = file.write_all(content.as_bytes()).and_then(|()| file.flush()) {
        drop(file);
        if let Err(remove_err) = std::fs::remove_file(path) {
            warn!(path = %path.display(), %remove_err, "failed to remove partially written note");
        }
        return Err(ExplorerError::from_io(path, err));
    }
    Ok(())
}

/// The folder description shown beside a file in flat mode.
///
/// Relative to the workspace root containing `path`, with the top-level
/// folder dropped; `.` for files directly in the root. Paths outside every
/// root show their full parent directory.
pub fn relative_folder(path: &Path, roots: &[PathBuf]) -> String {
    let parent_of = |p: &Path| p.parent().map(Path::to_path_buf).unwrap_or_default();

    let Some(rel) = roots.iter().find_map(|root| path.strip_prefix(root).ok()) else {
        return parent_of(path).to_string_lossy().into_owned();
    };

    let dir = parent_of(rel);
    let parts: Vec<_> = dir.components().collect();
    match parts.len() {
        0 => ".".to_string(),
        1 => dir.to_string_lossy().into_owned(),
        _ => parts[1..]
            .iter()
            .collect::<PathBuf>()
            .to_string_lossy()
            .into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_folder_drops_top_level_dir() {
        let roots = vec![PathBuf::from("/w")];
        assert_eq!(relative_folder(Path::new("/w/a.md"), &roots), ".");
        assert_eq!(relative_folder(Path::new("/w/docs/a.md"), &roots), "docs");
        assert_eq!(
            relative_folder(Path::new("/w/docs/api/v1/a.md"), &roots),
            Path::new("api").join("v1").to_string_lossy()
        );
    }

    #[test]
    fn relative_folder_outside_roots_is_full_parent() {
        let roots = vec![PathBuf::from("/w")];
        assert_eq!(relative_folder(Path::new("/elsewhere/x/a.md"), &roots), "/elsewhere/x");
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("disk full"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn failed_note_write_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("20240102_x.md");
        std::fs::write(&path, "").unwrap();

        let err = write_or_remove(&path, FailingWriter, "# x").unwrap_err();
        assert!(matches!(err, ExplorerError::Io { .. }), "{err:?}");
        assert!(!path.exists());
    }

    #[test]
    fn successful_note_write_keeps_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("20240102_y.md");
        let file = std::fs::File::create(&path).unwrap();

        write_or_remove(&path, file, "# y").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# y");
    }

    #[test]
    fn note_titles_with_separators_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let err = Explorer::new().create_note_on(dir.path(), "a/b", date).unwrap_err();
        assert!(matches!(err, ExplorerError::InvalidName(_)));
        let err = Explorer::new().create_note_on(dir.path(), "  ", date).unwrap_err();
        assert!(matches!(err, ExplorerError::InvalidName(_)));
    }
}

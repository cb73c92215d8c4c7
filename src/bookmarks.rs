use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// One bookmarked path and when it was marked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub file_path: PathBuf,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

/// Caller-owned set of bookmarked paths.
///
/// The store only records paths; it never checks they still exist. Persisting
/// it is up to the host (it round-trips through serde as a plain list).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookmarkStore {
    bookmarks: Vec<Bookmark>,
}

impl BookmarkStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bookmark `path` now. Returns `false` if it was already bookmarked.
    pub fn add(&mut self, path: impl Into<PathBuf>) -> bool {
        self.add_at(path, chrono::Utc::now().timestamp_millis())
    }

    /// Bookmark `path` with an explicit timestamp.
    pub fn add_at(&mut self, path: impl Into<PathBuf>, timestamp: i64) -> bool {
        let path = path.into();
        if self.contains(&path) {
            return false;
        }
        self.bookmarks.push(Bookmark {
            file_path: path,
            timestamp,
        });
        true
    }

    /// Returns `false` if `path` was not bookmarked.
    pub fn remove(&mut self, path: &Path) -> bool {
        let before = self.bookmarks.len();
        self.bookmarks.retain(|b| b.file_path != path);
        self.bookmarks.len() != before
    }

    /// Flip the bookmark state of `path`. Returns the new state.
    pub fn toggle(&mut self, path: &Path) -> bool {
        if self.remove(path) {
            false
        } else {
            self.add(path)
        }
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.bookmarks.iter().any(|b| b.file_path == path)
    }

    pub fn clear(&mut self) {
        self.bookmarks.clear();
    }

    pub fn len(&self) -> usize {
        self.bookmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookmarks.is_empty()
    }

    /// Bookmarked paths, most recently added first.
    pub fn paths_by_recency(&self) -> Vec<&Path> {
        let mut sorted: Vec<&Bookmark> = self.bookmarks.iter().collect();
        sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        sorted.into_iter().map(|b| b.file_path.as_path()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bookmark> {
        self.bookmarks.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_is_idempotent_and_toggle_flips() {
        let mut store = BookmarkStore::new();
        assert!(store.add("/w/a.md"));
        assert!(!store.add("/w/a.md"));
        assert_eq!(store.len(), 1);

        assert!(!store.toggle(Path::new("/w/a.md")));
        assert!(store.is_empty());
        assert!(store.toggle(Path::new("/w/a.md")));
        assert!(store.contains(Path::new("/w/a.md")));
    }

    #[test]
    fn recency_orders_newest_first() {
        let mut store = BookmarkStore::new();
        store.add_at("/w/old.md", 1);
        store.add_at("/w/new.md", 3);
        store.add_at("/w/mid.md", 2);
        assert_eq!(
            store.paths_by_recency(),
            vec![Path::new("/w/new.md"), Path::new("/w/mid.md"), Path::new("/w/old.md")]
        );
    }

    #[test]
    fn persists_as_a_plain_list() {
        let mut store = BookmarkStore::new();
        store.add_at("/w/a.md", 42);
        let json = serde_json::to_string(&store).unwrap();
        assert_eq!(json, r#"[{"filePath":"/w/a.md","timestamp":42}]"#);
        let back: BookmarkStore = serde_json::from_str(&json).unwrap();
        assert_eq!(back, store);
    }
}

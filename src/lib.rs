//! # sortex
//!
//! Workspace listing engine for sortable file-explorer panels.
//!
//! sortex walks a workspace, filters it with include/exclude globs, and hands
//! back entries either as a flat list of every matching file or one directory
//! level at a time for lazy tree expansion. It also owns the pieces around
//! the listing that a panel needs: display sorting, bookmarks, note creation,
//! basic file operations, and a change notifier. Rendering, menus and dialogs
//! belong to the host.
//!
//! Every call is a pure function of its arguments and the live file system;
//! there are no caches and no global settings.
//!
//! # Quick Start
//!
//! ```rust
//! use sortex::{Explorer, ListingRequest, SortingStrategy, SortBy, SortDirection, ViewMode};
//!
//! let dir = tempfile::tempdir().unwrap();
//! std::fs::write(dir.path().join("a.md"), "# a").unwrap();
//! std::fs::create_dir(dir.path().join("node_modules")).unwrap();
//! std::fs::write(dir.path().join("node_modules/c.md"), "").unwrap();
//!
//! let request = ListingRequest::builder(dir.path())
//!     .include("**/*.md")
//!     .exclude("**/node_modules")
//!     .mode(ViewMode::Flat)
//!     .build();
//!
//! let entries = Explorer::new().entries(&request);
//! let sorted = SortingStrategy::new(SortBy::Name, SortDirection::Asc).sort(&entries);
//!
//! assert_eq!(sorted.len(), 1);
//! assert_eq!(sorted[0].name, "a.md");
//! ```
//!
//! # Pattern semantics
//!
//! Exclude always wins over include. An empty include list means "everything".
//! See [`pattern`] for how globs are evaluated against relative paths.

#![forbid(unsafe_code)]

pub mod ops;
pub mod pattern;
pub mod scanner;

mod bookmarks;
mod builder;
mod config;
mod entry;
mod error;
mod facade;
mod results;
mod sorting;
mod strategy;
mod watch;

// ── Public re-exports ─────────────────────────────────────────────────────────

pub use bookmarks::{Bookmark, BookmarkStore};
pub use builder::{ListingRequest, ListingRequestBuilder};
pub use config::{ExplorerConfig, ViewMode, DEFAULT_EXCLUDE_PATTERNS, DEFAULT_INCLUDE_PATTERNS};
pub use entry::{Entry, EntryKind};
pub use error::{ExplorerError, Result};
pub use facade::{relative_folder, Explorer};
pub use ops::DeleteMode;
pub use pattern::{should_display, PatternMatcher};
pub use results::{ScanOutcome, ScanStats};
pub use scanner::Depth;
pub use sorting::{SortBy, SortDirection, SortingStrategy};
pub use strategy::ListingStrategy;
pub use watch::{ChangeNotifier, Invalidation};

// ── Entry point ───────────────────────────────────────────────────────────────

/// List `root` with the patterns and view mode in `config`, sorted for display.
///
/// Shorthand for [`Explorer::list_workspace`] over a single root.
pub fn list(root: impl Into<std::path::PathBuf>, config: &ExplorerConfig) -> Vec<Entry> {
    Explorer::new().list_workspace(&[root.into()], config)
}

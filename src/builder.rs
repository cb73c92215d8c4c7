use std::path::PathBuf;

use crate::config::{ExplorerConfig, ViewMode};

// ---------------------------------------------------------------------------
// ListingRequest
// ---------------------------------------------------------------------------

/// Everything one listing call depends on.
///
/// A request fully determines its result: the engine consults nothing but
/// these fields and the live file system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRequest {
    /// Workspace root the patterns are relative to.
    pub root: PathBuf,
    pub includes: Vec<String>,
    pub excludes: Vec<String>,
    pub mode: ViewMode,
    /// When set, list the children of this directory instead of the root.
    pub expand: Option<PathBuf>,
}

impl ListingRequest {
    /// Start configuring a request for `root`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let request = ListingRequest::builder("/work/notes")
    ///     .include("**/*.md")
    ///     .exclude("**/node_modules")
    ///     .mode(ViewMode::Flat)
    ///     .build();
    /// ```
    pub fn builder(root: impl Into<PathBuf>) -> ListingRequestBuilder {
        ListingRequestBuilder::new(root)
    }

    /// A root-level request using the patterns and mode from `config`.
    pub fn from_config(root: impl Into<PathBuf>, config: &ExplorerConfig) -> Self {
        ListingRequestBuilder::new(root).config(config).build()
    }
}

// ---------------------------------------------------------------------------
// ListingRequestBuilder
// ---------------------------------------------------------------------------

/// Chained construction of a [`ListingRequest`].
///
/// Defaults: no include patterns (everything), no exclude patterns, flat mode,
/// no expansion.
pub struct ListingRequestBuilder {
    root:     PathBuf,
    includes: Vec<String>,
    excludes: Vec<String>,
    mode:     ViewMode,
    expand:   Option<PathBuf>,
}

impl ListingRequestBuilder {
    fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root:     root.into(),
            includes: Vec::new(),
            excludes: Vec::new(),
            mode:     ViewMode::Flat,
            expand:   None,
        }
    }

    // ── Patterns ──────────────────────────────────────────────────────────

    /// Add one include pattern.
    pub fn include(mut self, pattern: impl Into<String>) -> Self {
        self.includes.push(pattern.into());
        self
    }

    /// Add one exclude pattern. Excludes win over includes.
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.excludes.push(pattern.into());
        self
    }

    /// Replace the include patterns.
    pub fn includes<S: Into<String>>(mut self, patterns: impl IntoIterator<Item = S>) -> Self {
        self.includes = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the exclude patterns.
    pub fn excludes<S: Into<String>>(mut self, patterns: impl IntoIterator<Item = S>) -> Self {
        self.excludes = patterns.into_iter().map(Into::into).collect();
        self
    }

    // ── Options ───────────────────────────────────────────────────────────

    pub fn mode(mut self, mode: ViewMode) -> Self {
        self.mode = mode;
        self
    }

    /// List the children of `dir` rather than the root (tree expansion).
    pub fn expand(mut self, dir: impl Into<PathBuf>) -> Self {
        self.expand = Some(dir.into());
        self
    }

    /// Take patterns and view mode from `config`.
    pub fn config(self, config: &ExplorerConfig) -> Self {
        self.includes(config.include_patterns.iter().cloned())
            .excludes(config.exclude_patterns.iter().cloned())
            .mode(config.view_mode)
    }

    pub fn build(self) -> ListingRequest {
        ListingRequest {
            root:     self.root,
            includes: self.includes,
            excludes: self.excludes,
            mode:     self.mode,
            expand:   self.expand,
        }
    }
}

//! Include/exclude glob filtering.
//!
//! Paths are matched in a separator-neutral form: backslashes become `/`
//! before any glob sees them, so patterns written with forward slashes behave
//! the same on every platform.
//!
//! A pattern is tried against the whole relative path first and then against
//! each trailing run of path segments. That lets `*/b.txt` match `C:/a/b.txt`,
//! while `*` itself never crosses a `/` (so `src/*` stays one level deep).
//! A pattern without any `/` is also tried against every single segment, so
//! `node_modules` hides everything below a `node_modules` directory and
//! `*.spec.*` hits a file or a directory at any depth.

use std::borrow::Cow;

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use tracing::warn;

/// Compiled include and exclude pattern sets.
///
/// Build once per listing call and reuse for every entry in the walk.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    includes: Patterns,
    excludes: Patterns,
    /// Prefixes of `X/**` excludes, so `X` itself can be pruned.
    dir_excludes: Patterns,
}

#[derive(Debug, Clone)]
struct Patterns {
    set: GlobSet,
    /// The separator-free subset of `set`, matched segment by segment.
    segments: GlobSet,
    /// Number of patterns that compiled.
    active: usize,
}

impl PatternMatcher {
    /// Compile `includes` and `excludes`.
    ///
    /// Malformed patterns are logged and dropped; they never match anything.
    /// A set made only of malformed patterns behaves like an empty one.
    pub fn new<I, E>(includes: &[I], excludes: &[E]) -> Self
    where
        I: AsRef<str>,
        E: AsRef<str>,
    {
        let dir_prefixes: Vec<&str> = excludes
            .iter()
            .filter_map(|p| p.as_ref().strip_suffix("/**"))
            .filter(|p| !p.is_empty())
            .collect();

        Self {
            includes: Patterns::compile(includes),
            excludes: Patterns::compile(excludes),
            dir_excludes: Patterns::compile(&dir_prefixes),
        }
    }

    /// A matcher that displays everything.
    pub fn allow_all() -> Self {
        Self::new::<&str, &str>(&[], &[])
    }

    /// `true` when no usable include patterns were given, or any of them
    /// matches.
    pub fn matches_include(&self, relative_path: &str) -> bool {
        if self.includes.active == 0 {
            return true;
        }
        self.includes.is_match(&normalize_separators(relative_path))
    }

    /// `true` when exclude patterns were given and any of them matches.
    pub fn matches_exclude(&self, relative_path: &str) -> bool {
        if self.excludes.active == 0 {
            return false;
        }
        self.excludes.is_match(&normalize_separators(relative_path))
    }

    /// Include passes and exclude does not. Exclude always wins.
    pub fn should_display(&self, relative_path: &str) -> bool {
        self.matches_include(relative_path) && !self.matches_exclude(relative_path)
    }

    /// Whether a walk should skip descending into this directory.
    ///
    /// Besides plain excludes, a pattern `X/**` hides everything under `X`,
    /// so the directory `X` is pruned too.
    pub fn prunes_dir(&self, relative_path: &str) -> bool {
        if self.matches_exclude(relative_path) {
            return true;
        }
        self.dir_excludes.active > 0
            && self
                .dir_excludes
                .is_match(&normalize_separators(relative_path))
    }

    pub fn has_includes(&self) -> bool {
        self.includes.active > 0
    }

    pub fn has_excludes(&self) -> bool {
        self.excludes.active > 0
    }
}

impl Default for PatternMatcher {
    fn default() -> Self {
        Self::allow_all()
    }
}

impl Patterns {
    fn compile<S: AsRef<str>>(patterns: &[S]) -> Self {
        let mut builder = GlobSetBuilder::new();
        let mut segment_builder = GlobSetBuilder::new();
        let mut active = 0usize;
        for pattern in patterns {
            let pattern = pattern.as_ref();
            let normalized = normalize_separators(pattern);
            match GlobBuilder::new(&normalized)
                .literal_separator(true)
                .backslash_escape(false)
                .build()
            {
                Ok(glob) => {
                    if !normalized.contains('/') {
                        segment_builder.add(glob.clone());
                    }
                    builder.add(glob);
                    active += 1;
                }
                Err(err) => warn!(pattern, %err, "ignoring malformed glob pattern"),
            }
        }

        match (builder.build(), segment_builder.build()) {
            (Ok(set), Ok(segments)) => Self {
                set,
                segments,
                active,
            },
            (Err(err), _) | (_, Err(err)) => {
                warn!(%err, "failed to compile glob set, ignoring these patterns");
                Self {
                    set: GlobSet::empty(),
                    segments: GlobSet::empty(),
                    active: 0,
                }
            }
        }
    }

    fn is_match(&self, normalized: &str) -> bool {
        if self.set.is_empty() {
            return false;
        }
        candidates(normalized).any(|candidate| self.set.is_match(candidate))
            || (!self.segments.is_empty()
                && segments(normalized).any(|segment| self.segments.is_match(segment)))
    }
}

/// One-shot form of [`PatternMatcher::should_display`].
pub fn should_display<I, E>(relative_path: &str, includes: &[I], excludes: &[E]) -> bool
where
    I: AsRef<str>,
    E: AsRef<str>,
{
    PatternMatcher::new(includes, excludes).should_display(relative_path)
}

/// Translate platform separators to `/`.
pub fn normalize_separators(path: &str) -> Cow<'_, str> {
    if path.contains('\\') {
        Cow::Owned(path.replace('\\', "/"))
    } else {
        Cow::Borrowed(path)
    }
}

/// The full path followed by every non-empty trailing run of segments.
fn candidates(path: &str) -> impl Iterator<Item = &str> {
    std::iter::once(path).chain(
        path.match_indices('/')
            .map(move |(i, _)| &path[i + 1..])
            .filter(|rest| !rest.is_empty()),
    )
}

/// Every non-empty path segment.
fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ExplorerError, Result};
use crate::sorting::{SortBy, SortDirection, SortingStrategy};
use crate::strategy::ListingStrategy;

pub const DEFAULT_INCLUDE_PATTERNS: &[&str] = &["**/*.md", "**/*.txt"];
pub const DEFAULT_EXCLUDE_PATTERNS: &[&str] = &["**/node_modules"];

/// Which view the panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Flat,
    #[default]
    Tree,
    Bookmarks,
    /// Any mode string this version does not know. Lists as flat.
    #[serde(other)]
    Other,
}

impl ViewMode {
    /// The listing strategy backing this mode. Anything without its own
    /// strategy falls back to flat.
    pub fn listing_strategy(self) -> ListingStrategy {
        match self {
            ViewMode::Tree => ListingStrategy::Tree,
            ViewMode::Flat | ViewMode::Bookmarks | ViewMode::Other => ListingStrategy::Flat,
        }
    }

    /// Flip between flat and tree; any other mode goes to tree.
    pub fn toggle(self) -> Self {
        match self {
            ViewMode::Tree => ViewMode::Flat,
            _ => ViewMode::Tree,
        }
    }
}

/// Explorer settings, passed explicitly into every listing call.
///
/// Field names serialize in camelCase to line up with the host's settings
/// keys. Missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExplorerConfig {
    pub include_patterns: Vec<String>,
    pub exclude_patterns: Vec<String>,
    pub sort_by: SortBy,
    pub sort_direction: SortDirection,
    pub view_mode: ViewMode,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            include_patterns: DEFAULT_INCLUDE_PATTERNS.iter().map(|s| s.to_string()).collect(),
            exclude_patterns: DEFAULT_EXCLUDE_PATTERNS.iter().map(|s| s.to_string()).collect(),
            sort_by: SortBy::default(),
            sort_direction: SortDirection::default(),
            view_mode: ViewMode::default(),
        }
    }
}

impl ExplorerConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read settings from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| ExplorerError::from_io(path, e))?;
        Self::from_json_str(&text)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn sorting(&self) -> SortingStrategy {
        SortingStrategy::new(self.sort_by, self.sort_direction)
    }

    /// Append `pattern` to the exclude list unless it is already there.
    ///
    /// Returns `true` when the list changed.
    pub fn add_exclude_pattern(&mut self, pattern: impl Into<String>) -> bool {
        let pattern = pattern.into();
        if self.exclude_patterns.contains(&pattern) {
            return false;
        }
        self.exclude_patterns.push(pattern);
        true
    }
}

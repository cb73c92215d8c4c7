use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = ExplorerError> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum ExplorerError {
    // File system
    #[error("permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    #[error("path not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("is a directory: {}", .0.display())]
    IsDirectory(PathBuf),

    #[error("path is outside every workspace root: {}", .0.display())]
    OutsideWorkspace(PathBuf),

    #[error("invalid name: {0:?}")]
    InvalidName(String),

    #[error("IO error at {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Config
    #[error("invalid configuration")]
    Config(#[from] serde_json::Error),

    // Collaborators
    #[error("file watcher error")]
    Watch(#[from] notify::Error),

    #[error("trash error: {0}")]
    Trash(String),
}

impl ExplorerError {
    /// Classify an `io::Error` raised while touching `path`.
    pub(crate) fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(path),
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path),
            std::io::ErrorKind::AlreadyExists => Self::AlreadyExists(path),
            _ => Self::Io { path, source },
        }
    }

    /// The path this error occurred at, if applicable.
    /// Callers use this to present "Failed: <path>" without pattern matching on variants.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::PermissionDenied(p)
            | Self::NotFound(p)
            | Self::AlreadyExists(p)
            | Self::IsDirectory(p)
            | Self::OutsideWorkspace(p)
            | Self::Io { path: p, .. } => Some(p),
            _ => None,
        }
    }

    /// Whether the caller can reasonably retry with different input.
    ///
    /// Conflicts and bad names are user-correctable (pick another name, confirm
    /// an overwrite). Everything else means the operation cannot succeed as-is.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::AlreadyExists(_) | Self::InvalidName(_) | Self::IsDirectory(_)
        )
    }
}

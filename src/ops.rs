//! File operations the panel offers on listed entries.
//!
//! These act on the file system directly and never consult a listing. The
//! caller is expected to re-list afterwards (a [`ChangeNotifier`] picks the
//! change up anyway).
//!
//! [`ChangeNotifier`]: crate::ChangeNotifier

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::{debug, info};

use crate::error::{ExplorerError, Result};
use crate::scanner::relative_path;

/// How [`delete`] disposes of a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeleteMode {
    /// Move to the platform trash.
    #[default]
    Trash,
    /// Remove immediately; directories are removed recursively.
    Permanent,
}

/// Copy a file next to itself and return the copy's path.
///
/// A leading `YYYYMMDD` date in the file name is replaced with today's date,
/// so copying a dated note yields a note for today. If that name is free it
/// is used as is; otherwise ` - Copy`, then ` - Copy (2)`, ` - Copy (3)`, …
pub fn copy_file(source: &Path) -> Result<PathBuf> {
    let today = Local::now().format("%Y%m%d").to_string();
    copy_file_dated(source, &today)
}

fn copy_file_dated(source: &Path, today: &str) -> Result<PathBuf> {
    let meta = fs::metadata(source).map_err(|e| ExplorerError::from_io(source, e))?;
    if meta.is_dir() {
        return Err(ExplorerError::IsDirectory(source.to_path_buf()));
    }

    let dir = parent_dir(source)?;
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = source
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    let base = match split_date_prefix(&stem) {
        Some(rest) => format!("{today}{rest}"),
        None => stem.clone(),
    };

    let mut target = dir.join(format!("{base}{ext}"));
    if target.exists() {
        target = dir.join(format!("{base} - Copy{ext}"));
        let mut counter = 1;
        while target.exists() {
            counter += 1;
            target = dir.join(format!("{base} - Copy ({counter}){ext}"));
        }
    }

    fs::copy(source, &target).map_err(|e| ExplorerError::from_io(&target, e))?;
    info!(from = %source.display(), to = %target.display(), "copied file");
    Ok(target)
}

/// Rename a file within its directory. Never overwrites, even when another
/// process creates the target name concurrently.
pub fn rename_file(source: &Path, new_name: &str) -> Result<PathBuf> {
    validate_name(new_name)?;
    if source.is_dir() {
        return Err(ExplorerError::IsDirectory(source.to_path_buf()));
    }
    if !source.exists() {
        return Err(ExplorerError::NotFound(source.to_path_buf()));
    }

    let target = parent_dir(source)?.join(new_name);
    rename_no_replace(source, &target)?;
    info!(from = %source.display(), to = %target.display(), "renamed file");
    Ok(target)
}

/// Move `source` to `target` only if `target` does not exist yet.
///
/// Creating the hard link fails atomically when the name is taken. On file
/// systems without hard links this falls back to an existence check followed
/// by `fs::rename`, which can still replace a target created in between.
fn rename_no_replace(source: &Path, target: &Path) -> Result<()> {
    match fs::hard_link(source, target) {
        Ok(()) => {
            if let Err(err) = fs::remove_file(source) {
                let _ = fs::remove_file(target);
                return Err(ExplorerError::from_io(source, err));
            }
            Ok(())
        }
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
            Err(ExplorerError::AlreadyExists(target.to_path_buf()))
        }
        Err(err) => {
            debug!(path = %source.display(), %err, "hard link unavailable, using checked rename");
            if target.exists() {
                return Err(ExplorerError::AlreadyExists(target.to_path_buf()));
            }
            fs::rename(source, target).map_err(|e| ExplorerError::from_io(source, e))
        }
    }
}

/// Move a file into `dest_dir`, keeping its name.
///
/// An existing file at the destination is replaced only when `overwrite` is
/// set; the caller is expected to have confirmed that with the user.
pub fn move_file(source: &Path, dest_dir: &Path, overwrite: bool) -> Result<PathBuf> {
    if source.is_dir() {
        return Err(ExplorerError::IsDirectory(source.to_path_buf()));
    }
    let name = source
        .file_name()
        .ok_or_else(|| ExplorerError::InvalidName(source.display().to_string()))?;
    if !dest_dir.is_dir() {
        return Err(ExplorerError::NotFound(dest_dir.to_path_buf()));
    }

    let target = dest_dir.join(name);
    if target.exists() && !overwrite {
        return Err(ExplorerError::AlreadyExists(target));
    }

    fs::rename(source, &target).map_err(|e| ExplorerError::from_io(source, e))?;
    info!(from = %source.display(), to = %target.display(), "moved file");
    Ok(target)
}

/// Delete a file or directory.
pub fn delete(path: &Path, mode: DeleteMode) -> Result<()> {
    let meta = fs::symlink_metadata(path).map_err(|e| ExplorerError::from_io(path, e))?;

    match mode {
        DeleteMode::Trash => {
            trash::delete(path).map_err(|e| ExplorerError::Trash(e.to_string()))?;
        }
        DeleteMode::Permanent if meta.is_dir() => {
            fs::remove_dir_all(path).map_err(|e| ExplorerError::from_io(path, e))?;
        }
        DeleteMode::Permanent => {
            fs::remove_file(path).map_err(|e| ExplorerError::from_io(path, e))?;
        }
    }

    info!(path = %path.display(), ?mode, "deleted");
    Ok(())
}

/// Create an empty file. Fails if the name is taken.
pub fn create_file(dir: &Path, name: &str) -> Result<PathBuf> {
    validate_name(name)?;
    let path = dir.join(name);
    fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
        .map_err(|e| ExplorerError::from_io(&path, e))?;
    Ok(path)
}

/// Create a directory. Fails if the name is taken.
pub fn create_dir(dir: &Path, name: &str) -> Result<PathBuf> {
    validate_name(name)?;
    let path = dir.join(name);
    fs::create_dir(&path).map_err(|e| ExplorerError::from_io(&path, e))?;
    Ok(path)
}

/// The exclude pattern that hides `path` from the explorer.
///
/// Directories hide by name anywhere in the workspace (`**/<name>/**`);
/// files hide by their path relative to the containing root
/// (`**/<relative path>`). `None` when `path` is under no root.
pub fn exclude_pattern_for(path: &Path, is_dir: bool, roots: &[PathBuf]) -> Option<String> {
    let root = roots.iter().find(|root| path.starts_with(root))?;

    if is_dir {
        let name = path.file_name()?.to_string_lossy();
        Some(format!("**/{name}/**"))
    } else {
        let rel = relative_path(root, path);
        if rel.is_empty() {
            return None;
        }
        Some(format!("**/{rel}"))
    }
}

/// The part of `stem` after a leading 8-digit date, if it has one.
fn split_date_prefix(stem: &str) -> Option<&str> {
    let prefix = stem.get(..8)?;
    prefix
        .bytes()
        .all(|b| b.is_ascii_digit())
        .then(|| &stem[8..])
}

fn parent_dir(path: &Path) -> Result<&Path> {
    path.parent()
        .ok_or_else(|| ExplorerError::InvalidName(path.display().to_string()))
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
        return Err(ExplorerError::InvalidName(name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_prefix_split() {
        assert_eq!(split_date_prefix("20240101_todo"), Some("_todo"));
        assert_eq!(split_date_prefix("20240101"), Some(""));
        assert_eq!(split_date_prefix("2024010_x"), None);
        assert_eq!(split_date_prefix("notes"), None);
    }

    #[test]
    fn dated_copy_takes_todays_date() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("20200101_plan.md");
        fs::write(&src, "# plan").unwrap();

        let copy = copy_file_dated(&src, "20991231").unwrap();
        assert_eq!(copy, dir.path().join("20991231_plan.md"));
        assert_eq!(fs::read_to_string(copy).unwrap(), "# plan");
    }

    #[test]
    fn no_replace_rename_refuses_taken_name() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("a.md");
        let taken = dir.path().join("b.md");
        fs::write(&src, "a").unwrap();
        fs::write(&taken, "b").unwrap();

        let err = rename_no_replace(&src, &taken).unwrap_err();
        assert!(matches!(err, ExplorerError::AlreadyExists(_)));
        assert_eq!(fs::read_to_string(&src).unwrap(), "a");
        assert_eq!(fs::read_to_string(&taken).unwrap(), "b");
    }

    #[cfg(unix)]
    #[test]
    fn no_replace_rename_leaves_a_single_link() {
        use std::os::unix::fs::MetadataExt;

        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("a.md");
        let target = dir.path().join("c.md");
        fs::write(&src, "a").unwrap();

        rename_no_replace(&src, &target).unwrap();
        assert!(!src.exists());
        assert_eq!(fs::metadata(&target).unwrap().nlink(), 1);
        assert_eq!(fs::read_to_string(&target).unwrap(), "a");
    }

    #[test]
    fn names_with_separators_are_invalid() {
        assert!(validate_name("a/b").is_err());
        assert!(validate_name("..").is_err());
        assert!(validate_name("").is_err());
        assert!(validate_name("ok.md").is_ok());
    }
}

//! Filesystem primitives for the installed store.
//!
//! Every failure is reported as [`Error::Io`] carrying the offending path.

use std::io;
use std::path::{Path, PathBuf};
use sx_core::{Error, Result};

/// Whether `path` exists, following symlinks.
pub fn exists(path: &Path) -> bool {
    path.exists()
}

/// Whether anything, including a dangling symlink, sits at `path`.
pub fn link_exists(path: &Path) -> bool {
    path.symlink_metadata().is_ok()
}

/// Create a directory and all of its parents.
pub fn ensure_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path)
        .map_err(|e| Error::io("failed to create directory", path, e))
}

/// Delete a file, symlink or directory tree. Absent paths are not an error.
pub fn remove_all(path: &Path) -> Result<()> {
    let metadata = match path.symlink_metadata() {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(Error::io("failed to inspect", path, e)),
    };

    let result = if metadata.is_dir() {
        std::fs::remove_dir_all(path)
    } else {
        remove_link_or_file(path)
    };

    match result {
        Err(e) if e.kind() != io::ErrorKind::NotFound => {
            Err(Error::io("failed to remove", path, e))
        }
        _ => Ok(()),
    }
}

#[cfg(windows)]
fn remove_link_or_file(path: &Path) -> io::Result<()> {
    // Directory symlinks must be removed as directories on Windows
    std::fs::remove_file(path).or_else(|_| std::fs::remove_dir(path))
}

#[cfg(not(windows))]
fn remove_link_or_file(path: &Path) -> io::Result<()> {
    std::fs::remove_file(path)
}

/// Rename `from` to `to`. Both must be on the same volume.
pub fn rename(from: &Path, to: &Path) -> Result<()> {
    std::fs::rename(from, to).map_err(|e| Error::io("failed to move", from, e))
}

/// Create a symlink at `link` pointing to the directory `target`.
pub fn symlink(target: &Path, link: &Path) -> Result<()> {
    #[cfg(unix)]
    let result = std::os::unix::fs::symlink(target, link);
    #[cfg(windows)]
    let result = std::os::windows::fs::symlink_dir(target, link);

    result.map_err(|e| Error::io("failed to create symlink", link, e))
}

/// Read the target of the symlink at `link`, if there is one.
pub fn read_link(link: &Path) -> Result<Option<PathBuf>> {
    match std::fs::read_link(link) {
        Ok(target) => Ok(Some(target)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) if e.kind() == io::ErrorKind::InvalidInput => Ok(None),
        Err(e) => Err(Error::io("failed to read symlink", link, e)),
    }
}

/// Names of the immediate subdirectories of `dir`. An absent directory has
/// no children.
pub fn list_dir(dir: &Path) -> Result<Vec<String>> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(Error::io("failed to list", dir, e)),
    };

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::io("failed to list", dir, e))?;
        let file_type = entry
            .file_type()
            .map_err(|e| Error::io("failed to inspect", entry.path(), e))?;
        if file_type.is_dir() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    Ok(names)
}

/// Write `contents` to `path`, replacing any previous file.
pub fn write(path: &Path, contents: impl AsRef<[u8]>) -> Result<()> {
    std::fs::write(path, contents).map_err(|e| Error::io("failed to write", path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_remove_all_absent_is_noop() {
        let temp = tempdir().unwrap();
        remove_all(&temp.path().join("missing")).unwrap();
    }

    #[test]
    fn test_remove_all_tree() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join("a");
        ensure_dir(&dir.join("b").join("c")).unwrap();
        write(&dir.join("b").join("file"), "x").unwrap();

        remove_all(&dir).unwrap();
        assert!(!exists(&dir));
    }

    #[test]
    fn test_list_dir_skips_files() {
        let temp = tempdir().unwrap();
        ensure_dir(&temp.path().join("one")).unwrap();
        ensure_dir(&temp.path().join("two")).unwrap();
        write(&temp.path().join("file.txt"), "x").unwrap();

        let mut names = list_dir(temp.path()).unwrap();
        names.sort();
        assert_eq!(names, vec!["one", "two"]);
        assert!(list_dir(&temp.path().join("missing")).unwrap().is_empty());
    }

    #[test]
    fn test_rename_reports_path() {
        let temp = tempdir().unwrap();
        let from = temp.path().join("missing");
        let err = rename(&from, &temp.path().join("to")).unwrap_err();
        assert_eq!(err.path(), Some(from.as_path()));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_roundtrip() {
        let temp = tempdir().unwrap();
        let target = temp.path().join("target");
        let link = temp.path().join("link");
        ensure_dir(&target).unwrap();

        assert_eq!(read_link(&link).unwrap(), None);
        symlink(&target, &link).unwrap();
        assert_eq!(read_link(&link).unwrap(), Some(target.clone()));

        // Removing the link leaves the target alone
        remove_all(&link).unwrap();
        assert!(!link_exists(&link));
        assert!(exists(&target));
    }

    #[cfg(unix)]
    #[test]
    fn test_remove_dangling_symlink() {
        let temp = tempdir().unwrap();
        let link = temp.path().join("link");
        symlink(&temp.path().join("gone"), &link).unwrap();

        assert!(!exists(&link));
        assert!(link_exists(&link));
        remove_all(&link).unwrap();
        assert!(!link_exists(&link));
    }

    #[cfg(unix)]
    #[test]
    fn test_read_link_on_directory() {
        let temp = tempdir().unwrap();
        assert_eq!(read_link(temp.path()).unwrap(), None);
    }
}

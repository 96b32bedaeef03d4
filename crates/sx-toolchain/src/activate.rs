//! Activating, removing and listing installed builds.
//!
//! The store is the only record of what is installed. Nothing here is
//! cached; every call re-reads the directory and the `active` link.

use crate::catalog::{Build, DirectoryName, VersionRecord};
use crate::fs;
use crate::layout::{STAGING_SUFFIX, StoreLayout};
use std::path::{Path, PathBuf};
use sx_core::{Error, Result};
use tracing::{debug, info};

/// An entry of the store, parsed back from its directory name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledVersion {
    pub name: String,
    pub version: String,
    pub build: Build,
    pub path: PathBuf,
    /// Whether the `active` link points at this entry.
    pub active: bool,
}

impl InstalledVersion {
    /// `*` for the active entry, a space otherwise.
    pub fn marker(&self) -> char {
        if self.active { '*' } else { ' ' }
    }
}

/// Whether `record` is installed.
pub fn is_installed(layout: &StoreLayout, record: &VersionRecord) -> bool {
    fs::exists(&layout.version_dir(record))
}

/// Point the `active` link at `record`'s directory.
pub fn activate(layout: &StoreLayout, record: &VersionRecord) -> Result<PathBuf> {
    let target = layout.version_dir(record);
    if !fs::exists(&target) {
        return Err(Error::NotInstalled {
            name: record.directory_name(),
            path: target,
        });
    }

    fs::remove_all(&layout.active)?;
    fs::symlink(&target, &layout.active)?;

    info!("Activated {}", target.display());
    Ok(target)
}

/// Delete `record`'s directory. The active build cannot be removed.
pub fn remove(layout: &StoreLayout, record: &VersionRecord) -> Result<PathBuf> {
    let name = record.directory_name();
    let target = layout.version_dir(record);
    if !fs::exists(&target) {
        return Err(Error::NotInstalled { name, path: target });
    }

    if let Some(active) = active_dir(layout)?
        && same_dir(&active, &target)
    {
        return Err(Error::CannotRemoveActive { name, path: target });
    }

    fs::remove_all(&target)?;

    info!("Removed {}", target.display());
    Ok(target)
}

/// The directory the `active` link points at, if there is a link.
///
/// Relative link targets are resolved against the link's directory.
pub fn active_dir(layout: &StoreLayout) -> Result<Option<PathBuf>> {
    let Some(target) = fs::read_link(&layout.active)? else {
        return Ok(None);
    };

    if target.is_absolute() {
        return Ok(Some(target));
    }
    let parent = layout.active.parent().unwrap_or(Path::new("."));
    Ok(Some(parent.join(target)))
}

fn same_dir(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// Every installed build, sorted by directory name in descending order.
///
/// Staging directories of unfinished installs are skipped. Any other entry
/// whose name does not parse is an [`Error::UnrecognizedInstall`].
pub fn list_installed(layout: &StoreLayout) -> Result<Vec<InstalledVersion>> {
    let active = active_dir(layout)?;

    let mut names = fs::list_dir(&layout.store)?;
    names.sort_by(|a, b| b.cmp(a));

    let mut installed = Vec::with_capacity(names.len());
    for dir in names {
        if dir.ends_with(STAGING_SUFFIX) {
            debug!("Skipping staging directory {}", dir);
            continue;
        }

        let path = layout.store.join(&dir);
        let Some(parsed) = DirectoryName::parse(&dir) else {
            return Err(Error::UnrecognizedInstall { name: dir, path });
        };

        let is_active = active.as_deref().is_some_and(|a| same_dir(a, &path));
        installed.push(InstalledVersion {
            name: parsed.name,
            version: parsed.version,
            build: parsed.build,
            path,
            active: is_active,
        });
    }

    Ok(installed)
}

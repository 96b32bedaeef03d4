//! On-disk layout of the state directory.
//!
//! ```text
//! <root>/
//!   versions.json     catalog written by `sx update`
//!   store/            one directory per installed build
//!   active            symlink to the active store directory
//!   downloads/        archives while they are being installed
//! ```

use crate::catalog::VersionRecord;
use std::path::PathBuf;

const STORE_DIR: &str = "store";
const ACTIVE_LINK: &str = "active";
const CATALOG_FILE: &str = "versions.json";
const DOWNLOADS_DIR: &str = "downloads";

/// Suffix of a directory that is still being extracted.
pub const STAGING_SUFFIX: &str = ".tmp";

/// Paths derived from the state directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreLayout {
    pub root: PathBuf,
    pub store: PathBuf,
    pub active: PathBuf,
    pub catalog_file: PathBuf,
    pub downloads: PathBuf,
}

impl StoreLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            store: root.join(STORE_DIR),
            active: root.join(ACTIVE_LINK),
            catalog_file: root.join(CATALOG_FILE),
            downloads: root.join(DOWNLOADS_DIR),
            root,
        }
    }

    /// The directory a record is installed into.
    pub fn version_dir(&self, record: &VersionRecord) -> PathBuf {
        self.store.join(record.directory_name())
    }

    /// The directory a record is extracted into before it is committed.
    pub fn staging_dir(&self, record: &VersionRecord) -> PathBuf {
        self.store
            .join(format!("{}{}", record.directory_name(), STAGING_SUFFIX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Build;

    #[test]
    fn test_layout_paths() {
        let layout = StoreLayout::new("/home/u/.sx");
        let record = VersionRecord {
            name: "swift".into(),
            version: "5.3".into(),
            platform_tag: "20.04".into(),
            build: Build::snapshot("2021-06-01"),
            download_path: String::new(),
        };

        assert_eq!(
            layout.version_dir(&record),
            PathBuf::from("/home/u/.sx/store/swift-5.3-snapshot-2021-06-01")
        );
        assert_eq!(
            layout.staging_dir(&record),
            PathBuf::from("/home/u/.sx/store/swift-5.3-snapshot-2021-06-01.tmp")
        );
        assert_eq!(layout.active, PathBuf::from("/home/u/.sx/active"));
        assert_eq!(layout.catalog_file, PathBuf::from("/home/u/.sx/versions.json"));
    }
}

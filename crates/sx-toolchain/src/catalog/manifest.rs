//! Catalog persistence.

use super::Catalog;
use crate::fs;
use std::path::{Path, PathBuf};
use sx_core::{Error, Result};
use tracing::debug;

/// The catalog file, `versions.json` in the state directory.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    path: PathBuf,
}

impl CatalogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the catalog file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the catalog, replacing any previous content.
    ///
    /// The file is written next to its final location and renamed over it,
    /// so readers never observe a half-written catalog.
    pub fn save(&self, catalog: &Catalog) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::ensure_dir(parent)?;
        }

        let content = serde_json::to_string_pretty(catalog)
            .map_err(|e| Error::config(format!("Failed to serialize version list: {}", e)))?;

        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, content)?;
        fs::rename(&staging, &self.path)?;

        debug!(
            "Saved {} version sets to {}",
            catalog.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Read the catalog.
    ///
    /// A missing, unreadable or malformed file is reported as
    /// [`Error::CatalogUnavailable`]; it is never regenerated implicitly.
    pub fn load(&self) -> Result<Catalog> {
        let content =
            std::fs::read_to_string(&self.path).map_err(|e| Error::CatalogUnavailable {
                message: match e.kind() {
                    std::io::ErrorKind::NotFound => "no version list found".to_string(),
                    _ => format!("failed to read version list: {}", e),
                },
                path: self.path.clone(),
                source: Some(Box::new(e)),
            })?;

        let catalog: Catalog =
            serde_json::from_str(&content).map_err(|e| Error::CatalogUnavailable {
                message: format!("failed to parse version list: {}", e),
                path: self.path.clone(),
                source: Some(Box::new(e)),
            })?;

        if let Some((key, _)) = catalog
            .iter()
            .find(|(key, set)| **key != set.base || !set.is_consistent())
        {
            return Err(Error::CatalogUnavailable {
                message: format!("version set {} is inconsistent", key),
                path: self.path.clone(),
                source: None,
            });
        }

        debug!(
            "Loaded {} version sets from {}",
            catalog.len(),
            self.path.display()
        );
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogBuilder, VersionSet};
    use sx_core::SilentReporter;
    use tempfile::tempdir;

    fn sample_catalog() -> Catalog {
        CatalogBuilder::new("ubuntu", "16.10").unwrap().build(
            [
                "/builds/swift-5.3-RELEASE-ubuntu20.04.tar.gz",
                "/builds/swift-5.3.2-RELEASE-ubuntu20.04.tar.gz",
                "/builds/swift-5.3-DEVELOPMENT-SNAPSHOT-2021-06-01-a-ubuntu20.04.tar.gz",
                "/builds/swift-5.4-DEVELOPMENT-SNAPSHOT-2021-03-01-a-ubuntu20.04.tar.gz",
                "/builds/swift-4.2-RELEASE-ubuntu20.04.tar.gz",
            ],
            "20.04",
            &SilentReporter,
        )
    }

    #[test]
    fn test_save_load_roundtrip() {
        let temp = tempdir().unwrap();
        let store = CatalogStore::new(temp.path().join("versions.json"));

        let catalog = sample_catalog();
        store.save(&catalog).unwrap();
        let loaded = store.load().unwrap();

        assert_eq!(loaded, catalog);
        // 5.4 only has a snapshot, 4.2 only a release
        assert!(loaded["5.4"].release.is_empty());
        assert!(loaded["4.2"].snapshots.is_empty());
    }

    #[test]
    fn test_roundtrip_empty_catalog() {
        let temp = tempdir().unwrap();
        let store = CatalogStore::new(temp.path().join("state").join("versions.json"));

        store.save(&Catalog::new()).unwrap();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_overwrites() {
        let temp = tempdir().unwrap();
        let store = CatalogStore::new(temp.path().join("versions.json"));

        store.save(&sample_catalog()).unwrap();
        let mut smaller = Catalog::new();
        smaller.insert("6.0".into(), VersionSet::new("6.0"));
        store.save(&smaller).unwrap();

        assert_eq!(store.load().unwrap(), smaller);
        assert!(!temp.path().join("versions.json.tmp").exists());
    }

    #[test]
    fn test_encoding_is_tagged() {
        let temp = tempdir().unwrap();
        let store = CatalogStore::new(temp.path().join("versions.json"));
        store.save(&sample_catalog()).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(store.path()).unwrap()).unwrap();
        let release = &raw["5.3"]["release"]["5.3"]["build"];
        assert_eq!(release["release"], serde_json::json!(true));
        assert!(release.get("snapshot").is_none());

        let snapshot = &raw["5.3"]["snapshots"]["2021-06-01"]["build"];
        assert_eq!(snapshot["snapshot"], serde_json::json!("2021-06-01"));
        assert!(snapshot.get("release").is_none());
    }

    #[test]
    fn test_load_missing() {
        let temp = tempdir().unwrap();
        let store = CatalogStore::new(temp.path().join("versions.json"));
        let err = store.load().unwrap_err();
        assert!(matches!(err, Error::CatalogUnavailable { .. }));
    }

    #[test]
    fn test_load_malformed() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("versions.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = CatalogStore::new(&path).load().unwrap_err();
        assert!(matches!(err, Error::CatalogUnavailable { .. }));
    }

    #[test]
    fn test_load_rejects_misfiled_records() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("versions.json");

        let mut catalog = sample_catalog();
        let record = catalog["5.3"].release["5.3"].clone();
        catalog.get_mut("4.2").unwrap().release.insert("5.3".into(), record);
        std::fs::write(&path, serde_json::to_string(&catalog).unwrap()).unwrap();

        let err = CatalogStore::new(&path).load().unwrap_err();
        assert!(matches!(err, Error::CatalogUnavailable { .. }));
        assert!(err.to_string().contains("4.2"));
    }

    #[test]
    fn test_load_rejects_ambiguous_build() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("versions.json");
        let raw = serde_json::json!({
            "5.3": {
                "base": "5.3",
                "release": {
                    "5.3": {
                        "version": "5.3",
                        "platformTag": "20.04",
                        "build": { "release": true, "snapshot": "2021-06-01" },
                        "downloadPath": "/builds/swift-5.3-RELEASE-ubuntu20.04.tar.gz"
                    }
                },
                "snapshots": {}
            }
        });
        std::fs::write(&path, raw.to_string()).unwrap();

        assert!(CatalogStore::new(&path).load().is_err());
    }
}

//! Resolving a user query against the catalog.

use super::{Catalog, VersionRecord, base_of};
use sx_core::{Error, Reporter, Result};
use tracing::debug;

/// Find the record a version query refers to.
///
/// Snapshots are looked up by base and date. Releases are looked up by the
/// exact version given, so `5.3.2` never matches another `5.3.x`.
pub fn resolve<'c>(
    catalog: &'c Catalog,
    query: &str,
    snapshot: Option<&str>,
    reporter: &dyn Reporter,
) -> Result<&'c VersionRecord> {
    let base = base_of(query).ok_or_else(|| Error::InvalidVersionQuery {
        query: query.to_string(),
    })?;

    let set = catalog
        .get(base)
        .ok_or_else(|| Error::NoMatchingVersionSet {
            query: query.to_string(),
        })?;

    let record = match snapshot {
        Some(date) => {
            if query != base {
                debug!(query, base, "Snapshot requested with a patch version");
                reporter.warn(&format!(
                    "Snapshots are not for patch versions; assuming version {}",
                    base
                ));
            }

            set.snapshots
                .get(date)
                .ok_or_else(|| Error::SnapshotNotFound {
                    base: base.to_string(),
                    snapshot: date.to_string(),
                })?
        }
        None => set.release.get(query).ok_or_else(|| Error::ReleaseNotFound {
            version: query.to_string(),
        })?,
    };

    debug!("Resolved {} to {}", query, record.directory_name());
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Build, CatalogBuilder, group};
    use sx_core::{MemoryReporter, SilentReporter};

    fn record(version: &str, build: Build) -> VersionRecord {
        VersionRecord {
            name: "swift".to_string(),
            version: version.to_string(),
            platform_tag: "20.04".to_string(),
            build,
            download_path: format!("/builds/swift-{version}.tar.gz"),
        }
    }

    fn scenario() -> Catalog {
        CatalogBuilder::new("ubuntu", "16.10").unwrap().build(
            [
                "swift-5.3-RELEASE-ubuntu20.04.tar.gz",
                "swift-5.3-DEVELOPMENT-SNAPSHOT-2021-06-01-a-ubuntu20.04.tar.gz",
            ],
            "20.04",
            &SilentReporter,
        )
    }

    #[test]
    fn test_resolve_release() {
        let catalog = scenario();
        let r = resolve(&catalog, "5.3", None, &SilentReporter).unwrap();
        assert_eq!(r.version, "5.3");
        assert_eq!(r.build, Build::Release);
    }

    #[test]
    fn test_resolve_snapshot() {
        let catalog = scenario();
        let r = resolve(&catalog, "5.3", Some("2021-06-01"), &SilentReporter).unwrap();
        assert_eq!(r.build, Build::snapshot("2021-06-01"));
    }

    #[test]
    fn test_resolve_missing_snapshot() {
        let catalog = scenario();
        let err = resolve(&catalog, "5.3", Some("2021-07-01"), &SilentReporter).unwrap_err();
        assert!(matches!(
            err,
            Error::SnapshotNotFound { ref base, ref snapshot } if base == "5.3" && snapshot == "2021-07-01"
        ));
    }

    #[test]
    fn test_resolve_is_exact_for_releases() {
        let catalog = group([
            record("5.3.1", Build::Release),
            record("5.3.2", Build::Release),
            record("5.3.3", Build::Release),
        ]);

        let r = resolve(&catalog, "5.3.2", None, &SilentReporter).unwrap();
        assert_eq!(r.version, "5.3.2");

        let err = resolve(&catalog, "5.3", None, &SilentReporter).unwrap_err();
        assert!(matches!(err, Error::ReleaseNotFound { .. }));
        assert!(err.to_string().contains("snapshot"));
    }

    #[test]
    fn test_resolve_invalid_query() {
        let catalog = scenario();
        for query in ["5", "latest", ""] {
            let err = resolve(&catalog, query, None, &SilentReporter).unwrap_err();
            assert!(matches!(err, Error::InvalidVersionQuery { .. }), "{query}");
        }
    }

    #[test]
    fn test_resolve_unknown_base() {
        let catalog = scenario();
        let err = resolve(&catalog, "4.2", None, &SilentReporter).unwrap_err();
        assert!(matches!(err, Error::NoMatchingVersionSet { .. }));
    }

    #[test]
    fn test_snapshot_with_patch_version_warns() {
        let catalog = scenario();
        let reporter = MemoryReporter::new();
        let r = resolve(&catalog, "5.3.2", Some("2021-06-01"), &reporter).unwrap();

        assert_eq!(r.version, "5.3");
        assert_eq!(reporter.warnings().len(), 1);
        assert!(reporter.warnings()[0].contains("assuming version 5.3"));
    }

    #[test]
    fn test_snapshot_with_base_does_not_warn() {
        let catalog = scenario();
        let reporter = MemoryReporter::new();
        resolve(&catalog, "5.3", Some("2021-06-01"), &reporter).unwrap();
        assert!(reporter.warnings().is_empty());
    }
}

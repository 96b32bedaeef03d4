//! Building the catalog from the upstream listing.
//!
//! Each listing entry is an archive path such as
//! `/builds/swift-5.3-release/ubuntu2004/swift-5.3-RELEASE/swift-5.3-RELEASE-ubuntu20.04.tar.gz`.
//! Only the file name is matched against the grammar
//!
//! ```text
//! <name>-<version>-(DEVELOPMENT-SNAPSHOT-<yyyy-mm-dd>-<suffix> | RELEASE)-<family><platform>.<ext>
//! ```
//!
//! and the full entry is kept as the record's download path.

use super::{Build, Catalog, VersionRecord, VersionSet};
use regex::Regex;
use sx_core::{Error, Reporter, Result};
use tracing::debug;

/// Turns raw listing entries into a [`Catalog`] for one platform.
#[derive(Debug, Clone)]
pub struct CatalogBuilder {
    grammar: Regex,
    platform_family: String,
    fallback_platform: String,
}

impl CatalogBuilder {
    /// Create a builder for archives published for `platform_family`
    /// (e.g. `ubuntu`), falling back to `fallback_platform` when the
    /// requested platform has no builds.
    pub fn new(platform_family: &str, fallback_platform: impl Into<String>) -> Result<Self> {
        let pattern = format!(
            r"^(?P<name>[A-Za-z][A-Za-z0-9_]*)-(?P<version>\d+(?:\.\d+)*)-(?:DEVELOPMENT-SNAPSHOT-(?P<snapshot>\d{{4}}-\d{{2}}-\d{{2}})-[A-Za-z0-9]+|RELEASE)-{family}(?P<platform>\d+(?:\.\d+)*)\.(?:tar\.gz|tar\.xz|tgz)$",
            family = regex::escape(platform_family),
        );
        let grammar = Regex::new(&pattern).map_err(|e| {
            Error::config(format!(
                "invalid platform family {platform_family:?}: {e}"
            ))
        })?;

        Ok(Self {
            grammar,
            platform_family: platform_family.to_string(),
            fallback_platform: fallback_platform.into(),
        })
    }

    /// Parse one listing entry. Entries outside the grammar yield `None`.
    pub fn parse_entry(&self, entry: &str) -> Option<VersionRecord> {
        let filename = entry.rsplit('/').next().unwrap_or(entry);
        let caps = self.grammar.captures(filename)?;

        let build = match caps.name("snapshot") {
            Some(date) => Build::snapshot(date.as_str()),
            None => Build::Release,
        };

        Some(VersionRecord {
            name: caps["name"].to_string(),
            version: caps["version"].to_string(),
            platform_tag: caps["platform"].to_string(),
            build,
            download_path: entry.to_string(),
        })
    }

    /// Build the catalog of every entry published for `platform`.
    ///
    /// When nothing matches `platform`, a warning is reported and the
    /// fallback platform's builds are used instead.
    pub fn build<I, S>(&self, entries: I, platform: &str, reporter: &dyn Reporter) -> Catalog
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let records: Vec<VersionRecord> = entries
            .into_iter()
            .filter_map(|entry| {
                let parsed = self.parse_entry(entry.as_ref());
                if parsed.is_none() {
                    debug!("Skipping listing entry: {}", entry.as_ref());
                }
                parsed
            })
            .collect();

        debug!("Parsed {} builds from listing", records.len());

        let mut selected: Vec<VersionRecord> = records
            .iter()
            .filter(|r| r.platform_tag == platform)
            .cloned()
            .collect();

        if selected.is_empty() {
            let message = format!(
                "No versions available for {family} {platform}; defaulting to {family} {fallback}",
                family = self.platform_family,
                fallback = self.fallback_platform,
            );
            debug!(
                platform,
                fallback = %self.fallback_platform,
                "No builds for platform, using fallback"
            );
            reporter.warn(&message);

            selected = records
                .into_iter()
                .filter(|r| r.platform_tag == self.fallback_platform)
                .collect();
        }

        group(selected)
    }
}

/// Group records by base version.
///
/// Records without a base are dropped; a later record with the same
/// version (or snapshot date) replaces an earlier one.
pub fn group(records: impl IntoIterator<Item = VersionRecord>) -> Catalog {
    let mut catalog = Catalog::new();

    for record in records {
        let Some(base) = record.base().map(str::to_string) else {
            debug!("Dropping {} without a base version", record.version);
            continue;
        };

        let set = catalog
            .entry(base.clone())
            .or_insert_with(|| VersionSet::new(base));

        match &record.build {
            Build::Release => {
                set.release.insert(record.version.clone(), record);
            }
            Build::Snapshot { date } => {
                set.snapshots.insert(date.clone(), record);
            }
        }
    }

    catalog
}

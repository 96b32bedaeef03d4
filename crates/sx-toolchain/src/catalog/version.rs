//! Version records and their on-disk naming.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

/// How a build was published.
///
/// Serialized as an object holding exactly one of the keys `release` or
/// `snapshot`:
///
/// ```json
/// { "release": true }
/// { "snapshot": "2021-06-01" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "BuildRepr", into = "BuildRepr")]
pub enum Build {
    /// A stable release, addressed by its full version.
    Release,
    /// A dated development snapshot of a base version.
    Snapshot { date: String },
}

impl Build {
    /// Create a snapshot build.
    pub fn snapshot(date: impl Into<String>) -> Self {
        Build::Snapshot { date: date.into() }
    }

    /// The tag used in directory names: `release` or `snapshot-<date>`.
    pub fn tag(&self) -> String {
        match self {
            Build::Release => "release".to_string(),
            Build::Snapshot { date } => format!("snapshot-{date}"),
        }
    }

    /// The snapshot date, if this is a snapshot.
    pub fn date(&self) -> Option<&str> {
        match self {
            Build::Release => None,
            Build::Snapshot { date } => Some(date),
        }
    }
}

impl fmt::Display for Build {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Build::Release => write!(f, "release"),
            Build::Snapshot { date } => write!(f, "snapshot {date}"),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct BuildRepr {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    release: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    snapshot: Option<String>,
}

impl TryFrom<BuildRepr> for Build {
    type Error = String;

    fn try_from(repr: BuildRepr) -> Result<Self, Self::Error> {
        match (repr.release, repr.snapshot) {
            (Some(true), None) => Ok(Build::Release),
            (None, Some(date)) => Ok(Build::Snapshot { date }),
            (Some(_), Some(_)) => Err("build has both `release` and `snapshot`".to_string()),
            (Some(false), None) => Err("build has `release: false`".to_string()),
            (None, None) => Err("build needs one of `release` or `snapshot`".to_string()),
        }
    }
}

impl From<Build> for BuildRepr {
    fn from(build: Build) -> Self {
        match build {
            Build::Release => BuildRepr {
                release: Some(true),
                snapshot: None,
            },
            Build::Snapshot { date } => BuildRepr {
                release: None,
                snapshot: Some(date),
            },
        }
    }
}

/// One published build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionRecord {
    /// Toolchain name, e.g. `swift`.
    #[serde(default = "default_name")]
    pub name: String,
    /// Dotted numeric version, e.g. `5.3.2`.
    pub version: String,
    /// Platform release the build targets, e.g. `20.04`.
    pub platform_tag: String,
    /// Release or dated snapshot.
    pub build: Build,
    /// Upstream path the archive is fetched from.
    pub download_path: String,
}

fn default_name() -> String {
    "swift".to_string()
}

impl VersionRecord {
    /// The `major.minor` grouping key of this record's version.
    pub fn base(&self) -> Option<&str> {
        base_of(&self.version)
    }

    /// The store directory name, e.g. `swift-5.3-release`.
    pub fn directory_name(&self) -> String {
        DirectoryName {
            name: self.name.clone(),
            version: self.version.clone(),
            build: self.build.clone(),
        }
        .to_string()
    }
}

impl fmt::Display for VersionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.name, self.version, self.build)
    }
}

/// All published builds sharing one base version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionSet {
    /// The shared `major.minor` base.
    pub base: String,
    /// Releases keyed by full version.
    #[serde(default)]
    pub release: BTreeMap<String, VersionRecord>,
    /// Snapshots keyed by date.
    #[serde(default)]
    pub snapshots: BTreeMap<String, VersionRecord>,
}

impl VersionSet {
    /// Create an empty set for a base.
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            release: BTreeMap::new(),
            snapshots: BTreeMap::new(),
        }
    }

    /// Releases, newest version first.
    pub fn releases_desc(&self) -> Vec<&VersionRecord> {
        let mut releases: Vec<_> = self.release.values().collect();
        releases.sort_by(|a, b| compare_versions(&b.version, &a.version));
        releases
    }

    /// Up to `max` snapshots, newest date first.
    pub fn snapshots_desc(&self, max: usize) -> impl Iterator<Item = &VersionRecord> {
        self.snapshots.values().rev().take(max)
    }

    /// Whether every record in the set belongs to this base and is filed
    /// under the right key.
    pub fn is_consistent(&self) -> bool {
        let base = Some(self.base.as_str());
        self.release
            .iter()
            .all(|(version, r)| r.base() == base && *version == r.version && r.build == Build::Release)
            && self
                .snapshots
                .iter()
                .all(|(date, r)| r.base() == base && r.build.date() == Some(date.as_str()))
    }
}

fn base_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^(\d+\.\d+)").expect("Invalid regex pattern"))
}

/// Extract the leading `major.minor` of a version string.
///
/// Returns `None` when the string does not start with two numeric
/// components.
pub fn base_of(version: &str) -> Option<&str> {
    base_regex()
        .captures(version)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Compare dotted numeric versions component by component.
///
/// Non-numeric components compare as strings after all numeric ones.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let mut left = a.split('.');
    let mut right = b.split('.');
    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                let ord = match (x.parse::<u64>(), y.parse::<u64>()) {
                    (Ok(x), Ok(y)) => x.cmp(&y),
                    (Ok(_), Err(_)) => Ordering::Less,
                    (Err(_), Ok(_)) => Ordering::Greater,
                    (Err(_), Err(_)) => x.cmp(y),
                };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

fn directory_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(
            r"^(?P<name>[A-Za-z][A-Za-z0-9_]*)-(?P<version>\d+(?:\.\d+)*)-(?:release|snapshot-(?P<date>\d{4}-\d{2}-\d{2}))$",
        )
        .expect("Invalid regex pattern")
    })
}

/// The parts encoded in a store directory name.
///
/// `<name>-<version>-release` or `<name>-<version>-snapshot-<yyyy-mm-dd>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryName {
    pub name: String,
    pub version: String,
    pub build: Build,
}

impl DirectoryName {
    /// Parse a directory name back into its parts.
    pub fn parse(name: &str) -> Option<Self> {
        let caps = directory_regex().captures(name)?;
        let build = match caps.name("date") {
            Some(date) => Build::snapshot(date.as_str()),
            None => Build::Release,
        };
        Some(Self {
            name: caps["name"].to_string(),
            version: caps["version"].to_string(),
            build,
        })
    }
}

impl fmt::Display for DirectoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.name, self.version, self.build.tag())
    }
}

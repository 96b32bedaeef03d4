//! The catalog of builds published upstream.
//!
//! The catalog maps each `major.minor` base to the [`VersionSet`] of
//! releases and snapshots sharing it. It is rebuilt wholesale by
//! `sx update` and only ever read by every other command.

pub mod builder;
pub mod manifest;
pub mod resolve;
pub mod version;

use std::collections::BTreeMap;

pub use builder::{CatalogBuilder, group};
pub use manifest::CatalogStore;
pub use resolve::resolve;
pub use version::{Build, DirectoryName, VersionRecord, VersionSet, base_of, compare_versions};

/// Version sets keyed by base version.
pub type Catalog = BTreeMap<String, VersionSet>;

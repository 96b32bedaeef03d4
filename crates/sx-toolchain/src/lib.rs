//! Swift toolchain management for sx.
//!
//! This crate handles:
//! - Parsing the upstream download listing into a version catalog
//! - Persisting the catalog and resolving version queries against it
//! - Installing builds into the store, activating and removing them
//! - Detecting the local platform tag

pub mod activate;
pub mod catalog;
pub mod download;
pub mod extract;
pub mod fs;
pub mod install;
pub mod layout;
pub mod listing;
pub mod platform;

pub use activate::{InstalledVersion, activate, active_dir, is_installed, list_installed, remove};
pub use catalog::{
    Build, Catalog, CatalogBuilder, CatalogStore, DirectoryName, VersionRecord, VersionSet,
    base_of, compare_versions, resolve,
};
pub use download::{Downloader, HttpDownloader, TempArtifact};
pub use extract::{Extractor, TarExtractor};
pub use install::{InstallOptions, Installer, download_url};
pub use layout::StoreLayout;
pub use listing::{HttpPageFetcher, PageFetcher, extract_download_links, fetch_listing};
pub use platform::detect_platform_tag;

//! Installing a build into the store.
//!
//! An install extracts into `<store>/<dir>.tmp` and only renames that to
//! `<store>/<dir>` once extraction succeeded, so a half-extracted build is
//! never visible under its real name.

use crate::catalog::VersionRecord;
use crate::download::{Downloader, TempArtifact};
use crate::extract::Extractor;
use crate::fs;
use crate::layout::StoreLayout;
use std::path::PathBuf;
use sx_core::{Error, ProgressSink, Reporter, Result};
use tracing::{debug, info, warn};

/// Settings for an install.
#[derive(Debug, Clone)]
pub struct InstallOptions {
    /// Prefix joined with each record's download path.
    pub download_base: String,
    /// Leading archive path components dropped while extracting.
    pub strip_components: u32,
}

impl Default for InstallOptions {
    fn default() -> Self {
        Self {
            download_base: "https://swift.org".to_string(),
            strip_components: 2,
        }
    }
}

/// The URL a download path is fetched from.
pub fn download_url(base: &str, download_path: &str) -> String {
    if download_path.starts_with("http://") || download_path.starts_with("https://") {
        return download_path.to_string();
    }
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        download_path.trim_start_matches('/')
    )
}

/// Installs records into a store with the given collaborators.
pub struct Installer<'a> {
    pub layout: &'a StoreLayout,
    pub downloader: &'a dyn Downloader,
    pub extractor: &'a dyn Extractor,
    pub reporter: &'a dyn Reporter,
    pub options: InstallOptions,
}

impl Installer<'_> {
    /// Install `record`, returning its store directory.
    ///
    /// Fails with [`Error::AlreadyInstalled`] if the directory exists.
    /// On failure nothing is left behind in the store or downloads
    /// directories.
    pub async fn install(
        &self,
        record: &VersionRecord,
        progress: &dyn ProgressSink,
    ) -> Result<PathBuf> {
        let name = record.directory_name();
        let target = self.layout.version_dir(record);
        if fs::link_exists(&target) {
            return Err(Error::AlreadyInstalled { name, path: target });
        }

        let staging = self.layout.staging_dir(record);
        if fs::link_exists(&staging) {
            debug!("Removing stale staging directory {}", staging.display());
            fs::remove_all(&staging)?;
        }

        fs::ensure_dir(&self.layout.downloads)?;
        let artifact = TempArtifact::claim(self.layout.downloads.join(archive_name(record)))?;

        let url = download_url(&self.options.download_base, &record.download_path);
        self.reporter.note(&format!("Downloading {}...", record));
        info!("Downloading {} from {}", name, url);
        self.downloader
            .download(&url, artifact.path(), progress)
            .await?;

        self.reporter.note(&format!("Extracting {}...", record));
        fs::ensure_dir(&staging)?;
        if let Err(e) = self
            .extractor
            .extract(artifact.path(), &staging, self.options.strip_components)
            .await
        {
            if let Err(cleanup) = fs::remove_all(&staging) {
                warn!("Failed to clean up {}: {}", staging.display(), cleanup);
            }
            return Err(e);
        }

        if let Err(e) = fs::rename(&staging, &target) {
            if let Err(cleanup) = fs::remove_all(&staging) {
                warn!("Failed to clean up {}: {}", staging.display(), cleanup);
            }
            return Err(e);
        }
        drop(artifact);

        info!("Installed {} to {}", name, target.display());
        Ok(target)
    }
}

fn archive_name(record: &VersionRecord) -> String {
    record
        .download_path
        .rsplit('/')
        .next()
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("{}.tar.gz", record.directory_name()))
}

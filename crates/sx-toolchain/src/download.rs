//! Archive download.
//!
//! Archives are streamed into the `downloads/` directory and deleted again
//! once the install finishes, whether it succeeded or not.

use crate::fs;
use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::Client;
use std::path::{Path, PathBuf};
use std::time::Duration;
use sx_core::{Error, ProgressSink, Result};
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

/// Fetches an archive to a local file.
#[async_trait]
pub trait Downloader: Send + Sync {
    /// Download `url` into `dest`, reporting the transferred fraction.
    async fn download(&self, url: &str, dest: &Path, progress: &dyn ProgressSink) -> Result<()>;
}

/// Downloads over HTTP(S) with reqwest.
#[derive(Debug, Clone)]
pub struct HttpDownloader {
    client: Client,
}

impl HttpDownloader {
    /// Create a downloader. The timeout bounds connecting and each read,
    /// never the whole transfer, so a slow but steady download of a large
    /// archive completes. Without a timeout a stalled transfer waits
    /// indefinitely.
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder().user_agent(concat!("sx/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.connect_timeout(timeout).read_timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| Error::config(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Downloader for HttpDownloader {
    async fn download(&self, url: &str, dest: &Path, progress: &dyn ProgressSink) -> Result<()> {
        debug!("Downloading from {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::download(url, e))?;

        if !response.status().is_success() {
            return Err(Error::DownloadFailed {
                url: url.to_string(),
                message: format!("HTTP {}", response.status()),
                source: None,
            });
        }

        let total_size = response.content_length().unwrap_or(0);
        let mut file = tokio::fs::File::create(dest)
            .await
            .map_err(|e| Error::io("failed to create", dest, e))?;

        let mut stream = response.bytes_stream();
        let mut downloaded: u64 = 0;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| Error::download(url, e))?;
            file.write_all(&chunk)
                .await
                .map_err(|e| Error::io("failed to write", dest, e))?;
            downloaded += chunk.len() as u64;
            if total_size > 0 {
                progress.set_fraction(downloaded as f64 / total_size as f64);
            }
        }

        file.flush()
            .await
            .map_err(|e| Error::io("failed to write", dest, e))?;
        progress.finish();

        debug!(
            "Downloaded {:.1} MB to {}",
            downloaded as f64 / 1_000_000.0,
            dest.display()
        );
        Ok(())
    }
}

/// A downloaded archive that is deleted when dropped.
#[derive(Debug)]
pub struct TempArtifact {
    path: PathBuf,
}

impl TempArtifact {
    /// Claim `path`, removing anything left there by an earlier run.
    pub fn claim(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        fs::remove_all(&path)?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempArtifact {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_all(&self.path) {
            warn!("Failed to clean up {}: {}", self.path.display(), e);
        }
    }
}

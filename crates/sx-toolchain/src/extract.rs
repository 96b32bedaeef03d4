//! Archive extraction through an external archive tool.

use async_trait::async_trait;
use std::ffi::OsStr;
use std::path::Path;
use sx_core::{CommandRunner, Error, Result};
use tracing::debug;

/// Unpacks an archive into a directory.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Extract `archive` into the existing directory `dest`, dropping the
    /// first `strip_components` path components of every entry.
    async fn extract(&self, archive: &Path, dest: &Path, strip_components: u32) -> Result<()>;
}

/// Runs `tar -xf <archive> -C <dest> --strip-components <n>`.
#[derive(Debug, Clone)]
pub struct TarExtractor {
    tool: String,
    runner: CommandRunner,
}

impl TarExtractor {
    /// Create an extractor invoking `tool`, which must accept tar's flags.
    pub fn new(tool: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            runner: CommandRunner::new().with_env("LC_ALL", "C"),
        }
    }
}

impl Default for TarExtractor {
    fn default() -> Self {
        Self::new("tar")
    }
}

#[async_trait]
impl Extractor for TarExtractor {
    async fn extract(&self, archive: &Path, dest: &Path, strip_components: u32) -> Result<()> {
        debug!(
            "Extracting {} to {} (strip {})",
            archive.display(),
            dest.display(),
            strip_components
        );

        let strip = strip_components.to_string();
        let args: [&OsStr; 6] = [
            OsStr::new("-xf"),
            archive.as_os_str(),
            OsStr::new("-C"),
            dest.as_os_str(),
            OsStr::new("--strip-components"),
            OsStr::new(&strip),
        ];

        let output = self.runner.run(OsStr::new(&self.tool), args).await?;

        if !output.success() {
            return Err(Error::ExtractionFailed {
                tool: self.tool.clone(),
                archive: archive.to_path_buf(),
                exit_code: Some(output.exit_code),
                stderr: output.stderr.trim().to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_invalid_archive_fails() {
        let temp = tempdir().unwrap();
        let archive = temp.path().join("broken.tar.gz");
        std::fs::write(&archive, b"not an archive").unwrap();
        let dest = temp.path().join("out");
        std::fs::create_dir(&dest).unwrap();

        let err = TarExtractor::default()
            .extract(&archive, &dest, 2)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ExtractionFailed { .. }));
    }

    #[tokio::test]
    async fn test_missing_tool() {
        let temp = tempdir().unwrap();
        let err = TarExtractor::new("sx-no-such-tar")
            .extract(&temp.path().join("a.tar.gz"), temp.path(), 0)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ToolMissing { .. }));
    }

    #[tokio::test]
    async fn test_strips_leading_components() {
        let temp = tempdir().unwrap();
        let src = temp.path().join("src");
        std::fs::create_dir_all(src.join("swift-5.3-RELEASE-ubuntu20.04/usr/bin")).unwrap();
        std::fs::write(
            src.join("swift-5.3-RELEASE-ubuntu20.04/usr/bin/swift"),
            b"#!/bin/sh\n",
        )
        .unwrap();

        let archive = temp.path().join("swift.tar");
        let status = std::process::Command::new("tar")
            .arg("-cf")
            .arg(&archive)
            .arg("-C")
            .arg(&src)
            .arg("swift-5.3-RELEASE-ubuntu20.04")
            .status()
            .unwrap();
        assert!(status.success());

        let dest = temp.path().join("dest");
        std::fs::create_dir(&dest).unwrap();
        TarExtractor::default()
            .extract(&archive, &dest, 2)
            .await
            .unwrap();

        assert!(dest.join("bin/swift").exists());
    }
}

//! Detecting the platform tag of the local machine.

use std::path::Path;
use sx_core::{CommandRunner, EnvVars, Error, Result};
use tracing::debug;

const OS_RELEASE: &str = "/etc/os-release";

/// Determine the platform tag builds are selected for.
///
/// Priority: `$SX_PLATFORM`, then `explicit` (from the config), then
/// `VERSION_ID` in `/etc/os-release`, then `lsb_release -rs`.
pub async fn detect_platform_tag(explicit: Option<&str>) -> Result<String> {
    if let Ok(tag) = std::env::var(EnvVars::SX_PLATFORM)
        && !tag.trim().is_empty()
    {
        debug!("Using platform from {}: {}", EnvVars::SX_PLATFORM, tag);
        return Ok(tag.trim().to_string());
    }

    if let Some(tag) = explicit.map(str::trim).filter(|t| !t.is_empty()) {
        debug!("Using configured platform: {}", tag);
        return Ok(tag.to_string());
    }

    if let Some(tag) = read_os_release(Path::new(OS_RELEASE)) {
        debug!("Detected platform from {}: {}", OS_RELEASE, tag);
        return Ok(tag);
    }

    match CommandRunner::new().run("lsb_release", ["-rs"]).await {
        Ok(output) if output.success() && !output.stdout.trim().is_empty() => {
            let tag = output.stdout.trim().to_string();
            debug!("Detected platform from lsb_release: {}", tag);
            Ok(tag)
        }
        Ok(output) => {
            debug!("lsb_release failed: {}", output.stderr.trim());
            Err(undetected())
        }
        Err(e) => {
            debug!("lsb_release unavailable: {}", e);
            Err(undetected())
        }
    }
}

fn undetected() -> Error {
    Error::config(format!(
        "could not determine the platform version; set `catalog.platform` in the config or {}",
        EnvVars::SX_PLATFORM
    ))
}

fn read_os_release(path: &Path) -> Option<String> {
    let content = std::fs::read_to_string(path).ok()?;
    parse_os_release_version(&content)
}

/// Extract `VERSION_ID` from os-release content.
pub fn parse_os_release_version(content: &str) -> Option<String> {
    content.lines().find_map(|line| {
        let value = line.trim().strip_prefix("VERSION_ID=")?;
        let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
        (!value.is_empty()).then(|| value.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_os_release() {
        let content = r#"NAME="Ubuntu"
VERSION="20.04.6 LTS (Focal Fossa)"
ID=ubuntu
VERSION_ID="20.04"
"#;
        assert_eq!(parse_os_release_version(content), Some("20.04".to_string()));
    }

    #[test]
    fn test_parse_os_release_unquoted() {
        assert_eq!(
            parse_os_release_version("ID=alpine\nVERSION_ID=3.19.1\n"),
            Some("3.19.1".to_string())
        );
    }

    #[test]
    fn test_parse_os_release_missing() {
        assert_eq!(parse_os_release_version("ID=arch\nBUILD_ID=rolling\n"), None);
        assert_eq!(parse_os_release_version("VERSION_ID=\"\"\n"), None);
    }

    #[tokio::test]
    async fn test_explicit_platform() {
        if std::env::var_os(EnvVars::SX_PLATFORM).is_some() {
            return;
        }
        assert_eq!(detect_platform_tag(Some("22.04")).await.unwrap(), "22.04");
    }
}

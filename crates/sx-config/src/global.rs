//! Global configuration.
//!
//! Global config is stored at `~/.config/sx/config.toml` (or platform
//! equivalent). Every key is optional; a missing file means defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Error type for global config operations.
#[derive(Debug, Error)]
pub enum GlobalConfigError {
    #[error("failed to read global config: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("failed to parse global config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("failed to serialize global config: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

impl From<GlobalConfigError> for sx_core::Error {
    fn from(err: GlobalConfigError) -> Self {
        sx_core::Error::Config {
            message: err.to_string(),
            path: None,
            source: Some(Box::new(err)),
        }
    }
}

/// Global configuration.
///
/// # Example
///
/// ```toml
/// # ~/.config/sx/config.toml
/// home = "/opt/sx"
///
/// [catalog]
/// platform = "22.04"
/// fallback_platform = "20.04"
///
/// [install]
/// strip_components = 2
///
/// [display]
/// max_snapshots = 10
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// State directory override (defaults to `~/.sx`).
    pub home: Option<PathBuf>,

    /// Where and how the upstream listing is read.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// How archives are unpacked into the store.
    #[serde(default)]
    pub install: InstallConfig,

    /// Listing defaults.
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Catalog configuration section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Page listing every published build.
    #[serde(default = "default_listing_url")]
    pub listing_url: String,

    /// Prefix joined with each build's download path.
    #[serde(default = "default_download_base")]
    pub download_base: String,

    /// Platform family the archives are published for.
    #[serde(default = "default_platform_family")]
    pub platform_family: String,

    /// Platform tag to select builds for; detected when unset.
    pub platform: Option<String>,

    /// Platform tag used when no build matches the selected platform.
    #[serde(default = "default_fallback_platform")]
    pub fallback_platform: String,

    /// HTTP timeout in seconds. Transfers never time out when unset.
    pub timeout: Option<u64>,
}

fn default_listing_url() -> String {
    "https://swift.org/download/".to_string()
}

fn default_download_base() -> String {
    "https://swift.org".to_string()
}

fn default_platform_family() -> String {
    "ubuntu".to_string()
}

fn default_fallback_platform() -> String {
    "16.10".to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            listing_url: default_listing_url(),
            download_base: default_download_base(),
            platform_family: default_platform_family(),
            platform: None,
            fallback_platform: default_fallback_platform(),
            timeout: None,
        }
    }
}

/// Install configuration section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstallConfig {
    /// Leading path components dropped while extracting.
    #[serde(default = "default_strip_components")]
    pub strip_components: u32,

    /// Archive tool invoked for extraction.
    #[serde(default = "default_archive_tool")]
    pub archive_tool: String,
}

fn default_strip_components() -> u32 {
    2
}

fn default_archive_tool() -> String {
    "tar".to_string()
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            strip_components: default_strip_components(),
            archive_tool: default_archive_tool(),
        }
    }
}

/// Display configuration section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Snapshots shown per version by `sx available`.
    #[serde(default = "default_max_snapshots")]
    pub max_snapshots: usize,
}

fn default_max_snapshots() -> usize {
    5
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            max_snapshots: default_max_snapshots(),
        }
    }
}

impl GlobalConfig {
    /// Parse global config from a TOML string.
    pub fn parse(s: &str) -> Result<Self, GlobalConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Parse global config from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, GlobalConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Serialize the global config to a TOML string.
    pub fn to_string(&self) -> Result<String, GlobalConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write the global config to a file.
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<(), GlobalConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = self.to_string()?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Load the global configuration.
///
/// `explicit` (from `--config-file` or `SX_CONFIG_FILE`) must exist; the
/// default location may be absent, in which case defaults are returned.
pub fn load_global_config(explicit: Option<&Path>) -> Result<GlobalConfig, GlobalConfigError> {
    if let Some(path) = explicit {
        debug!("Loading global config from: {}", path.display());
        return GlobalConfig::from_file(path);
    }

    let Some(config_file) = crate::paths::default_config_file() else {
        debug!("Could not determine global config path");
        return Ok(GlobalConfig::default());
    };

    if !config_file.exists() {
        debug!(
            "Global config file does not exist: {}",
            config_file.display()
        );
        return Ok(GlobalConfig::default());
    }

    debug!("Loading global config from: {}", config_file.display());
    GlobalConfig::from_file(&config_file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_empty() {
        let config = GlobalConfig::parse("").unwrap();
        assert_eq!(config, GlobalConfig::default());
        assert_eq!(config.catalog.fallback_platform, "16.10");
        assert_eq!(config.install.strip_components, 2);
        assert_eq!(config.display.max_snapshots, 5);
        assert!(config.catalog.timeout.is_none());
    }

    #[test]
    fn test_parse_catalog() {
        let toml = r#"
[catalog]
platform = "22.04"
fallback_platform = "20.04"
timeout = 600
"#;
        let config = GlobalConfig::parse(toml).unwrap();
        assert_eq!(config.catalog.platform.as_deref(), Some("22.04"));
        assert_eq!(config.catalog.fallback_platform, "20.04");
        assert_eq!(config.catalog.timeout, Some(600));
        // Untouched keys keep their defaults
        assert_eq!(config.catalog.listing_url, "https://swift.org/download/");
        assert_eq!(config.catalog.platform_family, "ubuntu");
    }

    #[test]
    fn test_parse_home_and_display() {
        let toml = r#"
home = "/opt/sx"

[display]
max_snapshots = 10
"#;
        let config = GlobalConfig::parse(toml).unwrap();
        assert_eq!(config.home, Some(PathBuf::from("/opt/sx")));
        assert_eq!(config.display.max_snapshots, 10);
    }

    #[test]
    fn test_parse_invalid() {
        let err = GlobalConfig::parse("[install]\nstrip_components = \"two\"").unwrap_err();
        assert!(matches!(err, GlobalConfigError::ParseError(_)));
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempdir().unwrap();
        let config_file = dir.path().join("subdir").join("config.toml");

        let config = GlobalConfig {
            catalog: CatalogConfig {
                platform: Some("20.04".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };

        config.to_file(&config_file).unwrap();
        assert!(config_file.exists());

        let loaded = load_global_config(Some(&config_file)).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        let err = load_global_config(Some(&dir.path().join("missing.toml"))).unwrap_err();
        assert!(matches!(err, GlobalConfigError::ReadError(_)));
    }
}

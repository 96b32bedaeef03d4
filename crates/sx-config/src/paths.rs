//! Well-known locations.

use crate::{CONFIG_FILENAME, GlobalConfig, STATE_DIR_NAME};
use directories::{BaseDirs, ProjectDirs};
use std::path::PathBuf;
use sx_core::{EnvVars, Error, Result};

/// Get the default config file path.
///
/// - Linux: `~/.config/sx/config.toml`
/// - macOS: `~/Library/Application Support/sx/config.toml`
pub fn default_config_file() -> Option<PathBuf> {
    ProjectDirs::from("", "", "sx").map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

/// Get the state directory holding the catalog, the store and the active link.
///
/// Priority: `$SX_HOME`, then `home` from the config, then `~/.sx`.
pub fn state_dir(config: &GlobalConfig) -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(EnvVars::SX_HOME).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }

    resolve_state_dir(config)
}

fn resolve_state_dir(config: &GlobalConfig) -> Result<PathBuf> {
    if let Some(ref home) = config.home {
        return Ok(home.clone());
    }

    let dirs = BaseDirs::new()
        .ok_or_else(|| Error::config("could not determine home directory for sx state"))?;
    Ok(dirs.home_dir().join(STATE_DIR_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_home_wins_over_default() {
        let config = GlobalConfig {
            home: Some(PathBuf::from("/opt/sx")),
            ..Default::default()
        };
        assert_eq!(resolve_state_dir(&config).unwrap(), PathBuf::from("/opt/sx"));
    }

    #[test]
    fn test_default_state_dir_is_under_home() {
        if let Ok(dir) = resolve_state_dir(&GlobalConfig::default()) {
            assert!(dir.ends_with(STATE_DIR_NAME));
        }
    }

    #[test]
    fn test_default_config_file_name() {
        if let Some(path) = default_config_file() {
            assert!(path.ends_with(CONFIG_FILENAME));
        }
    }
}

//! Configuration for sx.
//!
//! This crate handles:
//! - Parsing the global `config.toml`
//! - Locating the config file and the state directory

pub mod global;
pub mod paths;

pub use global::{
    CatalogConfig, DisplayConfig, GlobalConfig, GlobalConfigError, InstallConfig,
    load_global_config,
};
pub use paths::{default_config_file, state_dir};

/// The config filename.
pub const CONFIG_FILENAME: &str = "config.toml";

/// The default state directory name under the home directory.
pub const STATE_DIR_NAME: &str = ".sx";

//! Environment variable constants for sx.
//!
//! This module defines all environment variables that sx recognizes,
//! providing a single source of truth for environment configuration.

/// Environment variable names used by sx.
pub struct EnvVars;

impl EnvVars {
    // ─── Global Settings ─────────────────────────────────────────────────────

    /// State directory holding the catalog, the store and the active link.
    pub const SX_HOME: &'static str = "SX_HOME";

    /// Path to the sx configuration file.
    pub const SX_CONFIG_FILE: &'static str = "SX_CONFIG_FILE";

    /// Enable verbose output.
    pub const SX_VERBOSE: &'static str = "SX_VERBOSE";

    /// Suppress output.
    pub const SX_QUIET: &'static str = "SX_QUIET";

    /// Disable colored output.
    pub const SX_NO_COLOR: &'static str = "SX_NO_COLOR";

    /// Enable JSON log output.
    pub const SX_LOG_JSON: &'static str = "SX_LOG_JSON";

    // ─── Toolchain Settings ──────────────────────────────────────────────────

    /// Platform tag to select builds for, bypassing detection.
    pub const SX_PLATFORM: &'static str = "SX_PLATFORM";

    // ─── Standard Environment Variables ──────────────────────────────────────

    /// Standard NO_COLOR environment variable.
    pub const NO_COLOR: &'static str = "NO_COLOR";
}

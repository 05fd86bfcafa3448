//! Centralized path management for the crm CLI
//!
//! Only the configuration lives outside the classroom folders; bindings are
//! kept next to the repositories they describe.

use std::path::PathBuf;

/// The name of the application directory used across all platforms
const APP_DIR: &str = "crm";

/// The name of the configuration file
const CONFIG_FILE: &str = "config.toml";

/// Returns the path to the configuration directory
///
/// `XDG_CONFIG_HOME` wins when set (Linux and macOS). Otherwise the platform
/// config directory is used:
/// - `~/.config/crm` on Linux
/// - `~/Library/Application Support/crm` on macOS
/// - `%APPDATA%/crm` on Windows
///
/// Falls back to `.crm-config` in the current directory if none is known.
pub fn get_config_dir() -> PathBuf {
    #[cfg(not(target_os = "windows"))]
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME")
        && !xdg_config.is_empty()
    {
        return PathBuf::from(xdg_config).join(APP_DIR);
    }

    dirs::config_dir()
        .map(|d| d.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from(".crm-config"))
}

/// Returns the path to the configuration file
pub fn get_config_path() -> PathBuf {
    get_config_dir().join(CONFIG_FILE)
}

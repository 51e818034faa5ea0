//! Where keystack keeps its files
//!
//! ```text
//! $XDG_CONFIG_HOME/keystack/      (~/.config/keystack, %APPDATA%\keystack on Windows)
//! ├── config.yaml                 engine settings
//! ├── keymap.yaml                 user binds layered over the defaults
//! └── logs/keystack.log.<date>    daily rolling debug log
//! ```

use std::io;
use std::path::PathBuf;

const APP_DIR: &str = "keystack";

/// Base name of the rolling log file
pub const LOG_FILE_NAME: &str = "keystack.log";

/// The keystack config directory, if the platform has one
pub fn config_dir() -> Option<PathBuf> {
    platform_config_home().map(|base| base.join(APP_DIR))
}

#[cfg(target_os = "windows")]
fn platform_config_home() -> Option<PathBuf> {
    std::env::var_os("APPDATA").map(PathBuf::from)
}

#[cfg(not(target_os = "windows"))]
fn platform_config_home() -> Option<PathBuf> {
    // dirs::config_dir() would pick ~/Library/Application Support on macOS
    std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
}

fn in_config_dir(name: &str) -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(name))
}

pub fn config_file() -> Option<PathBuf> {
    in_config_dir("config.yaml")
}

pub fn keymap_file() -> Option<PathBuf> {
    in_config_dir("keymap.yaml")
}

pub fn logs_dir() -> Option<PathBuf> {
    in_config_dir("logs")
}

/// Create the logs directory (and its parents) if needed
pub fn ensure_logs_dir() -> io::Result<PathBuf> {
    let logs = logs_dir()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no config directory"))?;
    std::fs::create_dir_all(&logs)?;
    Ok(logs)
}

//! Engine configuration
//!
//! Stored in `~/.config/keystack/config.yaml`:
//!
//! ```yaml
//! default_mode: command
//! variables:
//!   keycmd_events: "1"
//!   modcmd_updates: "1"
//! modmaps:
//!   - [Control, Ctrl]
//!   - [ISO_Left_Tab, Shift-Tab]
//! ignore_keys: ["<ISO_*>", "<Shift>"]
//! mode_config:
//!   insert:
//!     forward_keys: "1"
//! ```

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::keymap::KeymapError;

/// Per-session settings applied before any events are handled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Mode selected whenever an empty mode is requested
    #[serde(default = "default_mode")]
    pub default_mode: String,

    /// Initial variable values
    #[serde(default)]
    pub variables: IndexMap<String, String>,

    /// Key name mappings, `[from, to]`
    #[serde(default = "default_modmaps")]
    pub modmaps: Vec<(String, String)>,

    /// Modifier globs that never start a chord
    #[serde(default = "default_ignore_keys")]
    pub ignore_keys: Vec<String>,

    /// Variables to set when a mode becomes active
    #[serde(default)]
    pub mode_config: IndexMap<String, IndexMap<String, String>>,
}

fn default_mode() -> String {
    "command".to_string()
}

fn default_modmaps() -> Vec<(String, String)> {
    vec![
        ("Control".to_string(), "Ctrl".to_string()),
        ("ISO_Left_Tab".to_string(), "Shift-Tab".to_string()),
    ]
}

fn default_ignore_keys() -> Vec<String> {
    vec!["<ISO_*>".to_string(), "<Shift>".to_string(), "<Multi_key>".to_string()]
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_mode: default_mode(),
            variables: IndexMap::new(),
            modmaps: default_modmaps(),
            ignore_keys: default_ignore_keys(),
            mode_config: IndexMap::new(),
        }
    }
}

impl EngineConfig {
    /// Load config from the user config dir, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        Self::load_or_default(&path)
    }

    /// Load config from `path`, falling back to defaults on any error
    pub fn load_or_default(path: &Path) -> Self {
        match Self::from_file(path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("Failed to load config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, KeymapError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, KeymapError> {
        Ok(serde_yaml::from_str(yaml)?)
    }
}

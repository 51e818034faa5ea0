//! Bind definitions from text and YAML
//!
//! The textual form is the `MODE_BIND` event grammar:
//!
//! ```text
//! <mode-list> <pattern> = <command>
//! command        o<location:>_ = uri %s
//! insert,command <BackSpace>   = ...
//! global,-insert ZZ            = exit
//! ```
//!
//! Keymap files hold the same information as YAML:
//!
//! ```yaml
//! bindings:
//!   - bind: "o<location:>_"
//!     command: "uri %s"
//!   - bind: ZZ
//!     commands: [save, exit]
//!     modes: [command]
//! ```

use std::path::Path;

use serde::Deserialize;

use super::binding::Bind;
use super::error::KeymapError;
use super::registry::{validate_mode, Registry, GLOBAL_MODE};
use crate::util::Arguments;

/// One bind definition for one or more modes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeBind {
    pub modes: Vec<String>,
    pub pattern: String,
    /// Command templates; empty removes the pattern from every listed mode
    pub commands: Vec<String>,
}

impl ModeBind {
    pub fn new<I, S>(modes: &str, pattern: &str, commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            modes: split_modes(modes),
            pattern: pattern.to_string(),
            commands: commands.into_iter().map(Into::into).collect(),
        }
    }

    /// Compile once and install into every listed mode
    ///
    /// All mode names are checked before anything is installed, so a bad
    /// name leaves the registry untouched.
    pub fn apply(&self, registry: &mut Registry) -> Result<(), KeymapError> {
        for mode in &self.modes {
            validate_mode(mode)?;
        }

        let bind = if self.commands.is_empty() {
            None
        } else {
            Some(Bind::commands(&self.pattern, self.commands.iter().cloned())?)
        };

        for mode in &self.modes {
            registry.add_bind(mode, &self.pattern, bind.clone())?;
        }

        tracing::info!(
            modes = ?self.modes,
            pattern = %self.pattern,
            commands = ?self.commands,
            "added mode bind"
        );
        Ok(())
    }
}

/// Parse `<mode-list> <pattern> = <command>`
///
/// The pattern may contain spaces; the first standalone `=` ends it. The
/// command keeps its quoting as written. A blank command yields a removal.
pub fn parse_mode_bind(line: &str) -> Result<ModeBind, KeymapError> {
    let args = Arguments::parse(line);
    if args.len() < 2 {
        return Err(KeymapError::syntax(format!(
            "missing mode or bind section: {:?}",
            line.trim()
        )));
    }

    let Some(eq) = args.iter().skip(1).position(|a| a == "=").map(|i| i + 1) else {
        return Err(KeymapError::syntax(format!(
            "missing delimiter in bind section: {:?}",
            line.trim()
        )));
    };

    let pattern = args.iter().take(eq).skip(1).collect::<Vec<_>>().join(" ");
    let command = args.raw(eq + 1);

    let commands = if command.trim().is_empty() {
        Vec::new()
    } else {
        vec![command.to_string()]
    };

    Ok(ModeBind {
        modes: split_modes(&args[0]),
        pattern,
        commands,
    })
}

/// Parse the legacy `<pattern> = <command>` form into the global mode
pub fn parse_bind(line: &str) -> Result<ModeBind, KeymapError> {
    parse_mode_bind(&format!("{} {}", GLOBAL_MODE, line))
}

fn split_modes(modes: &str) -> Vec<String> {
    modes
        .split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .collect()
}

/// Root structure of a keymap YAML file
#[derive(Debug, Deserialize)]
pub struct KeymapConfig {
    #[serde(default)]
    pub bindings: Vec<BindingConfig>,
}

/// A single binding entry from YAML
#[derive(Debug, Deserialize)]
pub struct BindingConfig {
    pub bind: String,
    #[serde(default)]
    pub command: Option<String>,
    #[serde(default)]
    pub commands: Vec<String>,
    #[serde(default = "default_modes")]
    pub modes: Vec<String>,
}

fn default_modes() -> Vec<String> {
    vec![GLOBAL_MODE.to_string()]
}

impl From<BindingConfig> for ModeBind {
    fn from(entry: BindingConfig) -> Self {
        let mut commands: Vec<String> = entry.command.into_iter().collect();
        commands.extend(entry.commands);
        commands.retain(|c| !c.trim().is_empty());

        Self {
            modes: entry
                .modes
                .iter()
                .flat_map(|m| split_modes(m))
                .collect(),
            pattern: entry.bind,
            commands,
        }
    }
}

/// Load bind definitions from a YAML file
pub fn load_keymap_file(path: &Path) -> Result<Vec<ModeBind>, KeymapError> {
    let content = std::fs::read_to_string(path)?;
    parse_keymap_yaml(&content)
}

/// Parse bind definitions from a YAML string
pub fn parse_keymap_yaml(yaml: &str) -> Result<Vec<ModeBind>, KeymapError> {
    let config: KeymapConfig = serde_yaml::from_str(yaml)?;
    Ok(config.bindings.into_iter().map(ModeBind::from).collect())
}

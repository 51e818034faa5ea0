//! Per-mode bind tables
//!
//! Binds live in insertion-ordered tables keyed by mode then pattern. The
//! `global` table applies everywhere; a named mode overlays it, and a
//! tombstone (`None`) in a mode hides the global bind with the same pattern.

use std::sync::Arc;

use indexmap::IndexMap;

use super::binding::Bind;
use super::error::ModeNameError;

/// Mode whose binds apply in every mode
pub const GLOBAL_MODE: &str = "global";

type ModeTable = IndexMap<String, Option<Arc<Bind>>>;

/// Bind storage for one session
#[derive(Debug, Clone)]
pub struct Registry {
    modes: IndexMap<String, ModeTable>,
    /// Global chord binds, eligible at every stack depth
    globals: Vec<Arc<Bind>>,
}

impl Registry {
    pub fn new() -> Self {
        let mut modes = IndexMap::new();
        modes.insert(GLOBAL_MODE.to_string(), ModeTable::new());
        Self {
            modes,
            globals: Vec::new(),
        }
    }

    /// Install, replace, or (with `None` or a `-mode`) tombstone a bind
    pub fn add_bind(
        &mut self,
        mode: &str,
        pattern: &str,
        bind: Option<Bind>,
    ) -> Result<(), ModeNameError> {
        validate_mode(mode)?;

        let (mode, bind) = match mode.strip_prefix('-') {
            Some(name) => (name, None),
            None => (mode, bind.map(Arc::new)),
        };

        match &bind {
            Some(b) => tracing::debug!(mode, pattern, id = b.id, "bind added"),
            None => tracing::debug!(mode, pattern, "bind removed"),
        }

        self.modes
            .entry(mode.to_string())
            .or_default()
            .insert(pattern.to_string(), bind);

        if mode == GLOBAL_MODE {
            self.refresh_globals();
        }
        Ok(())
    }

    /// Tombstone `pattern` in `mode`
    pub fn delete_bind(&mut self, mode: &str, pattern: &str) -> Result<(), ModeNameError> {
        self.add_bind(mode, pattern, None)
    }

    /// The bind stored for `pattern` in `mode` only, without the global overlay
    pub fn get(&self, mode: &str, pattern: &str) -> Option<&Arc<Bind>> {
        self.modes.get(mode)?.get(pattern)?.as_ref()
    }

    /// Binds eligible in `mode`, in scan order
    ///
    /// Mode entries replace global entries of the same pattern in place;
    /// patterns new to the mode follow the global ones.
    pub fn effective_binds(&self, mode: &str) -> Vec<Arc<Bind>> {
        let global = &self.modes[GLOBAL_MODE];

        let Some(table) = self.modes.get(mode).filter(|_| mode != GLOBAL_MODE) else {
            return global.values().flatten().cloned().collect();
        };

        let mut merged: ModeTable = global.clone();
        for (pattern, bind) in table {
            merged.insert(pattern.clone(), bind.clone());
        }
        merged.into_values().flatten().collect()
    }

    /// Global chord binds, in registration order
    pub fn globals(&self) -> &[Arc<Bind>] {
        &self.globals
    }

    /// Names of every mode with a table, `global` first
    pub fn modes(&self) -> impl Iterator<Item = &str> {
        self.modes.keys().map(String::as_str)
    }

    /// Number of live binds across all modes
    pub fn len(&self) -> usize {
        self.modes
            .values()
            .map(|t| t.values().filter(|b| b.is_some()).count())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn refresh_globals(&mut self) {
        self.globals = self.modes[GLOBAL_MODE]
            .values()
            .flatten()
            .filter(|b| b.is_global)
            .cloned()
            .collect();
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

/// Check a mode name against `-?[A-Za-z0-9][A-Za-z0-9_]*`
pub fn validate_mode(mode: &str) -> Result<(), ModeNameError> {
    let name = mode.strip_prefix('-').unwrap_or(mode);
    let mut chars = name.chars();
    let valid = matches!(chars.next(), Some(c) if c.is_ascii_alphanumeric())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if valid {
        Ok(())
    } else {
        Err(ModeNameError(mode.to_string()))
    }
}

//! Mirror of the host's config variables
//!
//! The session keeps its own copy of every variable it has written or been
//! told about, so redundant writes can be skipped.

use std::collections::HashMap;

use crate::keymap::KeymapError;

/// Known variable values, empty meaning unset
#[derive(Debug, Clone, Default)]
pub struct Variables {
    values: HashMap<String, String>,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn get_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.get(name).unwrap_or(default)
    }

    /// Store a value, returning whether it changed
    ///
    /// Setting an empty value removes the variable.
    pub fn set(&mut self, name: &str, value: &str) -> bool {
        if value.is_empty() {
            return self.unset(name);
        }
        if self.get(name) == Some(value) {
            return false;
        }
        self.values.insert(name.to_string(), value.to_string());
        true
    }

    /// Remove a value, returning whether it was set
    pub fn unset(&mut self, name: &str) -> bool {
        self.values.remove(name).is_some()
    }

    /// Toggle variables are on unless set to something other than `1`
    pub fn is_enabled(&self, name: &str) -> bool {
        self.get_or(name, "1") == "1"
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Variable names are `[A-Za-z0-9_.]+`
pub fn validate_name(name: &str) -> Result<(), KeymapError> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.');
    if valid {
        Ok(())
    } else {
        Err(KeymapError::syntax(format!("invalid variable name: {:?}", name)))
    }
}

//! Core types for the keymap system: modifier tokens, ModState, Notification

use std::collections::BTreeSet;
use std::fmt;

/// The set of `<Name>` modifier tokens active for a key event
///
/// Ordered so that two states built in different orders compare equal and
/// display identically.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ModState(BTreeSet<String>);

impl ModState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a state from bare or bracketed names: `["Ctrl", "<Shift>"]`
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(names.into_iter().map(|n| modifier_token(n.as_ref())).collect())
    }

    pub fn insert(&mut self, token: String) -> bool {
        self.0.insert(token)
    }

    pub fn remove(&mut self, token: &str) -> bool {
        self.0.remove(token)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.0.contains(token)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn extend(&mut self, other: &ModState) {
        self.0.extend(other.0.iter().cloned());
    }
}

impl fmt::Display for ModState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.0 {
            f.write_str(token)?;
        }
        Ok(())
    }
}

impl FromIterator<String> for ModState {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Wrap a key name as a `<Name>` token, leaving existing brackets alone
pub fn modifier_token(name: &str) -> String {
    let name = name.trim_matches(|c| c == '<' || c == '>');
    format!("<{}>", name)
}

/// Length of a leading `<Name>` modifier token, if `s` starts with one
///
/// Modifier names start with an uppercase ASCII letter and continue with
/// letters, digits, `-` or `_`.
pub fn leading_modifier_len(s: &str) -> Option<usize> {
    let body = s.strip_prefix('<')?;
    let mut chars = body.char_indices();
    match chars.next() {
        Some((_, c)) if c.is_ascii_uppercase() => {}
        _ => return None,
    }
    for (idx, c) in chars {
        if c == '>' {
            return Some(idx + 2);
        }
        if !(c.is_ascii_alphanumeric() || c == '-' || c == '_') {
            return None;
        }
    }
    None
}

/// A keycmd or modcmd notification raised by the tracker
///
/// `chord` selects between the KEYCMD_* and MODCMD_* flavours and `exec`
/// between *_UPDATE and *_EXEC.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub modstate: ModState,
    pub chord: bool,
    pub exec: bool,
}

impl Notification {
    pub fn keycmd_update(modstate: ModState) -> Self {
        Self {
            modstate,
            chord: false,
            exec: false,
        }
    }

    pub fn keycmd_exec(modstate: ModState) -> Self {
        Self {
            modstate,
            chord: false,
            exec: true,
        }
    }

    pub fn modcmd_update(modstate: ModState) -> Self {
        Self {
            modstate,
            chord: true,
            exec: false,
        }
    }

    pub fn modcmd_exec(modstate: ModState) -> Self {
        Self {
            modstate,
            chord: true,
            exec: true,
        }
    }

    /// Event name as raised on the event bus
    pub fn name(&self) -> &'static str {
        match (self.chord, self.exec) {
            (false, false) => "KEYCMD_UPDATE",
            (false, true) => "KEYCMD_EXEC",
            (true, false) => "MODCMD_UPDATE",
            (true, true) => "MODCMD_EXEC",
        }
    }
}

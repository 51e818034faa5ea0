//! Keycmd/modcmd tracker
//!
//! Turns raw key press and release events into keylet changes:
//!
//! - printable keys are inserted into the keycmd at the cursor
//! - named keys (`Control_L`, `Escape`, ...) become `<Name>` modifier tokens
//! - while any non-ignored modifier is active, printable keys build the
//!   modcmd instead
//! - releasing a named key ends the chord
//!
//! Key names pass through a modmap first, so `Control_L` and `Control_R`
//! can both become `<Ctrl>`.

mod completion;
mod history;
mod keylet;

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::keymap::{modifier_token, KeymapError, ModState};

pub use completion::{partial_keyword, Completion, Level, Partial, Step};
pub use history::History;
pub use keylet::{CursorPos, Keylet};

/// What a key press did to the keylet
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Press {
    /// The keylet changed; raise an update with this modifier state
    Update(ModState),
    /// Keycmd events are disabled and the keycmd was cleared instead
    Cleared,
}

/// What a key release did to the keylet
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Release {
    /// Printable keys don't affect the chord
    Printable,
    /// A named key was released; the chord ends after `exec` (if any) fires
    Named { exec: Option<ModState> },
}

/// Per-session key tracker
#[derive(Debug, Clone, Default)]
pub struct KeyCmd {
    keylet: Keylet,
    modmaps: HashMap<String, String>,
    ignores: IndexMap<String, glob::Pattern>,
}

impl KeyCmd {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keylet(&self) -> &Keylet {
        &self.keylet
    }

    pub fn keylet_mut(&mut self) -> &mut Keylet {
        &mut self.keylet
    }

    /// Map key `from` to `to`; angle brackets on either side are ignored
    ///
    /// ```text
    /// MODMAP <Control> <Ctrl>
    /// MODMAP <ISO_Left_Tab> <Shift-Tab>
    /// ```
    pub fn add_modmap(&mut self, from: &str, to: &str) -> Result<(), KeymapError> {
        let from = from.trim_matches(|c| c == '<' || c == '>');
        let to = to.trim_matches(|c| c == '<' || c == '>');
        if from.is_empty() || to.is_empty() {
            return Err(KeymapError::syntax(format!(
                "invalid modmap: {:?} -> {:?}",
                from, to
            )));
        }
        tracing::debug!(from, to, "modmap added");
        self.modmaps.insert(from.to_string(), to.to_string());
        Ok(())
    }

    /// Apply the modmap, retrying without a `_L`/`_R` suffix
    pub fn modmap_key(&self, key: &str) -> String {
        if let Some(mapped) = self.modmaps.get(key) {
            return mapped.clone();
        }
        match key.strip_suffix("_L").or_else(|| key.strip_suffix("_R")) {
            Some(base) => self.modmap_key(base),
            None => key.to_string(),
        }
    }

    /// Ignore modifier tokens matching `glob`, e.g. `<Shift>` or `<ISO_*>`
    pub fn add_ignore(&mut self, glob: &str) -> Result<(), KeymapError> {
        let name = glob.trim_matches(|c| c == '<' || c == '>' || c == ' ');
        if name.is_empty() {
            return Err(KeymapError::syntax(format!("invalid ignore rule: {:?}", glob)));
        }

        let token = modifier_token(name);
        let pattern = glob::Pattern::new(&token)
            .map_err(|e| KeymapError::syntax(format!("invalid ignore rule {:?}: {}", glob, e)))?;

        tracing::debug!(rule = %token, "key ignore added");
        self.ignores.insert(token, pattern);
        Ok(())
    }

    /// Check a `<Name>` token against the ignore rules
    pub fn is_ignored(&self, token: &str) -> bool {
        self.ignores.values().any(|p| p.matches(token))
    }

    /// Modifier state for an event: its `|`-separated modifiers plus held keys
    pub fn modstate(&self, mods: &str) -> ModState {
        let mut state: ModState = mods
            .split('|')
            .filter(|m| !m.is_empty())
            .map(|m| modifier_token(&self.modmap_key(m)))
            .collect();
        state.extend(&self.keylet.held);
        state
    }

    /// Handle a key press
    ///
    /// With `keycmd_events` off, printable keys clear the keycmd rather
    /// than insert into it.
    pub fn key_press(&mut self, mods: &str, key: &str, keycmd_events: bool) -> Press {
        let mut modstate = self.modstate(mods);
        let key = self.modmap_key(key);
        let is_modcmd = modstate.iter().any(|m| !self.is_ignored(m));
        self.keylet.is_modcmd = is_modcmd;

        tracing::trace!(%modstate, key = %key, "key press");

        if !is_modcmd && key.eq_ignore_ascii_case("space") {
            self.keylet.insert_keycmd(" ");
        } else if !is_modcmd && key.chars().count() == 1 {
            if !keycmd_events {
                self.keylet.clear_keycmd();
                return Press::Cleared;
            }
            self.keylet.insert_keycmd(&key);
        } else if key.chars().count() == 1 {
            self.keylet.append_modcmd(&key);
        } else {
            let token = modifier_token(&key);
            if !self.is_ignored(&token) {
                modstate.insert(token.clone());
                self.keylet.held.insert(token);
                self.keylet.is_modcmd = true;
            }
        }

        Press::Update(modstate)
    }

    /// Handle a key release
    ///
    /// The caller raises the modcmd exec (if any) before clearing the chord
    /// with [`KeyCmd::clear_modcmd`].
    pub fn key_release(&mut self, mods: &str, key: &str) -> Release {
        let modstate = self.modstate(mods);
        let key = self.modmap_key(key);

        tracing::trace!(%modstate, key = %key, "key release");

        if key.chars().count() <= 1 {
            return Release::Printable;
        }

        self.keylet.held.remove(&modifier_token(&key));
        let exec = self.keylet.is_modcmd.then_some(modstate);
        Release::Named { exec }
    }

    pub fn clear_keycmd(&mut self) {
        self.keylet.clear_keycmd();
    }

    pub fn clear_modcmd(&mut self) {
        self.keylet.clear_modcmd();
    }

    /// Clear the modcmd while a chord is active, otherwise the keycmd
    ///
    /// Returns the variable that was cleared.
    pub fn clear_current(&mut self) -> &'static str {
        if self.keylet.is_modcmd {
            self.clear_modcmd();
            "modcmd"
        } else {
            self.clear_keycmd();
            "keycmd"
        }
    }
}

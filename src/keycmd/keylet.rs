//! Keylet: the command line being typed plus the current modifier chord

use std::fmt;
use std::str::FromStr;

use crate::keymap::{KeymapError, ModState};
use crate::util::display_escape;

/// Markup wrapped around the character under the cursor
const CURSOR_OPEN: &str = "<span @cursor_style>";
const CURSOR_CLOSE: &str = "</span>";

/// Target for a cursor move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorPos {
    /// One character left (`-`)
    Left,
    /// One character right (`+`)
    Right,
    /// Absolute index; negative counts from the end, `-1` being past the last char
    At(isize),
}

impl FromStr for CursorPos {
    type Err = KeymapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "-" => Ok(CursorPos::Left),
            "+" => Ok(CursorPos::Right),
            other => other
                .parse()
                .map(CursorPos::At)
                .map_err(|_| KeymapError::syntax(format!("invalid cursor position: {:?}", s))),
        }
    }
}

/// Per-session typing state
///
/// The cursor is a character index into `keycmd`, always within
/// `0..=keycmd.chars().count()`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keylet {
    keycmd: String,
    cursor: usize,
    modcmd: String,
    /// A non-ignored modifier is active, so keys build the modcmd
    pub is_modcmd: bool,
    /// Named keys pressed and not yet released
    pub held: ModState,
}

impl Keylet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keycmd(&self) -> &str {
        &self.keycmd
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The chord text, empty unless a chord is active
    pub fn modcmd(&self) -> &str {
        if self.is_modcmd {
            &self.modcmd
        } else {
            ""
        }
    }

    fn len(&self) -> usize {
        self.keycmd.chars().count()
    }

    /// Byte offset of character index `idx`
    fn byte_at(&self, idx: usize) -> usize {
        self.keycmd
            .char_indices()
            .nth(idx)
            .map(|(b, _)| b)
            .unwrap_or(self.keycmd.len())
    }

    pub fn clear_keycmd(&mut self) {
        self.keycmd.clear();
        self.cursor = 0;
    }

    pub fn clear_modcmd(&mut self) {
        self.modcmd.clear();
        self.is_modcmd = false;
    }

    /// Replace the keycmd, cursor at the end
    pub fn set_keycmd(&mut self, keycmd: &str) {
        self.keycmd = keycmd.to_string();
        self.cursor = self.len();
    }

    /// Insert at the cursor and move the cursor past the insertion
    pub fn insert_keycmd(&mut self, s: &str) {
        let at = self.byte_at(self.cursor);
        self.keycmd.insert_str(at, s);
        self.cursor += s.chars().count();
    }

    /// Append to the end, cursor at the end
    pub fn append_keycmd(&mut self, s: &str) {
        self.keycmd.push_str(s);
        self.cursor = self.len();
    }

    pub fn append_modcmd(&mut self, s: &str) {
        self.modcmd.push_str(s);
    }

    /// Remove the character before the cursor
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let at = self.byte_at(self.cursor - 1);
        self.keycmd.remove(at);
        self.cursor -= 1;
        true
    }

    /// Remove the character under the cursor
    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.len() {
            return false;
        }
        let at = self.byte_at(self.cursor);
        self.keycmd.remove(at);
        true
    }

    /// Remove the word before the cursor, like readline's `^W`
    ///
    /// Trailing separators before the cursor go with the word. Text after
    /// the cursor is kept. Returns the removed word, or `None` if nothing
    /// changed.
    pub fn strip_word(&mut self, seps: &str) -> Option<String> {
        if self.keycmd.is_empty() {
            return None;
        }

        let split = self.byte_at(self.cursor);
        let (head, tail) = self.keycmd.split_at(split);
        let trimmed = head.trim_end_matches(|c| seps.contains(c));
        let start = trimmed
            .rfind(|c| seps.contains(c))
            .map(|p| p + trimmed[p..].chars().next().map_or(1, char::len_utf8))
            .unwrap_or(0);

        if start == head.len() {
            return None;
        }

        let word = trimmed[start..].to_string();
        let keycmd = format!("{}{}", &head[..start], tail);
        self.cursor = head[..start].chars().count();
        self.keycmd = keycmd;
        Some(word)
    }

    /// Move the cursor, clamped to the keycmd; returns the new position
    pub fn set_cursor(&mut self, pos: CursorPos) -> usize {
        let len = self.len() as isize;
        let target = match pos {
            CursorPos::Left => self.cursor as isize - 1,
            CursorPos::Right => self.cursor as isize + 1,
            CursorPos::At(n) if n < 0 => len + n + 1,
            CursorPos::At(n) => n,
        };
        self.cursor = target.clamp(0, len) as usize;
        self.cursor
    }

    /// The keycmd with cursor markup around the character under the cursor
    ///
    /// At the end of the line the cursor is drawn over a space.
    pub fn markup(&self) -> String {
        let at = self.byte_at(self.cursor);
        let (before, rest) = self.keycmd.split_at(at);
        let mut chars = rest.chars();
        let current = chars.next().map_or_else(|| " ".to_string(), String::from);
        let after = chars.as_str();

        format!(
            "{}{}{}{}{}",
            display_escape(before),
            CURSOR_OPEN,
            display_escape(&current),
            CURSOR_CLOSE,
            display_escape(after)
        )
    }
}

impl fmt::Display for Keylet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.is_modcmd {
            parts.push(format!("modcmd={:?}", self.modcmd()));
        }
        if !self.keycmd.is_empty() {
            parts.push(format!("keycmd={:?}", self.keycmd));
        }
        write!(f, "<keylet({})>", parts.join(", "))
    }
}

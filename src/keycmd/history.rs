//! Submitted keycmd lines, kept separately for each prompt
//!
//! Lines typed at `uri:` are not offered back at `search:`. Browsing moves a
//! cursor over the current prompt's lines; the text that was being typed
//! when browsing started (the tail) comes back once the cursor walks past
//! the newest line.

use std::collections::HashMap;

/// Per-prompt keycmd history
#[derive(Debug, Clone, Default)]
pub struct History {
    lines: HashMap<String, Vec<String>>,
    prompt: String,
    /// Index into the current prompt's lines; `Some(-1)` is past the oldest
    cursor: Option<isize>,
    tail: Option<String>,
    search: Option<String>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// The prompt whose lines are browsed
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Switch prompts, dropping any browse in progress
    pub fn set_prompt(&mut self, prompt: &str) {
        self.prompt = prompt.to_string();
        self.reset();
    }

    /// Lines recorded under `prompt`, oldest first
    pub fn lines(&self, prompt: &str) -> &[String] {
        self.lines.get(prompt).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Record a submitted line under `prompt` and end any browse
    pub fn record(&mut self, prompt: &str, line: &str) {
        if !line.is_empty() {
            self.lines
                .entry(prompt.to_string())
                .or_default()
                .push(line.to_string());
        }
        self.reset();
    }

    /// Step to the previous line
    ///
    /// `current` is the keycmd being edited; it is kept as the tail when
    /// browsing starts. Returns `None` once there is nothing older.
    pub fn prev(&mut self, current: &str) -> Option<String> {
        self.keep_tail(current);
        self.step_back()
    }

    fn step_back(&mut self) -> Option<String> {
        let lines = self.lines.get(&self.prompt).map(Vec::as_slice).unwrap_or(&[]);
        let mut cursor = match self.cursor {
            None => lines.len() as isize - 1,
            Some(cursor) => (cursor - 1).max(-1),
        };
        if let Some(key) = &self.search {
            while cursor >= 0 && !lines[cursor as usize].contains(key.as_str()) {
                cursor -= 1;
            }
        }

        if cursor < 0 {
            self.cursor = Some(-1);
            return None;
        }
        self.cursor = Some(cursor);
        Some(lines[cursor as usize].clone())
    }

    /// Step to the next line, or back to the tail after the newest one
    ///
    /// Returns `None` when not browsing.
    pub fn next(&mut self) -> Option<String> {
        let cursor = self.cursor?;
        let lines = self.lines.get(&self.prompt).map(Vec::as_slice).unwrap_or(&[]);

        let mut cursor = cursor + 1;
        if let Some(key) = &self.search {
            while (cursor as usize) < lines.len()
                && !lines[cursor as usize].contains(key.as_str())
            {
                cursor += 1;
            }
        }

        if cursor as usize >= lines.len() {
            let tail = self.tail.take().unwrap_or_default();
            self.cursor = None;
            self.search = None;
            return Some(tail);
        }
        self.cursor = Some(cursor);
        Some(lines[cursor as usize].clone())
    }

    /// Restart browsing from the newest line containing `key`
    pub fn search(&mut self, key: &str, current: &str) -> Option<String> {
        self.keep_tail(current);
        self.search = (!key.is_empty()).then(|| key.to_string());
        self.cursor = None;
        self.step_back()
    }

    pub fn is_browsing(&self) -> bool {
        self.cursor.is_some()
    }

    fn keep_tail(&mut self, current: &str) {
        if self.cursor.is_none() && !current.is_empty() {
            self.tail = Some(current.to_string());
        }
    }

    fn reset(&mut self) {
        self.cursor = None;
        self.tail = None;
        self.search = None;
    }
}

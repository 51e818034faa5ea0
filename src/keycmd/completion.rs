//! Keyword completion for the keycmd
//!
//! Candidates are command names announced by the host plus `@name` for
//! every variable seen. Each start request raises the completion level:
//!
//! ```text
//! Off → Once      fill in the prefix the hints share
//!     → List      also show the hints in `completion_list`
//!     → Complete  accept the keyword as typed if it is itself a hint
//! ```

use std::collections::BTreeSet;

use crate::util::escape_chars;

/// How far repeated start requests have gone
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Level {
    #[default]
    Off,
    Once,
    List,
    Complete,
}

impl Level {
    fn raised(self) -> Self {
        match self {
            Level::Off => Level::Once,
            Level::Once => Level::List,
            Level::List | Level::Complete => Level::Complete,
        }
    }
}

/// The keyword being completed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partial {
    /// `@name` for variables, a bare word otherwise
    pub word: String,
    /// Written as `set name`, so completion appends ` = `
    pub is_set: bool,
}

impl Partial {
    /// What to insert after the keycmd to finish `hint`
    fn finish(&self, hint: &str) -> String {
        let suffix = if self.is_set { " = " } else { " " };
        format!("{}{}", &hint[self.word.len()..], suffix)
    }
}

/// What a start request does to the keycmd
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// No candidate fits
    Nothing,
    /// Insert the text and end completion
    Finish(String),
    /// Insert the shared prefix (possibly empty) and keep completing
    Extend(String),
}

fn is_word(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// Find the keyword ending at character index `cursor`
///
/// `@name` and `set name` both complete variable names. Returns `None`
/// when the cursor is not right after a word.
pub fn partial_keyword(keycmd: &str, cursor: usize) -> Option<Partial> {
    let left: String = keycmd.chars().take(cursor).collect();
    let start = left
        .char_indices()
        .rev()
        .take_while(|(_, ch)| is_word(*ch))
        .last()
        .map(|(i, _)| i)?;

    let word = &left[start..];
    let before = &left[..start];
    let trimmed = before.trim_end();

    let partial = if before.ends_with('@') {
        Partial {
            word: format!("@{}", word),
            is_set: false,
        }
    } else if trimmed.len() < before.len() && trimmed.ends_with("set") {
        Partial {
            word: format!("@{}", word),
            is_set: true,
        }
    } else {
        Partial {
            word: word.to_string(),
            is_set: false,
        }
    };
    Some(partial)
}

/// Completion candidates and the current level
#[derive(Debug, Clone, Default)]
pub struct Completion {
    candidates: BTreeSet<String>,
    level: Level,
}

impl Completion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(&self) -> Level {
        self.level
    }

    /// Add host command names
    pub fn add_builtins<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            let name = name.as_ref();
            if !name.is_empty() {
                self.candidates.insert(name.to_string());
            }
        }
    }

    /// Add `@name` for a variable
    pub fn add_var(&mut self, name: &str) {
        self.candidates.insert(format!("@{}", name));
    }

    /// Candidates starting with `prefix`, sorted
    pub fn hints(&self, prefix: &str) -> Vec<&str> {
        self.candidates
            .iter()
            .filter(|c| c.starts_with(prefix))
            .map(String::as_str)
            .collect()
    }

    /// Raise the level and work out what to insert for `partial`
    pub fn advance(&mut self, partial: &Partial) -> Step {
        self.level = self.level.raised();

        let hints = self.hints(&partial.word);
        match hints.as_slice() {
            [] => Step::Nothing,
            [only] => Step::Finish(partial.finish(only)),
            _ if self.level == Level::Complete && hints.contains(&partial.word.as_str()) => {
                Step::Finish(partial.finish(&partial.word))
            }
            _ => {
                let shared = common_prefix(&hints);
                Step::Extend(shared[partial.word.len()..].to_string())
            }
        }
    }

    /// The hint list for `prefix`, empty when nothing fits
    pub fn list(&self, prefix: &str) -> String {
        let hints = self.hints(prefix);
        if hints.is_empty() {
            return String::new();
        }

        let items: Vec<String> = hints
            .iter()
            .map(|hint| {
                let (head, rest) = hint.split_at(prefix.len());
                format!(
                    "<span @hint_style>{}</span>{}",
                    escape_chars(head, &['@']),
                    rest
                )
            })
            .collect();
        format!("<span> {} </span>", items.join(" "))
    }

    pub fn stop(&mut self) {
        self.level = Level::Off;
    }
}

/// Longest prefix shared by every hint
fn common_prefix<'a>(hints: &[&'a str]) -> &'a str {
    let Some((first, rest)) = hints.split_first() else {
        return "";
    };
    let mut len = first.len();
    for hint in rest {
        len = first
            .char_indices()
            .zip(hint.chars())
            .take_while(|((_, a), b)| a == b)
            .last()
            .map(|((i, a), _)| i + a.len_utf8())
            .unwrap_or(0)
            .min(len);
    }
    &first[..len]
}

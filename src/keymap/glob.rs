//! Bind pattern compiler
//!
//! A pattern is a run of keystroke groups separated by prompt tokens:
//!
//! ```text
//! o<location:>_        "o", then prompt "location:", then an exec-fired capture
//! <Ctrl><Shift>r       a single modifier-chord segment
//! fl*                  "fl" followed by a live capture
//! O<uri:'http://'>_    prompt with a preset value injected into the keycmd
//! x<go!event FOO>_     prompt whose preset is sent as a command
//! ```
//!
//! The last character of each keystroke group selects when it fires and
//! whether it captures trailing text:
//!
//! | suffix | fires on | captures |
//! |--------|----------|----------|
//! | `_`    | exec     | yes      |
//! | `!`    | exec     | no       |
//! | `*`    | update   | yes      |
//! | other  | update   | no       |

use super::error::PatternError;
use super::types::{leading_modifier_len, ModState};
use crate::util::unquote;

/// One keystroke group of a compiled bind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Fires on *_EXEC notifications instead of *_UPDATE
    pub on_exec: bool,
    /// Text after `literal` is captured as an argument
    pub has_args: bool,
    /// Modifier tokens; non-empty means this segment matches the modcmd
    pub mods: ModState,
    /// Fixed text to match, flag character removed
    pub literal: String,
    /// Position of this segment in the bind, 0 = first typed
    pub index: usize,
    /// Whether further segments follow this one
    pub more: bool,
}

impl Segment {
    /// Check if this segment is matched against the modifier chord
    pub fn is_chord(&self) -> bool {
        !self.mods.is_empty()
    }

    /// Match `text` against this segment
    ///
    /// Returns `None` on mismatch, otherwise the captured argument (if the
    /// segment captures).
    pub fn capture(&self, text: &str) -> Option<Option<String>> {
        if self.has_args {
            text.strip_prefix(self.literal.as_str())
                .map(|rest| Some(rest.to_string()))
        } else if text == self.literal {
            Some(None)
        } else {
            None
        }
    }
}

/// A prompt shown while waiting for the segment that follows it
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Prompt {
    /// Label shown to the user, always ending in `:` unless empty
    pub label: String,
    /// The preset is a command to send rather than text to inject
    pub is_command: bool,
    /// Preset value, empty for none
    pub preset: String,
}

/// Result of compiling a pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledGlob {
    pub segments: Vec<Segment>,
    /// `prompts[i]` is shown before `segments[i + 1]`
    pub prompts: Vec<Prompt>,
}

impl CompiledGlob {
    /// Exactly one segment, and it is a modifier chord
    pub fn is_global(&self) -> bool {
        self.segments.len() == 1 && self.segments[0].is_chord()
    }
}

/// Compile a bind pattern into its segments and prompts
pub fn compile(pattern: &str) -> Result<CompiledGlob, PatternError> {
    if pattern.is_empty() {
        return Err(PatternError::Blank);
    }

    let (groups, prompts) = split_prompts(pattern);
    let last = groups.len() - 1;

    for (index, group) in groups.iter().enumerate() {
        let stray_wildcard = match group.find('*') {
            Some(pos) => index != last || pos + 1 != group.len(),
            None => false,
        };
        if stray_wildcard {
            return Err(PatternError::WildcardNotTerminal {
                pattern: pattern.to_string(),
            });
        }
        if last > 0 && group.is_empty() {
            return Err(PatternError::EmptySegment {
                pattern: pattern.to_string(),
                index,
            });
        }
    }

    let segments = groups
        .iter()
        .enumerate()
        .map(|(index, group)| segment(group, index, index < last))
        .collect();

    Ok(CompiledGlob { segments, prompts })
}

fn segment(group: &str, index: usize, more: bool) -> Segment {
    let (on_exec, has_args) = match group.chars().last() {
        Some('_') => (true, true),
        Some('!') => (true, false),
        Some('*') => (false, true),
        _ => (false, false),
    };

    let mut rest = if on_exec || has_args {
        &group[..group.len() - 1]
    } else {
        group
    };

    let mut mods = ModState::new();
    while let Some(len) = leading_modifier_len(rest) {
        mods.insert(rest[..len].to_string());
        rest = &rest[len..];
    }

    Segment {
        on_exec,
        has_args,
        mods,
        literal: rest.to_string(),
        index,
        more,
    }
}

/// Split a pattern on prompt tokens: `n + 1` keystroke groups around `n` prompts
fn split_prompts(pattern: &str) -> (Vec<String>, Vec<Prompt>) {
    let mut groups = Vec::new();
    let mut prompts = Vec::new();
    let mut current = String::new();
    let mut pos = 0;

    while let Some(ch) = pattern[pos..].chars().next() {
        if ch == '<' {
            if let Some((prompt, len)) = prompt_at(&pattern[pos..]) {
                groups.push(std::mem::take(&mut current));
                prompts.push(prompt);
                pos += len;
                continue;
            }
        }
        current.push(ch);
        pos += ch.len_utf8();
    }
    groups.push(current);

    (groups, prompts)
}

/// Parse `<label:preset>` or `<label!preset>` at the start of `s`
///
/// Label and preset may be single- or double-quoted to embed `:`, `!` or
/// `>`. Returns the prompt and the number of bytes consumed.
fn prompt_at(s: &str) -> Option<(Prompt, usize)> {
    let body = s.strip_prefix('<')?;

    for label_len in alternatives(body, |c| c == ':' || c == '!' || c == '>') {
        let after_label = &body[label_len..];
        let is_command = match after_label.chars().next() {
            Some(':') => false,
            Some('!') => true,
            _ => continue,
        };
        let tail = &after_label[1..];

        for preset_len in alternatives(tail, |c| c == '>') {
            if tail[preset_len..].starts_with('>') {
                let mut label = unquote(&body[..label_len]);
                if !label.is_empty() && !label.ends_with(':') {
                    label.push(':');
                }
                let prompt = Prompt {
                    label,
                    is_command,
                    preset: unquote(&tail[..preset_len]),
                };
                return Some((prompt, 1 + label_len + 1 + preset_len + 1));
            }
        }
    }

    None
}

/// Candidate lengths for a prompt field: a quoted run first, then a plain run
/// stopping at any `stop` character
fn alternatives(s: &str, stop: impl Fn(char) -> bool) -> Vec<usize> {
    let mut out = Vec::with_capacity(2);
    if let Some(quote) = s.chars().next().filter(|c| *c == '"' || *c == '\'') {
        if let Some(close) = s[1..].find(quote) {
            out.push(close + 2);
        }
    }
    out.push(s.find(|c| stop(c)).unwrap_or(s.len()));
    out
}

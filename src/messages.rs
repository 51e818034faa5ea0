//! Inbound event types
//!
//! Every state change in a session is driven by one of these events. Hosts
//! deliver them as text lines (`KEY_PRESS '' a`, `MODE_CHANGED insert`, ...)
//! which [`Event::parse`] turns into typed values.

use crate::keycmd::CursorPos;
use crate::keymap::KeymapError;
use crate::util::Arguments;

/// Events a session responds to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    // === Raw keys ===
    /// A key went down; `mods` is a `|`-separated modifier list
    KeyPress { mods: String, key: String },
    /// A key went up
    KeyRelease { mods: String, key: String },

    // === Command line edits ===
    /// Replace the keycmd
    SetKeycmd(String),
    /// Insert at the cursor
    InjectKeycmd(String),
    /// Append to the end
    AppendKeycmd(String),
    /// Remove the character before the cursor
    KeycmdBackspace,
    /// Remove the character under the cursor
    KeycmdDelete,
    /// Remove the word before the cursor, split on these separators
    KeycmdStripWord(Option<String>),
    /// Run the keycmd as if it were submitted
    KeycmdExecCurrent,
    /// Clear the keycmd
    KeycmdClear,
    /// Move the cursor
    SetCursorPos(CursorPos),

    // === History and completion ===
    /// Show the previous line submitted at this prompt
    HistoryPrev,
    /// Show the next line, or the text typed before browsing
    HistoryNext,
    /// Show the newest earlier line containing this text
    HistorySearch(String),
    /// Complete the keyword before the cursor
    StartCompletion,
    /// Hide the completion list
    StopCompletion,
    /// Command names the host understands
    Builtins(Vec<String>),

    // === Configuration ===
    /// Map key name `from` to `to`
    Modmap { from: String, to: String },
    /// Ignore modifiers matching this glob
    IgnoreKey(String),
    /// `<pattern> = <command>`, bound in the global mode
    Bind(String),
    /// `<mode-list> <pattern> = <command>`
    ModeBind(String),
    /// Set `var` to `value` whenever `mode` becomes active
    ModeConfig {
        mode: String,
        var: String,
        value: String,
    },

    // === Host state ===
    /// The host switched modes
    ModeChanged(String),
    /// The host set a variable
    VariableSet { name: String, value: String },
}

impl Event {
    /// Parse one `NAME args...` event line
    pub fn parse(line: &str) -> Result<Self, KeymapError> {
        let line = line.trim();
        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim_start()),
            None => (line, ""),
        };

        let event = match name {
            "KEY_PRESS" | "MOD_PRESS" => {
                let (mods, key) = key_args(name, rest)?;
                Event::KeyPress { mods, key }
            }
            "KEY_RELEASE" | "MOD_RELEASE" => {
                let (mods, key) = key_args(name, rest)?;
                Event::KeyRelease { mods, key }
            }
            "SET_KEYCMD" => Event::SetKeycmd(rest.to_string()),
            "INJECT_KEYCMD" => Event::InjectKeycmd(rest.to_string()),
            "APPEND_KEYCMD" => Event::AppendKeycmd(rest.to_string()),
            "KEYCMD_BACKSPACE" => Event::KeycmdBackspace,
            "KEYCMD_DELETE" => Event::KeycmdDelete,
            "KEYCMD_STRIP_WORD" => {
                let args = Arguments::parse(rest);
                if args.len() > 1 {
                    return Err(KeymapError::syntax(format!(
                        "{} takes at most one argument: {:?}",
                        name, rest
                    )));
                }
                Event::KeycmdStripWord(args.get(0).map(str::to_string))
            }
            "KEYCMD_EXEC_CURRENT" => Event::KeycmdExecCurrent,
            "KEYCMD_CLEAR" => Event::KeycmdClear,
            "SET_CURSOR_POS" => {
                let args = Arguments::parse(rest);
                if args.len() != 1 {
                    return Err(KeymapError::syntax(format!(
                        "{} takes one argument: {:?}",
                        name, rest
                    )));
                }
                Event::SetCursorPos(args[0].parse()?)
            }
            "HISTORY_PREV" => Event::HistoryPrev,
            "HISTORY_NEXT" => Event::HistoryNext,
            "HISTORY_SEARCH" => Event::HistorySearch(rest.to_string()),
            "START_COMPLETION" => Event::StartCompletion,
            "STOP_COMPLETION" => Event::StopCompletion,
            "BUILTINS" => {
                let args = Arguments::parse(rest);
                Event::Builtins(
                    args.iter()
                        .flat_map(|arg| arg.split_whitespace())
                        .map(str::to_string)
                        .collect(),
                )
            }
            "MODMAP" => {
                let args = Arguments::parse(rest);
                if args.len() != 2 {
                    return Err(KeymapError::syntax(format!("invalid modmap: {:?}", rest)));
                }
                Event::Modmap {
                    from: args[0].to_string(),
                    to: args[1].to_string(),
                }
            }
            "IGNORE_KEY" => Event::IgnoreKey(rest.to_string()),
            "BIND" => Event::Bind(rest.to_string()),
            "MODE_BIND" => Event::ModeBind(rest.to_string()),
            "MODE_CONFIG" => parse_mode_config(rest)?,
            "MODE_CHANGED" => {
                let args = Arguments::parse(rest);
                Event::ModeChanged(args.get(0).unwrap_or_default().to_string())
            }
            "VARIABLE_SET" => {
                let args = Arguments::parse(rest);
                let name = args
                    .get(0)
                    .ok_or_else(|| KeymapError::syntax("VARIABLE_SET needs a name"))?;
                Event::VariableSet {
                    name: name.to_string(),
                    value: args.raw(1).to_string(),
                }
            }
            other => {
                return Err(KeymapError::syntax(format!("unknown event: {:?}", other)));
            }
        };

        Ok(event)
    }

    /// The event name used on the wire
    pub fn name(&self) -> &'static str {
        match self {
            Event::KeyPress { .. } => "KEY_PRESS",
            Event::KeyRelease { .. } => "KEY_RELEASE",
            Event::SetKeycmd(_) => "SET_KEYCMD",
            Event::InjectKeycmd(_) => "INJECT_KEYCMD",
            Event::AppendKeycmd(_) => "APPEND_KEYCMD",
            Event::KeycmdBackspace => "KEYCMD_BACKSPACE",
            Event::KeycmdDelete => "KEYCMD_DELETE",
            Event::KeycmdStripWord(_) => "KEYCMD_STRIP_WORD",
            Event::KeycmdExecCurrent => "KEYCMD_EXEC_CURRENT",
            Event::KeycmdClear => "KEYCMD_CLEAR",
            Event::SetCursorPos(_) => "SET_CURSOR_POS",
            Event::HistoryPrev => "HISTORY_PREV",
            Event::HistoryNext => "HISTORY_NEXT",
            Event::HistorySearch(_) => "HISTORY_SEARCH",
            Event::StartCompletion => "START_COMPLETION",
            Event::StopCompletion => "STOP_COMPLETION",
            Event::Builtins(_) => "BUILTINS",
            Event::Modmap { .. } => "MODMAP",
            Event::IgnoreKey(_) => "IGNORE_KEY",
            Event::Bind(_) => "BIND",
            Event::ModeBind(_) => "MODE_BIND",
            Event::ModeConfig { .. } => "MODE_CONFIG",
            Event::ModeChanged(_) => "MODE_CHANGED",
            Event::VariableSet { .. } => "VARIABLE_SET",
        }
    }
}

/// `<mods> <key>` or just `<key>`
fn key_args(name: &str, rest: &str) -> Result<(String, String), KeymapError> {
    let args = Arguments::parse(rest);
    match args.len() {
        1 => Ok((String::new(), args[0].to_string())),
        2 => Ok((args[0].to_string(), args[1].to_string())),
        _ => Err(KeymapError::syntax(format!(
            "{} expects [mods] key, got {:?}",
            name, rest
        ))),
    }
}

/// `<mode> <var> = <value>`
///
/// The value is the rest of the line, unquoted only when it is a single
/// quoted argument.
fn parse_mode_config(rest: &str) -> Result<Event, KeymapError> {
    let args = Arguments::parse(rest);
    let invalid = || KeymapError::syntax(format!("invalid mode config: {:?}", rest));

    if args.len() < 3 || &args[2] != "=" {
        return Err(invalid());
    }

    let raw = args.raw(3);
    let value = if args.len() == 4 {
        args[3].to_string()
    } else {
        raw.to_string()
    };

    Ok(Event::ModeConfig {
        mode: args[0].to_string(),
        var: args[1].to_string(),
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_events() {
        assert_eq!(
            Event::parse("KEY_PRESS 'Ctrl|Shift' r").unwrap(),
            Event::KeyPress {
                mods: "Ctrl|Shift".into(),
                key: "r".into()
            }
        );
        assert_eq!(
            Event::parse("KEY_RELEASE '' Control_L").unwrap(),
            Event::KeyRelease {
                mods: String::new(),
                key: "Control_L".into()
            }
        );
        assert_eq!(
            Event::parse("KEY_PRESS a").unwrap(),
            Event::KeyPress {
                mods: String::new(),
                key: "a".into()
            }
        );
        assert!(Event::parse("KEY_PRESS").is_err());
    }

    #[test]
    fn test_parse_keycmd_edits() {
        assert_eq!(
            Event::parse("SET_KEYCMD uri http://x").unwrap(),
            Event::SetKeycmd("uri http://x".into())
        );
        assert_eq!(
            Event::parse("KEYCMD_STRIP_WORD").unwrap(),
            Event::KeycmdStripWord(None)
        );
        assert_eq!(
            Event::parse("KEYCMD_STRIP_WORD '/ '").unwrap(),
            Event::KeycmdStripWord(Some("/ ".into()))
        );
        assert_eq!(
            Event::parse("SET_CURSOR_POS -2").unwrap(),
            Event::SetCursorPos(CursorPos::At(-2))
        );
        assert!(Event::parse("SET_CURSOR_POS").is_err());
        assert!(Event::parse("SET_CURSOR_POS x").is_err());
    }

    #[test]
    fn test_parse_history_and_completion() {
        assert_eq!(Event::parse("HISTORY_PREV").unwrap(), Event::HistoryPrev);
        assert_eq!(
            Event::parse("HISTORY_SEARCH open tab").unwrap(),
            Event::HistorySearch("open tab".into())
        );
        assert_eq!(
            Event::parse("START_COMPLETION").unwrap(),
            Event::StartCompletion
        );
        assert_eq!(
            Event::parse("BUILTINS 'back forward' reload").unwrap(),
            Event::Builtins(vec!["back".into(), "forward".into(), "reload".into()])
        );
        assert_eq!(Event::parse("BUILTINS").unwrap(), Event::Builtins(vec![]));
    }

    #[test]
    fn test_parse_mode_config() {
        assert_eq!(
            Event::parse("MODE_CONFIG insert forward_keys = 1").unwrap(),
            Event::ModeConfig {
                mode: "insert".into(),
                var: "forward_keys".into(),
                value: "1".into()
            }
        );
        assert_eq!(
            Event::parse("MODE_CONFIG command status = 'a b'").unwrap(),
            Event::ModeConfig {
                mode: "command".into(),
                var: "status".into(),
                value: "a b".into()
            }
        );
        assert_eq!(
            Event::parse("MODE_CONFIG command status = <b>cmd</b> mode").unwrap(),
            Event::ModeConfig {
                mode: "command".into(),
                var: "status".into(),
                value: "<b>cmd</b> mode".into()
            }
        );
        assert!(Event::parse("MODE_CONFIG insert forward_keys 1").is_err());
    }

    #[test]
    fn test_parse_host_state() {
        assert_eq!(
            Event::parse("MODE_CHANGED insert").unwrap(),
            Event::ModeChanged("insert".into())
        );
        assert_eq!(
            Event::parse("VARIABLE_SET keycmd_events 0").unwrap(),
            Event::VariableSet {
                name: "keycmd_events".into(),
                value: "0".into()
            }
        );
        assert!(Event::parse("VARIABLE_SET").is_err());
        assert!(Event::parse("NOT_AN_EVENT x").is_err());
    }

    #[test]
    fn test_name_round_trips() {
        for line in [
            "KEY_PRESS a",
            "KEYCMD_CLEAR",
            "MODE_BIND global a = b",
            "HISTORY_NEXT",
            "STOP_COMPLETION",
        ] {
            let event = Event::parse(line).unwrap();
            assert!(line.starts_with(event.name()));
        }
    }
}

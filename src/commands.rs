//! Outbound effects produced while handling events
//!
//! A session never talks to its host directly. Every command it wants sent
//! and every variable it wants written is queued as a [`Cmd`] and drained by
//! the caller after each event.

use std::fmt;

/// Effects returned by session updates
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cmd {
    /// Send a resolved command string to the host application
    Send(String),
    /// Write a config variable; an empty value unsets it
    Set { name: String, value: String },
}

impl Cmd {
    pub fn send(command: impl Into<String>) -> Self {
        Cmd::Send(command.into())
    }

    pub fn set(name: impl Into<String>, value: impl Into<String>) -> Self {
        Cmd::Set {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn unset(name: impl Into<String>) -> Self {
        Self::set(name, "")
    }

    /// The event the host raises in response to a sent command
    ///
    /// `event NAME args` raises `NAME args` and `set name = value` raises
    /// `VARIABLE_SET name value`. Other commands raise nothing.
    pub fn echo_event(&self) -> Option<String> {
        let Cmd::Send(command) = self else {
            return None;
        };

        if let Some(event) = command.strip_prefix("event ") {
            return Some(event.trim().to_string());
        }

        let (name, value) = command.strip_prefix("set ")?.split_once('=')?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        Some(format!("VARIABLE_SET {} {}", name, value.trim()).trim_end().to_string())
    }
}

/// Renders the command line the host would receive
impl fmt::Display for Cmd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cmd::Send(command) => f.write_str(command),
            Cmd::Set { name, value } if value.is_empty() => write!(f, "set {} =", name),
            Cmd::Set { name, value } => write!(f, "set {} = {}", name, value),
        }
    }
}

/// Destination for commands and variable writes
///
/// Calls made while handling one event must reach the host in call order.
pub trait Sink {
    /// Dispatch one expanded command string
    fn send(&mut self, command: &str);

    /// Write a config variable, empty `value` meaning unset
    fn write(&mut self, name: &str, value: &str);
}

impl Sink for Vec<Cmd> {
    fn send(&mut self, command: &str) {
        self.push(Cmd::send(command));
    }

    fn write(&mut self, name: &str, value: &str) {
        self.push(Cmd::set(name, value));
    }
}

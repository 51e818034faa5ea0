//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use keystack::commands::Cmd;
use keystack::Session;

/// Create a session with the given `MODE_BIND` lines and an empty outbox
pub fn session_with(binds: &[&str]) -> Session {
    let mut session = Session::new();
    for line in binds {
        session
            .mode_bind(line)
            .unwrap_or_else(|e| panic!("bind {:?} rejected: {}", line, e));
    }
    session.take_commands();
    session
}

/// Feed each event line, panicking on the first rejected one
pub fn feed(session: &mut Session, lines: &[&str]) {
    for line in lines {
        session
            .handle_line(line)
            .unwrap_or_else(|e| panic!("event {:?} rejected: {}", line, e));
    }
}

/// Press and release each character as a plain key
pub fn type_text(session: &mut Session, text: &str) {
    for ch in text.chars() {
        let key = match ch {
            ' ' => "space".to_string(),
            other => other.to_string(),
        };
        session.key_press("", &key);
        session.key_release("", &key);
    }
}

/// Commands sent to the host, in order
pub fn sent(cmds: &[Cmd]) -> Vec<String> {
    cmds.iter()
        .filter_map(|c| match c {
            Cmd::Send(s) => Some(s.clone()),
            Cmd::Set { .. } => None,
        })
        .collect()
}

/// Variable writes for `name`, in order
pub fn writes<'a>(cmds: &'a [Cmd], name: &str) -> Vec<&'a str> {
    cmds.iter()
        .filter_map(|c| match c {
            Cmd::Set { name: n, value } if n == name => Some(value.as_str()),
            _ => None,
        })
        .collect()
}

/// Check the stack invariant: depth is zero exactly when nothing is pending
pub fn assert_stack_consistent(session: &Session) {
    let stack = session.keymap().stack();
    let idle = stack.args.is_empty() && stack.stack_binds.is_empty();
    assert_eq!(
        stack.depth == 0,
        idle,
        "depth {} with args {:?} and {} stacked binds",
        stack.depth,
        stack.args,
        stack.stack_binds.len()
    );
}

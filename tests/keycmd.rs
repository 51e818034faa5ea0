//! Command line editing and key tracking tests
//!
//! Tests for keycmd edits, cursor handling, modmaps and ignore rules as seen
//! through a whole session.

mod common;

use common::{feed, sent, session_with, type_text, writes};

// ========================================================================
// Editing
// ========================================================================

#[test]
fn test_backspace_and_delete_events() {
    let mut session = session_with(&[]);
    feed(
        &mut session,
        &["SET_KEYCMD spam", "KEYCMD_BACKSPACE", "SET_CURSOR_POS 0", "KEYCMD_DELETE"],
    );
    assert_eq!(session.keylet().keycmd(), "pa");
    assert_eq!(session.keylet().cursor(), 0);
}

#[test]
fn test_backspace_at_start_writes_nothing() {
    let mut session = session_with(&[]);
    feed(&mut session, &["SET_KEYCMD ab", "SET_CURSOR_POS 0"]);
    session.take_commands();

    feed(&mut session, &["KEYCMD_BACKSPACE"]);
    assert!(session.take_commands().is_empty());
}

#[test]
fn test_strip_word_with_separators() {
    let mut session = session_with(&[]);
    feed(&mut session, &["SET_KEYCMD uri http://a/b", "KEYCMD_STRIP_WORD"]);
    assert_eq!(session.keylet().keycmd(), "uri ");

    feed(&mut session, &["SET_KEYCMD uri http://a/b", "KEYCMD_STRIP_WORD /"]);
    assert_eq!(session.keylet().keycmd(), "uri http://a/");
}

#[test]
fn test_inject_and_append() {
    let mut session = session_with(&[]);
    feed(
        &mut session,
        &[
            "SET_KEYCMD spam",
            "SET_CURSOR_POS 1",
            "INJECT_KEYCMD egg",
            "APPEND_KEYCMD !",
        ],
    );
    assert_eq!(session.keylet().keycmd(), "seggpam!");
    assert_eq!(session.keylet().cursor(), 8);
}

#[test]
fn test_keycmd_clear_unsets_variable() {
    let mut session = session_with(&[]);
    type_text(&mut session, "abc");
    feed(&mut session, &["KEYCMD_CLEAR"]);
    let cmds = session.take_commands();
    assert_eq!(writes(&cmds, "keycmd").last(), Some(&""));
    assert_eq!(session.vars().get("keycmd"), None);
}

#[test]
fn test_edit_events_can_complete_binds() {
    let mut session = session_with(&["global gg = scroll top"]);
    feed(&mut session, &["SET_KEYCMD g", "APPEND_KEYCMD g"]);
    assert_eq!(sent(&session.take_commands()), vec!["scroll top"]);
}

// ========================================================================
// Modifiers
// ========================================================================

#[test]
fn test_modmap_event_normalises_keys() {
    let mut session = session_with(&["global <Alt>x = run"]);
    feed(
        &mut session,
        &["MODMAP <Meta> <Alt>", "KEY_PRESS Meta x", "KEY_RELEASE Meta Meta_L"],
    );
    assert_eq!(sent(&session.take_commands()), vec!["run"]);
}

#[test]
fn test_ignored_modifier_types_into_keycmd() {
    let mut session = session_with(&[]);
    feed(&mut session, &["IGNORE_KEY <Mod2>", "KEY_PRESS Mod2 a"]);
    assert_eq!(session.keylet().keycmd(), "a");
    assert!(!session.keylet().is_modcmd);
}

#[test]
fn test_shift_ignored_by_default() {
    let mut session = session_with(&["global G = bottom"]);
    feed(&mut session, &["KEY_PRESS '' Shift_L", "KEY_PRESS Shift G"]);
    assert_eq!(sent(&session.take_commands()), vec!["bottom"]);
}

#[test]
fn test_held_modifier_builds_chord_without_mods_field() {
    let mut session = session_with(&["global <Ctrl>w = close"]);
    feed(
        &mut session,
        &["KEY_PRESS Control_L", "KEY_PRESS w", "KEY_RELEASE Control_L"],
    );
    assert_eq!(sent(&session.take_commands()), vec!["close"]);
    assert!(session.keylet().held.is_empty());
}

#[test]
fn test_named_key_bind() {
    let mut session = session_with(&["global <Escape> = event KEYCMD_CLEAR"]);
    type_text(&mut session, "abc");
    feed(&mut session, &["KEY_PRESS Escape"]);
    assert_eq!(sent(&session.take_commands()), vec!["event KEYCMD_CLEAR"]);
}

#[test]
fn test_bad_modmap_rejected() {
    let mut session = session_with(&[]);
    assert!(session.handle_line("MODMAP <> <Ctrl>").is_err());
    assert!(session.handle_line("MODMAP Ctrl").is_err());
    assert!(session.handle_line("IGNORE_KEY <>").is_err());
}

// ========================================================================
// History
// ========================================================================

#[test]
fn test_history_is_kept_per_prompt() {
    let mut session = session_with(&["command o<uri:>_ = uri %s", "command f<find:>_ = find %s"]);

    type_text(&mut session, "o");
    type_text(&mut session, "a.org");
    session.exec_current();
    type_text(&mut session, "f");
    type_text(&mut session, "needle");
    session.exec_current();
    session.take_commands();

    type_text(&mut session, "o");
    feed(&mut session, &["HISTORY_PREV"]);
    assert_eq!(session.keylet().keycmd(), "a.org");
    feed(&mut session, &["HISTORY_PREV"]);
    assert_eq!(session.keylet().keycmd(), "a.org");

    session.exec_current();
    assert_eq!(sent(&session.take_commands()), vec!["uri a.org"]);
    assert_eq!(session.history().lines("uri:"), ["a.org", "a.org"]);
    assert_eq!(session.history().lines("find:"), ["needle"]);
}

#[test]
fn test_history_next_restores_typed_text() {
    let mut session = session_with(&[]);
    feed(
        &mut session,
        &[
            "SET_KEYCMD first",
            "KEYCMD_EXEC_CURRENT",
            "SET_KEYCMD second",
            "KEYCMD_EXEC_CURRENT",
        ],
    );
    type_text(&mut session, "dra");

    feed(&mut session, &["HISTORY_PREV", "HISTORY_PREV"]);
    assert_eq!(session.keylet().keycmd(), "first");
    feed(&mut session, &["HISTORY_NEXT"]);
    assert_eq!(session.keylet().keycmd(), "second");
    feed(&mut session, &["HISTORY_NEXT"]);
    assert_eq!(session.keylet().keycmd(), "dra");
    assert_eq!(session.keylet().cursor(), 3);
    assert!(!session.history().is_browsing());
}

#[test]
fn test_history_search_event() {
    let mut session = session_with(&[]);
    for line in ["open a", "close", "open b"] {
        session.set_keycmd(line);
        session.exec_current();
    }

    feed(&mut session, &["HISTORY_SEARCH open"]);
    assert_eq!(session.keylet().keycmd(), "open b");
    feed(&mut session, &["HISTORY_PREV"]);
    assert_eq!(session.keylet().keycmd(), "open a");
    feed(&mut session, &["HISTORY_PREV"]);
    assert_eq!(session.keylet().keycmd(), "open a");
}

#[test]
fn test_empty_exec_not_recorded() {
    let mut session = session_with(&[]);
    session.exec_current();
    feed(&mut session, &["HISTORY_PREV", "HISTORY_NEXT"]);
    assert!(session.history().lines("").is_empty());
    assert_eq!(session.keylet().keycmd(), "");
}

// ========================================================================
// Completion
// ========================================================================

#[test]
fn test_completion_finishes_single_builtin() {
    let mut session = session_with(&[]);
    feed(
        &mut session,
        &["BUILTINS 'reload back scroll'", "SET_KEYCMD rel", "START_COMPLETION"],
    );
    assert_eq!(session.keylet().keycmd(), "reload ");
    assert_eq!(session.vars().get("completion_list"), None);
}

#[test]
fn test_completion_levels_and_list() {
    let mut session = session_with(&[]);
    feed(
        &mut session,
        &["BUILTINS scroll scroll_end", "SET_KEYCMD sc", "START_COMPLETION"],
    );
    assert_eq!(session.keylet().keycmd(), "scroll");
    assert_eq!(session.vars().get("completion_list"), None);

    feed(&mut session, &["START_COMPLETION"]);
    assert_eq!(
        session.vars().get("completion_list"),
        Some("<span> <span @hint_style>scroll</span> <span @hint_style>scroll</span>_end </span>")
    );

    type_text(&mut session, "_");
    assert_eq!(
        session.vars().get("completion_list"),
        Some("<span> <span @hint_style>scroll_</span>end </span>")
    );

    feed(&mut session, &["STOP_COMPLETION"]);
    assert_eq!(session.vars().get("completion_list"), None);
    assert_eq!(session.keylet().keycmd(), "scroll_");
}

#[test]
fn test_completion_accepts_exact_hint_on_third_request() {
    let mut session = session_with(&[]);
    feed(
        &mut session,
        &[
            "BUILTINS scroll scroll_end",
            "SET_KEYCMD scroll",
            "START_COMPLETION",
            "START_COMPLETION",
            "START_COMPLETION",
        ],
    );
    assert_eq!(session.keylet().keycmd(), "scroll ");
    assert_eq!(session.vars().get("completion_list"), None);
}

#[test]
fn test_set_completes_variable_name() {
    let mut session = session_with(&[]);
    feed(
        &mut session,
        &["VARIABLE_SET zoom_level 1", "SET_KEYCMD set zoo", "START_COMPLETION"],
    );
    assert_eq!(session.keylet().keycmd(), "set zoom_level = ");
}

#[test]
fn test_exec_hides_completion_list() {
    let mut session = session_with(&[]);
    feed(
        &mut session,
        &[
            "BUILTINS scroll scroll_end",
            "SET_KEYCMD sc",
            "START_COMPLETION",
            "START_COMPLETION",
        ],
    );
    assert!(session.vars().get("completion_list").is_some());

    session.take_commands();
    session.exec_current();
    let cmds = session.take_commands();
    assert_eq!(writes(&cmds, "completion_list"), vec![""]);
    assert_eq!(session.vars().get("completion_list"), None);
}

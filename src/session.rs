//! Per-instance session: key tracker, keymap and variable mirror
//!
//! A session owns everything one host instance needs. Events go in through
//! [`Session::handle`] (or the typed entry points), and the commands and
//! variable writes they cause are queued until [`Session::take_commands`].
//!
//! ```text
//! Event → KeyCmd (keylet) → Notification → Keymap::key_event()
//!       → Vec<KeyAction> → Session::apply() → Vec<Cmd>
//! ```

use std::collections::HashMap;
use std::mem;

use indexmap::IndexMap;

use crate::commands::{Cmd, Sink};
use crate::config::EngineConfig;
use crate::keycmd::{
    partial_keyword, Completion, CursorPos, History, KeyCmd, Keylet, Level, Press, Release, Step,
};
use crate::keymap::{
    parse_bind, parse_mode_bind, Bind, KeyAction, Keymap, KeymapError, Kwargs, ModState,
    ModeNameError, Notification, Prompt, Registry, STACK_MODE,
};
use crate::messages::Event;
use crate::util::display_escape;
use crate::vars::{validate_name, Variables};

/// Markup wrapped around the modcmd display value
fn modcmd_markup(modcmd: &str) -> String {
    format!("<span> {} </span>", display_escape(modcmd))
}

/// One host instance's keybinding state
#[derive(Debug, Clone)]
pub struct Session {
    keycmd: KeyCmd,
    keymap: Keymap,
    history: History,
    completion: Completion,
    vars: Variables,
    default_mode: String,
    mode_config: HashMap<String, IndexMap<String, String>>,
    outbox: Vec<Cmd>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// A session with default settings and no binds
    pub fn new() -> Self {
        Self::from_config(&EngineConfig::default(), Registry::new())
    }

    /// A session with default settings over an existing bind registry
    pub fn with_registry(registry: Registry) -> Self {
        Self::from_config(&EngineConfig::default(), registry)
    }

    /// Build a session, applying `config` and entering the default mode
    ///
    /// Invalid modmaps and ignore rules are logged and skipped.
    pub fn from_config(config: &EngineConfig, registry: Registry) -> Self {
        let mut session = Self {
            keycmd: KeyCmd::new(),
            keymap: Keymap::with_registry(registry),
            history: History::new(),
            completion: Completion::new(),
            vars: Variables::new(),
            default_mode: config.default_mode.clone(),
            mode_config: HashMap::new(),
            outbox: Vec::new(),
        };

        for (from, to) in &config.modmaps {
            if let Err(e) = session.keycmd.add_modmap(from, to) {
                tracing::warn!("Skipping modmap: {}", e);
            }
        }
        for glob in &config.ignore_keys {
            if let Err(e) = session.keycmd.add_ignore(glob) {
                tracing::warn!("Skipping ignore rule: {}", e);
            }
        }
        for (mode, vars) in &config.mode_config {
            for (var, value) in vars {
                session.mode_config(mode, var, value);
            }
        }
        for (name, value) in &config.variables {
            if name == "mode" {
                continue;
            }
            session.write_var(name, value);
        }

        session.set_mode("");
        session
    }

    // === Accessors ===

    pub fn keylet(&self) -> &Keylet {
        self.keycmd.keylet()
    }

    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    pub fn keymap_mut(&mut self) -> &mut Keymap {
        &mut self.keymap
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn completion(&self) -> &Completion {
        &self.completion
    }

    pub fn vars(&self) -> &Variables {
        &self.vars
    }

    /// The active mode
    pub fn mode(&self) -> &str {
        self.vars.get_or("mode", "")
    }

    pub fn default_mode(&self) -> &str {
        &self.default_mode
    }

    /// Drain the commands and variable writes queued so far
    pub fn take_commands(&mut self) -> Vec<Cmd> {
        mem::take(&mut self.outbox)
    }

    // === Events ===

    /// Parse and handle one event line
    pub fn handle_line(&mut self, line: &str) -> Result<(), KeymapError> {
        let event = Event::parse(line)?;
        self.handle(event)
    }

    /// Handle one event
    ///
    /// Only configuration events can fail; key and edit events never do.
    pub fn handle(&mut self, event: Event) -> Result<(), KeymapError> {
        tracing::trace!(event = event.name(), "handling event");

        match event {
            Event::KeyPress { mods, key } => self.key_press(&mods, &key),
            Event::KeyRelease { mods, key } => self.key_release(&mods, &key),
            Event::SetKeycmd(text) => self.set_keycmd(&text),
            Event::InjectKeycmd(text) => self.inject_keycmd(&text),
            Event::AppendKeycmd(text) => self.append_keycmd(&text),
            Event::KeycmdBackspace => self.backspace(),
            Event::KeycmdDelete => self.delete(),
            Event::KeycmdStripWord(seps) => self.strip_word(seps.as_deref().unwrap_or(" ")),
            Event::KeycmdExecCurrent => self.exec_current(),
            Event::KeycmdClear => self.clear_keycmd(),
            Event::SetCursorPos(pos) => self.set_cursor(pos),
            Event::HistoryPrev => self.history_prev(),
            Event::HistoryNext => self.history_next(),
            Event::HistorySearch(key) => self.history_search(&key),
            Event::StartCompletion => self.start_completion(),
            Event::StopCompletion => self.stop_completion(),
            Event::Builtins(names) => self.completion.add_builtins(&names),
            Event::Modmap { from, to } => self.keycmd.add_modmap(&from, &to)?,
            Event::IgnoreKey(glob) => self.keycmd.add_ignore(&glob)?,
            Event::Bind(line) => parse_bind(&line)?.apply(self.keymap.registry_mut())?,
            Event::ModeBind(line) => parse_mode_bind(&line)?.apply(self.keymap.registry_mut())?,
            Event::ModeConfig { mode, var, value } => {
                validate_name(&var)?;
                self.mode_config(&mode, &var, &value);
            }
            Event::ModeChanged(mode) => self.mode_changed(&mode),
            Event::VariableSet { name, value } => {
                validate_name(&name)?;
                self.variable_set(&name, &value);
            }
        }

        Ok(())
    }

    // === Keys ===

    pub fn key_press(&mut self, mods: &str, key: &str) {
        let keycmd_events = self.vars.is_enabled("keycmd_events");
        match self.keycmd.key_press(mods, key, keycmd_events) {
            Press::Update(modstate) => self.update_event(modstate),
            Press::Cleared => self.write_var("keycmd", ""),
        }
    }

    /// Releasing a named key fires the chord (if one is active) and clears it
    pub fn key_release(&mut self, mods: &str, key: &str) {
        let Release::Named { exec } = self.keycmd.key_release(mods, key) else {
            return;
        };

        if let Some(modstate) = exec {
            let modcmd = self.keycmd.keylet().modcmd().to_string();
            self.dispatch(Notification::modcmd_exec(modstate), &modcmd);
        }
        self.clear_modcmd();
    }

    // === Command line edits ===

    pub fn set_keycmd(&mut self, text: &str) {
        self.keycmd.keylet_mut().set_keycmd(text);
        self.update_event(ModState::new());
    }

    pub fn inject_keycmd(&mut self, text: &str) {
        self.keycmd.keylet_mut().insert_keycmd(text);
        self.update_event(ModState::new());
    }

    pub fn append_keycmd(&mut self, text: &str) {
        self.keycmd.keylet_mut().append_keycmd(text);
        self.update_event(ModState::new());
    }

    pub fn backspace(&mut self) {
        if self.keycmd.keylet_mut().backspace() {
            self.update_event(ModState::new());
        }
    }

    pub fn delete(&mut self) {
        if self.keycmd.keylet_mut().delete() {
            self.update_event(ModState::new());
        }
    }

    pub fn strip_word(&mut self, seps: &str) {
        if self.keycmd.keylet_mut().strip_word(seps).is_some() {
            self.update_event(ModState::new());
        }
    }

    pub fn set_cursor(&mut self, pos: CursorPos) {
        self.keycmd.keylet_mut().set_cursor(pos);
        self.update_event(ModState::new());
    }

    /// Submit the keycmd: record it, raise an exec notification, then clear it
    ///
    /// The line is recorded under the prompt it was typed at, before any
    /// bind gets to change the prompt.
    pub fn exec_current(&mut self) {
        let keycmd = self.keycmd.keylet().keycmd().to_string();
        let prompt = self.vars.get_or("keycmd_prompt", "").to_string();
        self.history.record(&prompt, &keycmd);
        self.dispatch(Notification::keycmd_exec(ModState::new()), &keycmd);
        self.clear_keycmd();
    }

    pub fn clear_keycmd(&mut self) {
        self.keycmd.clear_keycmd();
        self.write_var("keycmd", "");
        self.stop_completion();
    }

    pub fn clear_modcmd(&mut self) {
        self.keycmd.clear_modcmd();
        self.write_var("modcmd", "");
    }

    // === History ===

    pub fn history_prev(&mut self) {
        let current = self.keycmd.keylet().keycmd().to_string();
        if let Some(line) = self.history.prev(&current) {
            self.set_keycmd(&line);
        }
    }

    pub fn history_next(&mut self) {
        if let Some(line) = self.history.next() {
            self.set_keycmd(&line);
        }
    }

    /// Browse back to the newest line containing `key`
    pub fn history_search(&mut self, key: &str) {
        let current = self.keycmd.keylet().keycmd().to_string();
        if let Some(line) = self.history.search(key, &current) {
            self.set_keycmd(&line);
        }
    }

    // === Completion ===

    /// Complete the keyword before the cursor, one level further each time
    pub fn start_completion(&mut self) {
        let keylet = self.keycmd.keylet();
        let Some(partial) = partial_keyword(keylet.keycmd(), keylet.cursor()) else {
            self.stop_completion();
            return;
        };

        match self.completion.advance(&partial) {
            Step::Nothing => {}
            Step::Finish(text) => {
                self.inject_keycmd(&text);
                self.stop_completion();
            }
            Step::Extend(text) => {
                if !text.is_empty() {
                    self.inject_keycmd(&text);
                }
                self.update_completion_list();
            }
        }
    }

    pub fn stop_completion(&mut self) {
        self.completion.stop();
        self.write_var("completion_list", "");
    }

    /// Refresh `completion_list` for the keyword now before the cursor
    fn update_completion_list(&mut self) {
        let keylet = self.keycmd.keylet();
        let Some(partial) = partial_keyword(keylet.keycmd(), keylet.cursor()) else {
            self.stop_completion();
            return;
        };
        if self.completion.level() < Level::List {
            return;
        }
        let list = self.completion.list(&partial.word);
        self.write_var("completion_list", &list);
    }

    // === Configuration ===

    /// Add a bind built in code, e.g. one with a callable handler
    pub fn bind(&mut self, mode: &str, bind: Bind) -> Result<(), ModeNameError> {
        self.keymap.add_bind(mode, bind)
    }

    /// Add a bind from its `<mode-list> <pattern> = <command>` form
    pub fn mode_bind(&mut self, line: &str) -> Result<(), KeymapError> {
        parse_mode_bind(line)?.apply(self.keymap.registry_mut())
    }

    pub fn add_modmap(&mut self, from: &str, to: &str) -> Result<(), KeymapError> {
        self.keycmd.add_modmap(from, to)
    }

    pub fn add_ignore(&mut self, glob: &str) -> Result<(), KeymapError> {
        self.keycmd.add_ignore(glob)
    }

    /// Set `var` to `value` whenever `mode` is active, starting now if it is
    pub fn mode_config(&mut self, mode: &str, var: &str, value: &str) {
        self.mode_config
            .entry(mode.to_string())
            .or_default()
            .insert(var.to_string(), value.to_string());

        if self.mode() == mode && var != "mode" {
            self.write_var(var, value);
        }
    }

    // === Modes and variables ===

    /// Switch modes; an empty mode selects the default mode
    pub fn set_mode(&mut self, mode: &str) {
        let mode = if mode.is_empty() {
            self.default_mode.clone()
        } else {
            mode.to_string()
        };

        if self.mode() == mode {
            return;
        }

        self.vars.set("mode", &mode);
        self.outbox.push(Cmd::set("mode", &mode));
        self.on_mode_changed(&mode);
    }

    /// The host reports a mode change it already made
    pub fn mode_changed(&mut self, mode: &str) {
        if mode.is_empty() || self.mode() == mode {
            return;
        }
        self.vars.set("mode", mode);
        self.on_mode_changed(mode);
    }

    /// The host reports a variable it already set
    pub fn variable_set(&mut self, name: &str, value: &str) {
        match name {
            "mode" if value.is_empty() => {
                self.vars.unset("mode");
                self.set_mode("");
            }
            "mode" => self.mode_changed(value),
            "default_mode" => {
                self.vars.set(name, value);
                if !value.is_empty() {
                    self.default_mode = value.to_string();
                    if self.mode().is_empty() {
                        self.set_mode("");
                    }
                }
            }
            _ => {
                self.vars.set(name, value);
                self.var_changed(name, value);
            }
        }
    }

    fn on_mode_changed(&mut self, mode: &str) {
        tracing::debug!(mode, "mode changed");

        if let Some(config) = self.mode_config.get(mode).cloned() {
            for (var, value) in config.iter().filter(|(var, _)| *var != "mode") {
                self.write_var(var, value);
            }
        }

        if mode != STACK_MODE {
            if self.keymap.is_stacked() {
                tracing::debug!(depth = self.keymap.depth(), "mode change cleared stack");
            }
            self.keymap.reset();
            self.write_var("keycmd_prompt", "");
        }
    }

    /// Write a variable unless the mirror already holds that value
    ///
    /// `mode` goes through [`Session::set_mode`].
    fn write_var(&mut self, name: &str, value: &str) {
        if name == "mode" {
            self.set_mode(value);
        } else if self.vars.set(name, value) {
            self.outbox.push(Cmd::set(name, value));
            self.var_changed(name, value);
        }
    }

    fn var_changed(&mut self, name: &str, value: &str) {
        self.completion.add_var(name);
        if name == "keycmd_prompt" {
            self.history.set_prompt(value);
        }
    }

    // === Matching ===

    /// Raise an update notification for the keylet, then refresh the
    /// keycmd and modcmd display variables
    fn update_event(&mut self, modstate: ModState) {
        let keylet = self.keycmd.keylet();
        let keycmd = keylet.keycmd().to_string();
        let modcmd = format!("{}{}", modstate, keylet.modcmd());
        let chord = keylet.is_modcmd;

        if chord {
            let text = keylet.modcmd().to_string();
            self.dispatch(Notification::modcmd_update(modstate.clone()), &text);
        } else {
            self.dispatch(Notification::keycmd_update(modstate.clone()), &keycmd);
            self.update_completion_list();
        }

        if self.vars.is_enabled("modcmd_updates") {
            let keylet = self.keycmd.keylet();
            let new_modcmd = format!("{}{}", modstate, keylet.modcmd());
            if new_modcmd.is_empty() || !keylet.is_modcmd {
                self.write_var("modcmd", "");
            } else if new_modcmd == modcmd {
                self.write_var("modcmd", &modcmd_markup(&modcmd));
            }
        }

        if !self.vars.is_enabled("keycmd_events") {
            return;
        }

        let keylet = self.keycmd.keylet();
        if keylet.keycmd().is_empty() {
            self.write_var("keycmd", "");
        } else if keylet.keycmd() == keycmd {
            let markup = keylet.markup();
            self.write_var("keycmd", &markup);
        }
    }

    fn dispatch(&mut self, note: Notification, text: &str) {
        let mode = self.mode().to_string();
        let actions = self.keymap.key_event(&mode, &note, text);
        if !actions.is_empty() {
            tracing::trace!(kind = note.name(), text, count = actions.len(), "matched");
        }
        for action in actions {
            self.apply(action);
        }
    }

    fn apply(&mut self, action: KeyAction) {
        match action {
            KeyAction::Execute { bind, args } => self.exec_bind(&bind, &args),
            KeyAction::ClearCurrent => {
                let var = self.keycmd.clear_current();
                self.write_var(var, "");
                if var == "keycmd" {
                    self.stop_completion();
                }
            }
            KeyAction::EnterStack => self.set_mode(STACK_MODE),
            KeyAction::Prompt(prompt) => self.show_prompt(&prompt),
            KeyAction::ExitStack { restore } => {
                self.write_var("keycmd_prompt", "");
                self.set_mode(restore.as_deref().unwrap_or(""));
            }
        }
    }

    fn exec_bind(&mut self, bind: &Bind, args: &[String]) {
        tracing::debug!(pattern = %bind.pattern, ?args, "EXEC_BIND");
        if let Err(e) = bind.exec(self, args, &Kwargs::new()) {
            tracing::warn!("Bind {:?} failed: {}", bind.pattern, e);
        }
    }

    /// Clear the keycmd and show the prompt for the next segment
    fn show_prompt(&mut self, prompt: &Prompt) {
        self.clear_keycmd();

        if !prompt.label.is_empty() {
            self.write_var("keycmd_prompt", &prompt.label);
        }

        if prompt.preset.is_empty() {
            return;
        }
        if prompt.is_command {
            self.outbox.push(Cmd::send(&prompt.preset));
        } else {
            self.set_keycmd(&prompt.preset);
        }
    }
}

impl Sink for Session {
    fn send(&mut self, command: &str) {
        self.outbox.push(Cmd::send(command));
    }

    fn write(&mut self, name: &str, value: &str) {
        self.write_var(name, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(binds: &[&str]) -> Session {
        let mut session = Session::new();
        for line in binds {
            session.mode_bind(line).unwrap();
        }
        session.take_commands();
        session
    }

    fn type_text(session: &mut Session, text: &str) {
        for ch in text.chars() {
            let key = if ch == ' ' { "space".to_string() } else { ch.to_string() };
            session.key_press("", &key);
        }
    }

    fn sent(cmds: &[Cmd]) -> Vec<&str> {
        cmds.iter()
            .filter_map(|c| match c {
                Cmd::Send(s) => Some(s.as_str()),
                Cmd::Set { .. } => None,
            })
            .collect()
    }

    #[test]
    fn test_starts_in_default_mode() {
        let mut session = Session::new();
        assert_eq!(session.mode(), "command");
        assert_eq!(session.take_commands(), vec![Cmd::set("mode", "command")]);
    }

    #[test]
    fn test_keycmd_display_written() {
        let mut session = session(&[]);
        type_text(&mut session, "ab");
        let cmds = session.take_commands();
        assert_eq!(
            cmds.last(),
            Some(&Cmd::set(
                "keycmd",
                "@[ab]@<span @cursor_style>@[ ]@</span>"
            ))
        );
    }

    #[test]
    fn test_simple_bind_clears_keycmd() {
        let mut session = session(&["global gg = scroll top"]);
        type_text(&mut session, "gg");
        let cmds = session.take_commands();
        assert_eq!(sent(&cmds), vec!["scroll top"]);
        assert_eq!(session.keylet().keycmd(), "");
        assert_eq!(session.vars().get("keycmd"), None);
    }

    #[test]
    fn test_chord_fires_on_update() {
        let mut session = session(&["global <Ctrl>r = reload"]);
        session.key_press("", "Control_L");
        session.key_press("", "r");
        assert_eq!(sent(&session.take_commands()), vec!["reload"]);
        assert_eq!(session.keylet().modcmd(), "");
    }

    #[test]
    fn test_chord_exec_on_release() {
        let mut session = session(&["global <Ctrl>x! = cut"]);
        session.key_press("Ctrl", "x");
        assert!(sent(&session.take_commands()).is_empty());
        assert!(session.vars().get("modcmd").is_some());

        session.key_release("Ctrl", "Control_L");
        assert_eq!(sent(&session.take_commands()), vec!["cut"]);
        assert_eq!(session.vars().get("modcmd"), None);
    }

    #[test]
    fn test_modcmd_display_markup() {
        let mut session = session(&[]);
        session.key_press("Ctrl", "w");
        assert_eq!(
            session.vars().get("modcmd"),
            Some("<span> @[<Ctrl>w]@ </span>")
        );
    }

    #[test]
    fn test_stack_enters_and_restores_mode() {
        let mut session = session(&["command f<go:>_ = go %s"]);
        type_text(&mut session, "f");
        assert_eq!(session.mode(), STACK_MODE);
        assert_eq!(session.vars().get("keycmd_prompt"), Some("go:"));
        assert_eq!(session.keylet().keycmd(), "");

        type_text(&mut session, "home");
        session.exec_current();
        let cmds = session.take_commands();
        assert_eq!(sent(&cmds), vec!["go home"]);
        assert_eq!(session.mode(), "command");
        assert_eq!(session.vars().get("keycmd_prompt"), None);
        assert_eq!(session.keymap().depth(), 0);
    }

    #[test]
    fn test_prompt_preset_fills_keycmd() {
        let mut session = session(&["global O<uri:http://>_ = uri %s"]);
        type_text(&mut session, "O");
        assert_eq!(session.keylet().keycmd(), "http://");
        type_text(&mut session, "a.b");
        session.exec_current();
        assert_eq!(sent(&session.take_commands()), vec!["uri http://a.b"]);
    }

    #[test]
    fn test_command_preset_is_sent() {
        let mut session = session(&["global t<tab!js fill()>_ = tab %s"]);
        type_text(&mut session, "t");
        assert_eq!(sent(&session.take_commands()), vec!["js fill()"]);
        assert_eq!(session.vars().get("keycmd_prompt"), Some("tab:"));
    }

    #[test]
    fn test_unmatched_exec_unwinds_stack() {
        let mut session = session(&["command a<x:>b = run"]);
        type_text(&mut session, "a");
        assert!(session.keymap().is_stacked());
        session.exec_current();
        assert!(!session.keymap().is_stacked());
        assert_eq!(session.mode(), "command");
    }

    #[test]
    fn test_dead_end_input_unwinds_stack() {
        let mut session = session(&["command a<x:>b = run"]);
        type_text(&mut session, "a");
        type_text(&mut session, "z");
        assert!(!session.keymap().is_stacked());
        assert_eq!(session.mode(), "command");
        assert!(sent(&session.take_commands()).is_empty());
    }

    #[test]
    fn test_external_mode_change_resets_stack() {
        let mut session = session(&["global f<go:>_ = go %s"]);
        type_text(&mut session, "f");
        assert!(session.keymap().is_stacked());
        session.mode_changed("insert");
        assert!(!session.keymap().is_stacked());
        assert_eq!(session.mode(), "insert");
        assert_eq!(session.vars().get("keycmd_prompt"), None);
    }

    #[test]
    fn test_mode_config_applied() {
        let mut session = session(&[]);
        session.mode_config("insert", "forward_keys", "1");
        assert_eq!(session.vars().get("forward_keys"), None);
        session.set_mode("insert");
        assert_eq!(session.vars().get("forward_keys"), Some("1"));

        // applies immediately to the active mode
        session.mode_config("insert", "status", "INS");
        assert_eq!(session.vars().get("status"), Some("INS"));
    }

    #[test]
    fn test_variable_set_mode() {
        let mut session = session(&[]);
        session.variable_set("mode", "insert");
        assert_eq!(session.mode(), "insert");
        assert!(session.take_commands().is_empty());

        session.variable_set("mode", "");
        assert_eq!(session.mode(), "command");
        assert_eq!(session.take_commands(), vec![Cmd::set("mode", "command")]);
    }

    #[test]
    fn test_default_mode_update() {
        let mut session = session(&[]);
        session.variable_set("default_mode", "insert");
        assert_eq!(session.default_mode(), "insert");
        assert_eq!(session.mode(), "command");
        session.set_mode("");
        assert_eq!(session.mode(), "insert");
    }

    #[test]
    fn test_keycmd_events_off() {
        let mut session = session(&["global ZZ = exit"]);
        session.variable_set("keycmd_events", "0");
        type_text(&mut session, "ZZ");
        assert!(sent(&session.take_commands()).is_empty());
        assert_eq!(session.keylet().keycmd(), "");
    }

    #[test]
    fn test_callable_bind_uses_sink() {
        let mut session = session(&[]);
        let bind = Bind::callable("v*", |sink: &mut dyn Sink, args: &[String], _: &Kwargs| {
            sink.write("volume", &args[0]);
        })
        .unwrap();
        session.bind("command", bind).unwrap();

        type_text(&mut session, "v5");
        assert_eq!(session.vars().get("volume"), Some("5"));
        assert!(session.take_commands().contains(&Cmd::set("volume", "5")));
    }

    #[test]
    fn test_handle_line_errors() {
        let mut session = session(&[]);
        assert!(session.handle_line("MODE_BIND bad-mode! a = b").is_err());
        assert!(session.handle_line("BIND fl*x = b").is_err());
        assert!(session.handle_line("VARIABLE_SET 'a b' c").is_err());
        assert!(session.handle_line("MODE_BIND global a = b").is_ok());
    }
}

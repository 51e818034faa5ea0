//! Keymap: bind registry plus the stack state for multi-segment binds

use std::sync::Arc;

use super::binding::Bind;
use super::error::ModeNameError;
use super::glob::Prompt;
use super::registry::Registry;
use super::types::Notification;

/// Transient mode active while a multi-segment bind is waiting for input
pub const STACK_MODE: &str = "stack";

/// Result of matching one notification, applied in order by the caller
#[derive(Debug, Clone)]
pub enum KeyAction {
    /// Run this bind with these arguments
    Execute { bind: Arc<Bind>, args: Vec<String> },
    /// Clear whichever line (modcmd or keycmd) produced the match
    ClearCurrent,
    /// Switch to the stack mode
    EnterStack,
    /// Clear the keycmd and show this prompt
    Prompt(Prompt),
    /// Leave the stack, returning to `restore` (or the default mode)
    ExitStack { restore: Option<String> },
}

/// Progress through a multi-segment bind
#[derive(Debug, Clone, Default)]
pub struct StackState {
    /// Segments consumed so far
    pub depth: usize,
    /// Captures accumulated from consumed segments, outermost first
    pub args: Vec<String>,
    /// Binds still eligible at `depth`; global chords are added at scan time
    pub stack_binds: Vec<Arc<Bind>>,
    /// Prompt to show once the current scan finishes
    pub pending_prompt: Option<Prompt>,
    /// Mode active before the stack was entered
    pub last_mode: Option<String>,
}

/// The keymap stores all binds and tracks stacked bind progress
#[derive(Debug, Clone, Default)]
pub struct Keymap {
    registry: Registry,
    stack: StackState,
}

impl Keymap {
    /// Create an empty keymap
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a keymap over an existing registry
    pub fn with_registry(registry: Registry) -> Self {
        Self {
            registry,
            stack: StackState::default(),
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Add a bind to `mode` (see [`Registry::add_bind`])
    pub fn add_bind(&mut self, mode: &str, bind: Bind) -> Result<(), ModeNameError> {
        let pattern = bind.pattern.clone();
        self.registry.add_bind(mode, &pattern, Some(bind))
    }

    pub fn stack(&self) -> &StackState {
        &self.stack
    }

    /// How many segments of a stacked bind have matched
    pub fn depth(&self) -> usize {
        self.stack.depth
    }

    /// Check if a multi-segment bind is in progress
    pub fn is_stacked(&self) -> bool {
        self.stack.depth > 0
    }

    /// Binds to scan for the next notification
    pub fn candidates(&self, mode: &str) -> Vec<Arc<Bind>> {
        if self.stack.depth == 0 {
            return self.registry.effective_binds(mode);
        }
        self.stack
            .stack_binds
            .iter()
            .chain(self.registry.globals())
            .cloned()
            .collect()
    }

    /// Clear all stack state, returning the mode to restore (if any)
    pub fn reset(&mut self) -> Option<String> {
        let last_mode = self.stack.last_mode.take();
        self.stack = StackState::default();
        last_mode
    }

    /// Match one keycmd or modcmd notification
    ///
    /// `text` is the modcmd for chord notifications and the keycmd otherwise.
    /// Candidates are scanned in registration order and the first bind to
    /// complete wins.
    ///
    /// Inside a stack, a plain segment is dropped from the candidates on exec,
    /// and also on update once `text` is no longer a prefix of its literal,
    /// so a dead-end keycmd unwinds the stack without waiting for exec.
    pub fn key_event(&mut self, mode: &str, note: &Notification, text: &str) -> Vec<KeyAction> {
        let depth = self.stack.depth;
        let mut actions = Vec::new();
        let mut stacked = false;

        for bind in self.candidates(mode) {
            let Some(seg) = bind.segment(depth) else {
                continue;
            };
            if seg.is_chord() != note.chord || seg.on_exec != note.exec {
                continue;
            }
            // Once a bind has stacked, only binds that can follow it may join
            if stacked && !seg.more {
                continue;
            }
            if seg.is_chord() && seg.mods != note.modstate {
                continue;
            }

            let Some(capture) = seg.capture(text) else {
                if depth > 0 && !stacked && !seg.is_chord() {
                    if note.exec || !seg.literal.starts_with(text) {
                        tracing::trace!(pattern = %bind.pattern, "evicted from stack");
                        self.stack.stack_binds.retain(|b| b.id != bind.id);
                    }
                }
                continue;
            };

            if bind.is_global || (depth == 0 && !seg.more) {
                let clear = !seg.has_args;
                actions.push(KeyAction::Execute {
                    bind,
                    args: capture.into_iter().collect(),
                });
                if clear {
                    actions.push(KeyAction::ClearCurrent);
                }
                return actions;
            }

            if seg.more {
                if stacked {
                    if !self.stack.stack_binds.iter().any(|b| b.id == bind.id) {
                        self.stack.stack_binds.push(bind);
                    }
                } else {
                    stacked = true;
                    self.push(mode, bind, capture, &mut actions);
                }
                continue;
            }

            // Last segment of a stacked bind
            let exit = !seg.has_args || seg.on_exec;
            let mut args = self.stack.args.clone();
            args.extend(capture);
            actions.push(KeyAction::Execute { bind, args });
            if exit {
                let restore = self.reset();
                actions.push(KeyAction::ExitStack { restore });
            }
            return actions;
        }

        if let Some(prompt) = self.stack.pending_prompt.take() {
            actions.push(KeyAction::Prompt(prompt));
        }

        if depth > 0 && self.stack.depth == depth {
            let unmatched_exec = note.exec && !note.chord;
            if unmatched_exec || self.stack.stack_binds.is_empty() {
                tracing::debug!(depth, "unwinding stack");
                let restore = self.reset();
                actions.push(KeyAction::ExitStack { restore });
            }
        }

        actions
    }

    /// Advance the stack by one segment of `bind`
    fn push(
        &mut self,
        mode: &str,
        bind: Arc<Bind>,
        capture: Option<String>,
        actions: &mut Vec<KeyAction>,
    ) {
        if mode != STACK_MODE {
            self.stack.last_mode = Some(mode.to_string()).filter(|m| !m.is_empty());
            actions.push(KeyAction::EnterStack);
        }

        self.stack.args.extend(capture);
        self.stack.depth += 1;
        self.stack.pending_prompt = bind.prompt(self.stack.depth).cloned();
        tracing::debug!(pattern = %bind.pattern, depth = self.stack.depth, "stacked");

        // A bare trailing `*` fires as soon as it becomes reachable
        let live = bind.segments.get(self.stack.depth).is_some_and(|next| {
            !next.on_exec && next.has_args && next.literal.is_empty() && !next.more
        });
        if live {
            let mut args = self.stack.args.clone();
            args.push(String::new());
            actions.push(KeyAction::Execute {
                bind: bind.clone(),
                args,
            });
        }

        self.stack.stack_binds = vec![bind];
    }
}

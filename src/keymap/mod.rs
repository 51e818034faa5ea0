//! Stacked keybinding system
//!
//! This module turns keycmd/modcmd notifications into executed binds:
//! - Compiles bind patterns into typed segments and prompts
//! - Stores binds per mode, with `global` binds shared by every mode
//! - Walks multi-segment binds one segment at a time through a stack mode
//! - Expands captured arguments into command templates
//!
//! # Architecture
//!
//! ```text
//! Notification + text → Keymap::key_event() → Vec<KeyAction> → Session
//! ```
//!
//! # Loading Keymaps
//!
//! ```ignore
//! // Embedded defaults plus the user's keymap.yaml
//! let keymap = Keymap::with_registry(load_default_keymap(None));
//!
//! // Or register binds directly
//! let mut keymap = Keymap::new();
//! keymap.add_bind("command", Bind::commands("o<uri:>_", ["uri %s"])?)?;
//! ```

mod binding;
mod config;
mod defaults;
mod error;
mod expand;
mod glob;
#[allow(clippy::module_inception)]
mod keymap;
mod registry;
mod types;

pub use binding::{Action, Bind, Handler, Kwargs};
pub use config::{load_keymap_file, parse_bind, parse_keymap_yaml, parse_mode_bind, ModeBind};
pub use defaults::{default_binds, get_default_keymap_yaml, install_binds, load_default_keymap};
pub use error::{ArgumentError, KeymapError, ModeNameError, PatternError};
pub use expand::expand;
pub use glob::{compile, CompiledGlob, Prompt, Segment};
pub use keymap::{KeyAction, Keymap, StackState, STACK_MODE};
pub use registry::{validate_mode, Registry, GLOBAL_MODE};
pub use types::{leading_modifier_len, modifier_token, ModState, Notification};

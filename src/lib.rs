//! keystack - stacked keybinding engine
//!
//! This crate turns raw key events into commands according to bind
//! patterns that may span several keystrokes, modifier chords, and
//! interactive prompts.

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod keycmd;
pub mod keymap;
pub mod messages;
pub mod session;
pub mod tracing;
pub mod util;
pub mod vars;

// Re-export commonly used types
pub use commands::{Cmd, Sink};
pub use config::EngineConfig;
pub use messages::Event;
pub use session::Session;

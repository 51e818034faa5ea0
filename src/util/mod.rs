//! Utility modules

pub mod args;
pub mod text;

pub use args::{is_quoted, unquote, Arguments};
pub use text::{display_escape, escape_chars};

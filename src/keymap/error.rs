//! Error types raised while registering or executing binds
//!
//! Matching itself never fails; these are only returned from registration
//! and explicit execution entry points.

use thiserror::Error;

/// A malformed bind pattern
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("bind pattern cannot be blank")]
    Blank,
    /// `*` on a segment that is followed by a prompt, e.g. `fl*<int:>_`
    #[error("'*' must end the last segment of {pattern:?}")]
    WildcardNotTerminal { pattern: String },
    /// A segment with no literal text around a prompt, e.g. `fl<a:><b:>_`
    #[error("empty segment {index} in {pattern:?}")]
    EmptySegment { pattern: String, index: usize },
}

/// A mode name that is not `-?[A-Za-z0-9][A-Za-z0-9_]*`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid mode name: {0:?}")]
pub struct ModeNameError(pub String);

/// Keyword arguments given to a handler that can't take them
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgumentError {
    #[error("handler for {pattern:?} does not accept keyword arguments")]
    UnexpectedKwargs { pattern: String },
    #[error("cannot supply keyword arguments to command binds ({pattern:?})")]
    KwargsForCommands { pattern: String },
}

/// Errors that can occur when loading keymaps or handling events
#[derive(Debug, Error)]
pub enum KeymapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Syntax error: {0}")]
    Syntax(String),
    #[error(transparent)]
    Pattern(#[from] PatternError),
    #[error(transparent)]
    ModeName(#[from] ModeNameError),
    #[error(transparent)]
    Argument(#[from] ArgumentError),
}

impl KeymapError {
    pub(crate) fn syntax(msg: impl Into<String>) -> Self {
        KeymapError::Syntax(msg.into())
    }
}

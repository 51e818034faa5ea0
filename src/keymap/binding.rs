//! Bind struct: a compiled pattern plus what to run when it completes

use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::error::{ArgumentError, PatternError};
use super::expand::expand;
use super::glob::{compile, Prompt, Segment};
use crate::commands::Sink;

/// Keyword arguments passed to callable handlers
pub type Kwargs = BTreeMap<String, String>;

/// A callable bind handler
///
/// Receives the command sink, the bind's fixed arguments followed by the
/// captured ones, and the merged keyword arguments.
pub type Handler = Arc<dyn Fn(&mut dyn Sink, &[String], &Kwargs) + Send + Sync>;

static NEXT_BIND_ID: AtomicU64 = AtomicU64::new(1);

/// What a bind does once its last segment matches
#[derive(Clone)]
pub enum Action {
    /// Call a function
    Callable {
        handler: Handler,
        args: Vec<String>,
        kwargs: Kwargs,
        accepts_kwargs: bool,
    },
    /// Expand each template with the captured arguments and send it
    Commands(Vec<String>),
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Callable {
                args,
                kwargs,
                accepts_kwargs,
                ..
            } => f
                .debug_struct("Callable")
                .field("args", args)
                .field("kwargs", kwargs)
                .field("accepts_kwargs", accepts_kwargs)
                .finish_non_exhaustive(),
            Action::Commands(templates) => f.debug_tuple("Commands").field(templates).finish(),
        }
    }
}

/// A compiled bind
#[derive(Debug, Clone)]
pub struct Bind {
    /// Unique, increasing, never reused
    pub id: u64,
    /// The pattern as registered
    pub pattern: String,
    pub segments: Vec<Segment>,
    /// `prompts[i]` is shown once `segments[i]` has matched
    pub prompts: Vec<Prompt>,
    pub action: Action,
    /// Single modifier-chord segment that fires outside the stack
    pub is_global: bool,
}

impl Bind {
    /// Bind a pattern to one or more command templates
    pub fn commands<I, S>(pattern: &str, templates: I) -> Result<Self, PatternError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let templates = templates.into_iter().map(Into::into).collect();
        Self::build(pattern, Action::Commands(templates))
    }

    /// Bind a pattern to a function that takes no keyword arguments
    pub fn callable<F>(pattern: &str, handler: F) -> Result<Self, PatternError>
    where
        F: Fn(&mut dyn Sink, &[String], &Kwargs) + Send + Sync + 'static,
    {
        Self::build(
            pattern,
            Action::Callable {
                handler: Arc::new(handler),
                args: Vec::new(),
                kwargs: Kwargs::new(),
                accepts_kwargs: false,
            },
        )
    }

    /// Bind a pattern to a function that accepts keyword arguments
    pub fn callable_with_kwargs<F>(pattern: &str, handler: F) -> Result<Self, PatternError>
    where
        F: Fn(&mut dyn Sink, &[String], &Kwargs) + Send + Sync + 'static,
    {
        let mut bind = Self::callable(pattern, handler)?;
        if let Action::Callable { accepts_kwargs, .. } = &mut bind.action {
            *accepts_kwargs = true;
        }
        Ok(bind)
    }

    fn build(pattern: &str, action: Action) -> Result<Self, PatternError> {
        let glob = compile(pattern)?;
        let is_global = glob.is_global();
        Ok(Self {
            id: NEXT_BIND_ID.fetch_add(1, Ordering::Relaxed),
            pattern: pattern.to_string(),
            segments: glob.segments,
            prompts: glob.prompts,
            action,
            is_global,
        })
    }

    /// Fixed positional arguments passed ahead of the captured ones
    pub fn with_args<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if let Action::Callable { args, .. } = &mut self.action {
            args.extend(extra.into_iter().map(Into::into));
        }
        self
    }

    /// Fixed keyword arguments (builder pattern)
    pub fn with_kwargs(mut self, extra: Kwargs) -> Result<Self, ArgumentError> {
        self.check_kwargs(&extra)?;
        if let Action::Callable { kwargs, .. } = &mut self.action {
            kwargs.extend(extra);
        }
        Ok(self)
    }

    fn check_kwargs(&self, kwargs: &Kwargs) -> Result<(), ArgumentError> {
        if kwargs.is_empty() {
            return Ok(());
        }
        match &self.action {
            Action::Callable {
                accepts_kwargs: true,
                ..
            } => Ok(()),
            Action::Callable { .. } => Err(ArgumentError::UnexpectedKwargs {
                pattern: self.pattern.clone(),
            }),
            Action::Commands(_) => Err(ArgumentError::KwargsForCommands {
                pattern: self.pattern.clone(),
            }),
        }
    }

    /// The segment to match when the stack is `depth` deep
    ///
    /// Global binds always match on their only segment.
    pub fn segment(&self, depth: usize) -> Option<&Segment> {
        if self.is_global {
            self.segments.first()
        } else {
            self.segments.get(depth)
        }
    }

    /// The prompt to show once the stack has advanced to `depth`
    pub fn prompt(&self, depth: usize) -> Option<&Prompt> {
        depth.checked_sub(1).and_then(|i| self.prompts.get(i))
    }

    /// Run this bind's action with the captured arguments
    pub fn exec(
        &self,
        sink: &mut dyn Sink,
        captured: &[String],
        kwargs: &Kwargs,
    ) -> Result<(), ArgumentError> {
        self.check_kwargs(kwargs)?;

        match &self.action {
            Action::Callable {
                handler,
                args,
                kwargs: fixed,
                ..
            } => {
                let mut all_args = args.clone();
                all_args.extend_from_slice(captured);
                let mut all_kwargs = fixed.clone();
                all_kwargs.extend(kwargs.iter().map(|(k, v)| (k.clone(), v.clone())));
                handler(sink, &all_args, &all_kwargs);
            }
            Action::Commands(templates) => {
                for template in templates {
                    sink.send(&expand(template, captured));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Cmd;

    fn kwargs(pairs: &[(&str, &str)]) -> Kwargs {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_ids_increase() {
        let a = Bind::commands("a", ["one"]).unwrap();
        let b = Bind::commands("a", ["one"]).unwrap();
        assert!(b.id > a.id);
    }

    #[test]
    fn test_commands_expand_in_order() {
        let bind = Bind::commands("o _", ["uri %s", "echo %1"]).unwrap();
        let mut out: Vec<Cmd> = Vec::new();
        bind.exec(&mut out, &["x".to_string()], &Kwargs::new())
            .unwrap();
        assert_eq!(out, vec![Cmd::send("uri x"), Cmd::send("echo x")]);
    }

    #[test]
    fn test_callable_gets_fixed_then_captured_args() {
        let bind = Bind::callable("g*", |sink, args, _| sink.send(&args.join(",")))
            .unwrap()
            .with_args(["fixed"]);
        let mut out: Vec<Cmd> = Vec::new();
        bind.exec(&mut out, &["cap".to_string()], &Kwargs::new())
            .unwrap();
        assert_eq!(out, vec![Cmd::send("fixed,cap")]);
    }

    #[test]
    fn test_kwargs_rejected_by_plain_callable() {
        let bind = Bind::callable("a", |_, _, _| {}).unwrap();
        let mut out: Vec<Cmd> = Vec::new();
        let err = bind
            .exec(&mut out, &[], &kwargs(&[("k", "v")]))
            .unwrap_err();
        assert!(matches!(err, ArgumentError::UnexpectedKwargs { .. }));
        assert!(out.is_empty());
    }

    #[test]
    fn test_kwargs_rejected_by_commands() {
        let bind = Bind::commands("a", ["x"]).unwrap();
        let err = bind.with_kwargs(kwargs(&[("k", "v")])).unwrap_err();
        assert!(matches!(err, ArgumentError::KwargsForCommands { .. }));
    }

    #[test]
    fn test_kwargs_merged_for_accepting_callable() {
        let bind = Bind::callable_with_kwargs("a", |sink, _, kw| {
            for (k, v) in kw {
                sink.write(k, v);
            }
        })
        .unwrap()
        .with_kwargs(kwargs(&[("a", "1")]))
        .unwrap();
        let mut out: Vec<Cmd> = Vec::new();
        bind.exec(&mut out, &[], &kwargs(&[("b", "2")])).unwrap();
        assert_eq!(out, vec![Cmd::set("a", "1"), Cmd::set("b", "2")]);
    }

    #[test]
    fn test_global_segment_ignores_depth() {
        let bind = Bind::commands("<Ctrl>r", ["reload"]).unwrap();
        assert!(bind.is_global);
        assert_eq!(bind.segment(3).map(|s| s.literal.as_str()), Some("r"));

        let bind = Bind::commands("f<go:>_", ["go %s"]).unwrap();
        assert!(!bind.is_global);
        assert!(bind.segment(2).is_none());
        assert_eq!(bind.prompt(1).map(|p| p.label.as_str()), Some("go:"));
        assert!(bind.prompt(0).is_none());
    }
}

//! Structured tool invocations.
//!
//! An `Invocation` is one step of a preview pipeline: an executable plus its
//! argument list. Arguments are passed to the process directly, never through
//! a shell, so paths with spaces or quotes need no escaping. Arguments are
//! kept as `OsString`s so paths reach the tool byte for byte, even when they
//! are not valid UTF-8.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::Path;

/// What a pipeline step does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    /// Extract one frame from the source video
    Extract,
    /// Combine the extracted frames into the output artifact
    Compose,
    /// Delete the extracted frames
    Cleanup,
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Extract => "extract",
            Self::Compose => "compose",
            Self::Cleanup => "cleanup",
        };
        f.write_str(name)
    }
}

/// Executable plus ordered arguments for one pipeline step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub kind: StepKind,
    pub program: String,
    pub args: Vec<OsString>,
}

impl Invocation {
    #[must_use]
    pub fn new(kind: StepKind, program: impl Into<String>) -> Self {
        Self {
            kind,
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Appends one argument.
    #[must_use]
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// Appends several arguments in order.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|arg| arg.as_ref().to_os_string()));
        self
    }

    /// Appends a path argument.
    #[must_use]
    pub fn path(self, path: &Path) -> Self {
        self.arg(path.as_os_str())
    }

    /// Best-effort steps may fail without failing the pipeline.
    #[must_use]
    pub fn is_best_effort(&self) -> bool {
        self.kind == StepKind::Cleanup
    }

    /// True when any argument equals `value`.
    #[must_use]
    pub fn has_arg(&self, value: impl AsRef<OsStr>) -> bool {
        let value = value.as_ref();
        self.args.iter().any(|a| a == value)
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            let arg = arg.to_string_lossy();
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " \"{arg}\"")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

// ============================================================================
// vidstrip-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Error Types for the Preview Pipeline
//
// Every fallible operation in vidstrip-core returns `CoreResult<T>`. The
// variants mirror the stages a preview goes through: argument validation,
// workspace preparation, duration probing and pipeline execution.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Custom error types for vidstrip-core
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Failed to prepare scratch directory '{path}': {source}")]
    ScratchDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Pipeline failed with exit code {exit_code}")]
    ProcessFailed { exit_code: i32 },

    #[error("Failed to start command '{0}': {1}")]
    CommandStart(String, #[source] io::Error),

    #[error("Required tool not found: {0}")]
    DependencyNotFound(String),

    #[error("Duration probe failed: {0}")]
    ProbeFailed(String),

    #[error("JSON parse error: {0}")]
    JsonParse(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl CoreError {
    /// Exit code carried by a failed pipeline, if this is one.
    #[must_use]
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::ProcessFailed { exit_code } => Some(*exit_code),
            _ => None,
        }
    }
}

/// Result type for vidstrip-core operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Builds a `CommandStart` error for a tool that could not be spawned.
pub fn command_start_error(command: impl Into<String>, err: io::Error) -> CoreError {
    CoreError::CommandStart(command.into(), err)
}

/// Builds a `ProcessFailed` error for a step that exited with `exit_code`.
pub fn command_failed_error(exit_code: i32) -> CoreError {
    CoreError::ProcessFailed { exit_code }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_only_for_process_failures() {
        assert_eq!(CoreError::ProcessFailed { exit_code: 3 }.exit_code(), Some(3));
        assert_eq!(CoreError::InvalidArgument("x".into()).exit_code(), None);
    }

    #[test]
    fn test_process_failed_message_names_code() {
        let err = CoreError::ProcessFailed { exit_code: 2 };
        assert_eq!(err.to_string(), "Pipeline failed with exit code 2");
    }
}

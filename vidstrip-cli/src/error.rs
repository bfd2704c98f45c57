// ============================================================================
// vidstrip-cli/src/error.rs
// ============================================================================
//
// CLI ERROR HANDLING: Result type and exit status mapping
//
// Commands return `anyhow` errors so they can attach context on top of
// `CoreError`. The binary maps the final error to a process exit status:
// a failed pipeline step passes its own exit code through, everything else
// exits with 1.

use vidstrip_core::CoreError;

/// Type alias for CLI results.
pub type CliResult<T> = anyhow::Result<T>;

/// Exit status used for errors that carry no step exit code.
pub const GENERIC_FAILURE: i32 = 1;

/// Maps an error to the process exit status.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<CoreError>())
        .and_then(CoreError::exit_code)
        .filter(|code| (1..=255).contains(code))
        .unwrap_or(GENERIC_FAILURE)
}

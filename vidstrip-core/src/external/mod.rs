// ============================================================================
// vidstrip-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Interactions with External CLI Tools
//
// This module encapsulates everything that leaves the process: spawning the
// ffmpeg / ImageMagick / gifski / rm steps of a pipeline, probing durations
// with MediaInfo, and checking that the configured tools can be started.
//
// KEY COMPONENTS:
// - Invocation / StepKind: structured description of one pipeline step
// - ProcessSpawner / StepProcess: traits for running steps (SystemSpawner)
// - DurationProbe: trait for duration lookup (MediaInfoProbe)
// - Dependency checking functions
//
// Consumers can inject their own trait implementations; `mocks` provides
// test doubles.

use crate::config::PreviewOptions;
use crate::error::{CoreError, CoreResult};

use std::io;
use std::process::{Command, Stdio};

// ============================================================================
// SUBMODULES
// ============================================================================

pub mod invocation;
pub mod mediainfo_executor;
pub mod process;

#[cfg(any(test, feature = "test-mocks"))]
pub mod mocks;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use invocation::{Invocation, StepKind};
pub use mediainfo_executor::{DurationProbe, MediaInfoProbe};
pub use process::{OutputStream, ProcessSpawner, StepProcess, SystemProcess, SystemSpawner};

// ============================================================================
// DEPENDENCY CHECKING
// ============================================================================

/// Checks if an external command is available and can be started.
///
/// Runs `cmd_name version_arg` with output discarded. The exit status is
/// ignored: some tools exit nonzero for their version flag.
///
/// # Errors
///
/// * `CoreError::DependencyNotFound` - If the command is not found
/// * `CoreError::CommandStart` - If the command exists but fails to start
pub fn check_dependency(cmd_name: &str, version_arg: &str) -> CoreResult<()> {
    let result = Command::new(cmd_name)
        .arg(version_arg)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match result {
        Ok(_) => {
            log::debug!("Found dependency: {cmd_name}");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::warn!("Dependency '{cmd_name}' not found.");
            Err(CoreError::DependencyNotFound(cmd_name.to_string()))
        }
        Err(e) => {
            log::error!("Failed to start dependency check command '{cmd_name}': {e}");
            Err(CoreError::CommandStart(cmd_name.to_string(), e))
        }
    }
}

/// Checks every tool a preview may need, in pipeline order.
///
/// Returns one `(tool, result)` pair per configured binary.
pub fn check_tools(options: &PreviewOptions) -> Vec<(String, CoreResult<()>)> {
    [
        (options.mediainfo_bin.as_str(), "--Version"),
        (options.ffmpeg_bin.as_str(), "-version"),
        (options.convert_bin.as_str(), "-version"),
        (options.gifski_bin.as_str(), "--version"),
    ]
    .into_iter()
    .map(|(tool, flag)| (tool.to_string(), check_dependency(tool, flag)))
    .collect()
}

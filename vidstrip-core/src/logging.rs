//! Logging helpers shared by the preview pipeline.
//!
//! The library only emits records through the `log` facade; installing a
//! logger is left to the binary. Tool output is logged under the
//! `vidstrip::tools` target so it can be filtered separately, e.g.
//! `RUST_LOG=vidstrip::tools=off`.

use log::debug;

use crate::external::Invocation;
use crate::processing::pipeline::Pipeline;

/// Log target for forwarded tool output.
pub const TOOL_OUTPUT_TARGET: &str = "vidstrip::tools";

/// Log a step about to be spawned
pub fn log_invocation(index: usize, total: usize, invocation: &Invocation) {
    debug!(
        "Executing step {}/{} ({}): {}",
        index + 1,
        total,
        invocation.kind,
        invocation
    );
}

/// Log an overview of a built pipeline
pub fn log_pipeline(pipeline: &Pipeline) {
    debug!(
        "Pipeline: {} steps, scratch {}, output {}",
        pipeline.steps.len(),
        pipeline.scratch_dir.display(),
        pipeline.output.display()
    );
}

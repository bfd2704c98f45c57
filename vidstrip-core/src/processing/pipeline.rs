// ============================================================================
// vidstrip-core/src/processing/pipeline.rs
// ============================================================================
//
// COMMAND PIPELINE: Extraction, Composition and Cleanup Steps
//
// Turns a request, its frame schedule and the resolved paths into the ordered
// list of tool invocations that produce a preview:
//
//   1. one ffmpeg extraction per scheduled timestamp, each writing a
//      zero-padded, sequentially numbered frame into the scratch directory
//   2. exactly one composition step, chosen by the output extension
//      (ImageMagick for jpg/jpeg/png, gifski for gif)
//   3. an optional best-effort cleanup step deleting the extracted frames

use std::path::{Path, PathBuf};

use crate::config::{Direction, PreviewOptions};
use crate::error::{CoreError, CoreResult};
use crate::external::{Invocation, StepKind};
use crate::processing::request::PreviewRequest;
use crate::processing::schedule::FrameTimestamp;
use crate::utils::{extension_lowercase, frame_file_name};

/// Shape of the final artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    /// Frames stacked into one still image
    Stacked,
    /// Frames encoded as an animated GIF
    Animated,
}

impl OutputKind {
    /// Selects the composition strategy from an output extension.
    pub fn from_extension(extension: &str) -> CoreResult<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" | "png" => Ok(Self::Stacked),
            "gif" => Ok(Self::Animated),
            other => Err(CoreError::InvalidArgument(format!(
                "unsupported output format '{other}' (expected jpg, jpeg, png or gif)"
            ))),
        }
    }
}

/// Ordered steps for one preview plus the paths they touch.
#[derive(Debug, Clone, PartialEq)]
pub struct Pipeline {
    pub steps: Vec<Invocation>,
    pub output: PathBuf,
    pub scratch_dir: PathBuf,
    /// Extracted frame files in temporal order
    pub frames: Vec<PathBuf>,
}

/// ffmpeg scale expression for the requested size. A missing dimension is
/// computed by ffmpeg from the aspect ratio.
#[must_use]
pub fn resize_expression(width: Option<u32>, height: Option<u32>) -> Option<String> {
    match (width, height) {
        (Some(w), None) => Some(format!("scale={w}:-1")),
        (None, Some(h)) => Some(format!("scale=-1:{h}")),
        (Some(w), Some(h)) => Some(format!("scale={w}:{h}")),
        (None, None) => None,
    }
}

/// Builds the full step list for a request.
///
/// # Errors
///
/// `InvalidArgument` when the output extension has no composition strategy,
/// the schedule is empty or `convert_options` has unbalanced quotes.
pub fn build_pipeline(
    request: &PreviewRequest,
    schedule: &[FrameTimestamp],
    output: &Path,
    scratch_dir: &Path,
) -> CoreResult<Pipeline> {
    if schedule.is_empty() {
        return Err(CoreError::InvalidArgument("frame schedule is empty".to_string()));
    }

    let options = request.options();
    let output_kind = OutputKind::from_extension(&extension_lowercase(output))?;

    if let Direction::Other(raw) = &options.direction {
        log::warn!("Unrecognized direction '{raw}', passing it to {} unchanged", options.convert_bin);
    }

    let resize = resize_expression(options.width, options.height);
    let frames: Vec<PathBuf> = schedule
        .iter()
        .map(|ts| scratch_dir.join(frame_file_name(ts.ordinal, &options.frames_format)))
        .collect();

    let mut steps: Vec<Invocation> = schedule
        .iter()
        .zip(&frames)
        .map(|(ts, frame)| extraction_step(options, request.input(), ts, resize.as_deref(), frame))
        .collect();

    steps.push(match output_kind {
        OutputKind::Stacked => stack_step(options, &frames, output)?,
        OutputKind::Animated => gif_step(options, &frames, output),
    });

    if options.cleanup {
        steps.push(cleanup_step(&frames));
    }

    log::debug!(
        "Built pipeline with {} steps ({} extractions, {:?} output)",
        steps.len(),
        frames.len(),
        output_kind
    );

    Ok(Pipeline {
        steps,
        output: output.to_path_buf(),
        scratch_dir: scratch_dir.to_path_buf(),
        frames,
    })
}

fn extraction_step(
    options: &PreviewOptions,
    input: &Path,
    timestamp: &FrameTimestamp,
    resize: Option<&str>,
    frame: &Path,
) -> Invocation {
    let mut inv = Invocation::new(StepKind::Extract, options.ffmpeg_bin.as_str())
        .arg("-ss")
        .arg(timestamp.wall_clock())
        .arg("-i")
        .path(input)
        .arg("-y");
    if let Some(filter) = resize {
        inv = inv.arg("-vf").arg(filter);
    }
    inv.arg("-vframes").arg("1").path(frame)
}

/// Splits `convert_options` the way a POSIX shell would, honoring quotes.
pub fn split_convert_options(raw: &str) -> CoreResult<Vec<String>> {
    shlex::split(raw).ok_or_else(|| {
        CoreError::InvalidArgument(format!("convert_options has unbalanced quotes: {raw}"))
    })
}

fn stack_step(options: &PreviewOptions, frames: &[PathBuf], output: &Path) -> CoreResult<Invocation> {
    let extra = split_convert_options(&options.convert_options)?;
    Ok(frames
        .iter()
        .fold(Invocation::new(StepKind::Compose, options.convert_bin.as_str()), |inv, f| inv.path(f))
        .arg(options.direction.append_flag())
        .args(extra)
        .path(output))
}

fn gif_step(options: &PreviewOptions, frames: &[PathBuf], output: &Path) -> Invocation {
    let mut inv = Invocation::new(StepKind::Compose, options.gifski_bin.as_str())
        .arg("--output")
        .path(output)
        .arg("--fps")
        .arg(options.fps.to_string())
        .arg("--quiet");
    if !options.loop_animation {
        inv = inv.arg("--once");
    }
    frames.iter().fold(inv, |inv, f| inv.path(f))
}

fn cleanup_step(frames: &[PathBuf]) -> Invocation {
    let inv = if cfg!(windows) {
        Invocation::new(StepKind::Cleanup, "cmd").args(["/C", "del", "/f", "/q"])
    } else {
        Invocation::new(StepKind::Cleanup, "rm").arg("-f")
    };
    frames.iter().fold(inv, |inv, f| inv.path(f))
}

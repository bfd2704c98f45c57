//! Frame sampling schedule.
//!
//! Frames are spaced by a fixed step of `floor(duration / count)` and sampled
//! at `step * i` for `i` in `1..=count`, so the first sample is one full step
//! into the video and the last lands at or just before the end. A
//! single-frame preview samples the temporal midpoint instead.

use crate::error::{CoreError, CoreResult};
use crate::utils::format_duration;

/// One sampled position in the source video.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTimestamp {
    /// 1-based position in the schedule
    pub ordinal: u32,
    /// Offset from the start of the video in milliseconds
    pub offset_ms: f64,
}

impl FrameTimestamp {
    /// Seek position as HH:MM:SS for the extraction tool.
    #[must_use]
    pub fn wall_clock(&self) -> String {
        format_duration(self.offset_ms)
    }
}

/// Computes the ordered sample timestamps for a preview.
///
/// # Errors
///
/// `InvalidArgument` when `frame_count` is zero, `duration_ms` is not a
/// positive finite number, or the video is too short (in milliseconds) to
/// give every frame a distinct timestamp.
pub fn compute_schedule(duration_ms: f64, frame_count: u32) -> CoreResult<Vec<FrameTimestamp>> {
    if frame_count == 0 {
        return Err(CoreError::InvalidArgument(
            "frame count must be a positive integer".to_string(),
        ));
    }
    if !duration_ms.is_finite() || duration_ms <= 0.0 {
        return Err(CoreError::InvalidArgument(format!(
            "video duration must be a positive number of milliseconds, got {duration_ms}"
        )));
    }

    if frame_count == 1 {
        return Ok(vec![FrameTimestamp {
            ordinal: 1,
            offset_ms: duration_ms / 2.0,
        }]);
    }

    let step = (duration_ms / f64::from(frame_count)).floor();
    if step < 1.0 {
        return Err(CoreError::InvalidArgument(format!(
            "video duration of {duration_ms} ms is too short for {frame_count} frames"
        )));
    }

    log::debug!("Frame schedule: {frame_count} frames, step {step} ms");

    Ok((1..=frame_count)
        .map(|ordinal| FrameTimestamp {
            ordinal,
            offset_ms: step * f64::from(ordinal),
        })
        .collect())
}

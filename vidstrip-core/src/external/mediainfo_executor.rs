//! MediaInfo integration for resolving the source duration
//!
//! When the caller does not supply `video_length`, the preview generator asks
//! MediaInfo for the container duration. MediaInfo reports `Duration` in
//! seconds as a string; the General track is preferred, the first Video track
//! is the fallback.

use crate::error::{CoreError, CoreResult, command_start_error};
use serde::Deserialize;
use std::path::Path;
use std::process::Command;

/// Resolves a media file's duration in milliseconds.
pub trait DurationProbe {
    fn duration_ms(&self, input: &Path, tool: &str) -> CoreResult<f64>;
}

/// MediaInfo track, reduced to the fields the duration lookup needs
#[derive(Debug, Clone, Deserialize)]
pub struct MediaInfoTrack {
    #[serde(rename = "@type")]
    pub track_type: String,
    #[serde(rename = "Duration")]
    pub duration: Option<String>,
}

/// MediaInfo media container
#[derive(Debug, Clone, Deserialize)]
pub struct MediaInfoMedia {
    #[serde(default)]
    pub track: Vec<MediaInfoTrack>,
}

/// Root MediaInfo response structure. `media` is null for unreadable files.
#[derive(Debug, Clone, Deserialize)]
pub struct MediaInfoResponse {
    pub media: Option<MediaInfoMedia>,
}

/// Default probe running `<tool> --Output=JSON <file>`.
#[derive(Debug, Clone, Default)]
pub struct MediaInfoProbe;

impl DurationProbe for MediaInfoProbe {
    fn duration_ms(&self, input: &Path, tool: &str) -> CoreResult<f64> {
        log::debug!("Running {tool} for duration of: {}", input.display());

        let output = Command::new(tool)
            .arg("--Output=JSON")
            .arg(input)
            .output()
            .map_err(|e| command_start_error(tool, e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CoreError::ProbeFailed(format!(
                "{tool} exited with {} for {}: {}",
                output.status,
                input.display(),
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let response: MediaInfoResponse = serde_json::from_str(&stdout).map_err(|e| {
            CoreError::JsonParse(format!(
                "Failed to parse {tool} JSON output for {}: {e}",
                input.display()
            ))
        })?;

        let duration = duration_from_response(&response).ok_or_else(|| {
            CoreError::ProbeFailed(format!("no duration reported for {}", input.display()))
        })?;
        log::debug!("Probed duration of {}: {duration} ms", input.display());
        Ok(duration)
    }
}

/// Extracts the duration in milliseconds from a parsed MediaInfo response.
pub fn duration_from_response(response: &MediaInfoResponse) -> Option<f64> {
    let tracks = &response.media.as_ref()?.track;
    let track_seconds = |kind: &str| {
        tracks
            .iter()
            .filter(|t| t.track_type == kind)
            .find_map(|t| t.duration.as_deref()?.trim().parse::<f64>().ok())
    };

    track_seconds("General")
        .or_else(|| track_seconds("Video"))
        .map(|secs| secs * 1000.0)
        .filter(|ms| ms.is_finite() && *ms > 0.0)
}

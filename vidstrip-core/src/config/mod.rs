//! Configuration structures and constants for the vidstrip-core library.
//!
//! `PreviewOptions` is the options bundle that accompanies every preview
//! request. It deserializes from the same snake_case keys callers use in JSON
//! option files (`video_length`, `frames_format`, `loop`, ...), and the
//! builder provides a fluent way to assemble one in code.

mod builder;

use std::convert::Infallible;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

pub use builder::PreviewOptionsBuilder;

// Default constants

/// Image format used for the intermediate per-frame files.
pub const DEFAULT_FRAMES_FORMAT: &str = "jpg";

/// Frame rate handed to the GIF encoder.
pub const DEFAULT_FPS: f64 = 1.0;

/// ImageMagick composition tool.
pub const DEFAULT_CONVERT_BIN: &str = "convert";

/// Frame extraction tool.
pub const DEFAULT_FFMPEG_BIN: &str = "ffmpeg";

/// Duration probe tool.
pub const DEFAULT_MEDIAINFO_BIN: &str = "mediainfo";

/// GIF encoder.
pub const DEFAULT_GIFSKI_BIN: &str = "gifski";

/// Stacking direction for still previews.
///
/// `v`/`vertical` and `h`/`horizontal` are recognized; anything else is kept
/// verbatim and handed to the composition tool as its own flag.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Direction {
    #[default]
    Vertical,
    Horizontal,
    Other(String),
}

impl Direction {
    /// The ImageMagick flag for this direction.
    #[must_use]
    pub fn append_flag(&self) -> &str {
        match self {
            Self::Vertical => "-append",
            Self::Horizontal => "+append",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for Direction {
    fn from(value: String) -> Self {
        match value.as_str() {
            "v" | "vertical" => Self::Vertical,
            "h" | "horizontal" => Self::Horizontal,
            _ => Self::Other(value),
        }
    }
}

impl From<Direction> for String {
    fn from(value: Direction) -> Self {
        match value {
            Direction::Vertical => "vertical".to_string(),
            Direction::Horizontal => "horizontal".to_string(),
            Direction::Other(raw) => raw,
        }
    }
}

impl FromStr for Direction {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_string()))
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertical => f.write_str("vertical"),
            Self::Horizontal => f.write_str("horizontal"),
            Self::Other(raw) => f.write_str(raw),
        }
    }
}

/// Options bundle for a single preview.
///
/// All fields have defaults, so an empty JSON object (`{}`) is a valid
/// options file.
///
/// # Examples
///
/// ```rust
/// use vidstrip_core::config::{Direction, PreviewOptions};
///
/// let options = PreviewOptions::from_json_str(r#"{ "direction": "h", "loop": false }"#).unwrap();
/// assert_eq!(options.direction, Direction::Horizontal);
/// assert!(!options.loop_animation);
/// assert_eq!(options.frames_format, "jpg");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewOptions {
    /// Video duration in milliseconds. Probed with MediaInfo when absent.
    pub video_length: Option<f64>,

    /// Target frame width in pixels
    pub width: Option<u32>,

    /// Target frame height in pixels
    pub height: Option<u32>,

    /// Extension of the intermediate frame images
    pub frames_format: String,

    /// Stacking direction for jpg/png output
    pub direction: Direction,

    /// Whether an animated GIF loops forever
    #[serde(rename = "loop")]
    pub loop_animation: bool,

    /// GIF frame rate
    pub fps: f64,

    /// Scratch directory for extracted frames (defaults to a unique
    /// directory next to the input file)
    pub temp_dir: Option<PathBuf>,

    pub convert_bin: String,

    /// Extra arguments for the composition tool, split with shell quoting rules
    pub convert_options: String,

    pub ffmpeg_bin: String,
    pub mediainfo_bin: String,
    pub gifski_bin: String,

    /// Delete the extracted frames once the preview is written
    pub cleanup: bool,

    /// Suppress tool output
    pub silent: bool,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            video_length: None,
            width: None,
            height: None,
            frames_format: DEFAULT_FRAMES_FORMAT.to_string(),
            direction: Direction::Vertical,
            loop_animation: true,
            fps: DEFAULT_FPS,
            temp_dir: None,
            convert_bin: DEFAULT_CONVERT_BIN.to_string(),
            convert_options: String::new(),
            ffmpeg_bin: DEFAULT_FFMPEG_BIN.to_string(),
            mediainfo_bin: DEFAULT_MEDIAINFO_BIN.to_string(),
            gifski_bin: DEFAULT_GIFSKI_BIN.to_string(),
            cleanup: false,
            silent: false,
        }
    }
}

impl PreviewOptions {
    /// Parses an options bundle from a JSON document. Unrecognized keys are
    /// logged and ignored.
    pub fn from_json_str(json: &str) -> CoreResult<Self> {
        Self::parse_json(json)
            .map_err(|e| CoreError::JsonParse(format!("Invalid preview options: {e}")))
    }

    /// Reads and parses a JSON options file.
    pub fn from_json_file(path: &Path) -> CoreResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse_json(&content).map_err(|e| {
            CoreError::JsonParse(format!(
                "Invalid preview options in {}: {e}",
                path.display()
            ))
        })
    }

    fn parse_json(json: &str) -> serde_json::Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        for key in unknown_keys(&value) {
            log::warn!("Ignoring unknown preview option '{key}'");
        }
        serde_json::from_value(value)
    }

    /// Checks value ranges that serde cannot express.
    pub fn validate(&self) -> CoreResult<()> {
        if let Some(length) = self.video_length {
            if !length.is_finite() || length <= 0.0 {
                return Err(CoreError::InvalidArgument(format!(
                    "video_length must be a positive number of milliseconds, got {length}"
                )));
            }
        }
        if self.width == Some(0) || self.height == Some(0) {
            return Err(CoreError::InvalidArgument(
                "width and height must be greater than zero".to_string(),
            ));
        }
        if !self.fps.is_finite() || self.fps <= 0.0 {
            return Err(CoreError::InvalidArgument(format!(
                "fps must be a positive number, got {}",
                self.fps
            )));
        }
        if self.frames_format.trim().is_empty() {
            return Err(CoreError::InvalidArgument(
                "frames_format must not be empty".to_string(),
            ));
        }

        let tools = [
            ("convert_bin", &self.convert_bin),
            ("ffmpeg_bin", &self.ffmpeg_bin),
            ("mediainfo_bin", &self.mediainfo_bin),
            ("gifski_bin", &self.gifski_bin),
        ];
        for (key, value) in tools {
            if value.trim().is_empty() {
                return Err(CoreError::InvalidArgument(format!("{key} must not be empty")));
            }
        }

        Ok(())
    }
}

/// Top-level keys of `value` that `PreviewOptions` does not recognize.
fn unknown_keys(value: &serde_json::Value) -> Vec<String> {
    let Some(object) = value.as_object() else {
        return Vec::new();
    };
    let known = serde_json::to_value(PreviewOptions::default()).unwrap_or_default();
    let Some(known) = known.as_object() else {
        return Vec::new();
    };
    object
        .keys()
        .filter(|key| !known.contains_key(key.as_str()))
        .cloned()
        .collect()
}

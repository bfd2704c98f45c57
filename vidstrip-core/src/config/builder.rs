// ============================================================================
// vidstrip-core/src/config/builder.rs
// ============================================================================
//
// CONFIGURATION BUILDER: Builder Pattern for PreviewOptions
//
// Provides a fluent API for assembling a PreviewOptions bundle in code. Every
// field starts from the PreviewOptions defaults, so callers only set what
// they need.

// ---- Standard library imports ----
use std::path::PathBuf;

// ---- Internal crate imports ----
use super::{Direction, PreviewOptions};

/// Builder for creating PreviewOptions instances.
///
/// # Examples
///
/// ```rust
/// use vidstrip_core::config::{Direction, PreviewOptionsBuilder};
///
/// let options = PreviewOptionsBuilder::new()
///     .video_length(60_000.0)
///     .width(320)
///     .direction(Direction::Horizontal)
///     .cleanup(true)
///     .build();
///
/// assert_eq!(options.width, Some(320));
/// assert!(options.cleanup);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PreviewOptionsBuilder {
    options: PreviewOptions,
}

impl PreviewOptionsBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing bundle, e.g. one read from a JSON file.
    pub fn from_options(options: PreviewOptions) -> Self {
        Self { options }
    }

    /// Sets the known video duration in milliseconds, skipping the probe.
    pub fn video_length(mut self, millis: f64) -> Self {
        self.options.video_length = Some(millis);
        self
    }

    /// Sets the target frame width.
    pub fn width(mut self, width: u32) -> Self {
        self.options.width = Some(width);
        self
    }

    /// Sets the target frame height.
    pub fn height(mut self, height: u32) -> Self {
        self.options.height = Some(height);
        self
    }

    /// Sets the intermediate frame image format (e.g. "jpg", "png").
    pub fn frames_format(mut self, format: &str) -> Self {
        self.options.frames_format = format.to_string();
        self
    }

    /// Sets the stacking direction.
    pub fn direction(mut self, direction: Direction) -> Self {
        self.options.direction = direction;
        self
    }

    /// Sets whether animated output loops.
    pub fn loop_animation(mut self, enable: bool) -> Self {
        self.options.loop_animation = enable;
        self
    }

    /// Sets the animation frame rate.
    pub fn fps(mut self, fps: f64) -> Self {
        self.options.fps = fps;
        self
    }

    /// Sets the scratch directory for extracted frames.
    pub fn temp_dir(mut self, dir: PathBuf) -> Self {
        self.options.temp_dir = Some(dir);
        self
    }

    pub fn convert_bin(mut self, bin: &str) -> Self {
        self.options.convert_bin = bin.to_string();
        self
    }

    /// Extra arguments passed to the composition tool before the output path.
    pub fn convert_options(mut self, options: &str) -> Self {
        self.options.convert_options = options.to_string();
        self
    }

    pub fn ffmpeg_bin(mut self, bin: &str) -> Self {
        self.options.ffmpeg_bin = bin.to_string();
        self
    }

    pub fn mediainfo_bin(mut self, bin: &str) -> Self {
        self.options.mediainfo_bin = bin.to_string();
        self
    }

    pub fn gifski_bin(mut self, bin: &str) -> Self {
        self.options.gifski_bin = bin.to_string();
        self
    }

    /// Sets whether extracted frames are deleted after composition.
    pub fn cleanup(mut self, enable: bool) -> Self {
        self.options.cleanup = enable;
        self
    }

    /// Sets whether tool output is suppressed.
    pub fn silent(mut self, enable: bool) -> Self {
        self.options.silent = enable;
        self
    }

    /// Builds the PreviewOptions bundle.
    pub fn build(self) -> PreviewOptions {
        self.options
    }
}

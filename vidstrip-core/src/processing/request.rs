//! Preview request: the validated input to a single preview run.

use std::path::{Path, PathBuf};

use crate::config::PreviewOptions;
use crate::error::{CoreError, CoreResult};

/// Input file, output target, frame count and options for one preview.
///
/// Construction validates everything that can be checked without touching
/// the filesystem or spawning a process; a `PreviewRequest` is immutable
/// afterwards.
#[derive(Debug, Clone)]
pub struct PreviewRequest {
    input: PathBuf,
    output: PathBuf,
    frame_count: u32,
    options: PreviewOptions,
}

impl PreviewRequest {
    /// Creates a request. An empty `output` selects the default output path.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for an empty input path, a zero frame count or
    /// options that fail `PreviewOptions::validate`.
    pub fn new(
        input: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
        frame_count: u32,
        options: PreviewOptions,
    ) -> CoreResult<Self> {
        let input = input.into();
        if input.as_os_str().is_empty() {
            return Err(CoreError::InvalidArgument("no source file given".to_string()));
        }
        if frame_count == 0 {
            return Err(CoreError::InvalidArgument(
                "frame count must be a positive integer".to_string(),
            ));
        }
        options.validate()?;

        Ok(Self {
            input,
            output: output.into(),
            frame_count,
            options,
        })
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    /// The caller's output template, or `None` when the default applies.
    pub fn output_template(&self) -> Option<&Path> {
        if self.output.as_os_str().is_empty() {
            None
        } else {
            Some(&self.output)
        }
    }

    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    pub fn options(&self) -> &PreviewOptions {
        &self.options
    }
}

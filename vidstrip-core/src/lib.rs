//! Core library for generating video previews with external tools.
//!
//! A preview is a handful of frames sampled at evenly spaced timestamps,
//! extracted with ffmpeg and then either stacked into one still image
//! (ImageMagick `convert`, for jpg/jpeg/png output) or encoded into an
//! animated GIF (gifski). The source duration is probed with MediaInfo when
//! the caller does not provide it.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use vidstrip_core::{Direction, PreviewOptionsBuilder, generate_preview};
//!
//! let options = PreviewOptionsBuilder::new()
//!     .width(320)
//!     .direction(Direction::Horizontal)
//!     .cleanup(true)
//!     .build();
//!
//! let result = generate_preview("/videos/clip.mp4", "/videos/clip_{{frames}}.jpg", 5, options)
//!     .unwrap();
//! println!("Preview written to {}", result.file.display());
//! ```

pub mod config;
pub mod error;
pub mod external;
pub mod logging;
pub mod processing;
pub mod temp_files;
pub mod utils;

// Re-exports for public API
pub use config::{Direction, PreviewOptions, PreviewOptionsBuilder};
pub use error::{CoreError, CoreResult};
pub use external::{
    DurationProbe, Invocation, MediaInfoProbe, OutputStream, ProcessSpawner, StepKind,
    StepProcess, SystemSpawner, check_dependency, check_tools,
};
pub use processing::{
    DefaultPreviewGenerator, DiagnosticLine, FrameTimestamp, MacroValues, Pipeline, PipelineRunner, PreviewGenerator,
    PreviewPlan, PreviewRequest, PreviewResult, apply_macros, build_pipeline, compute_schedule,
    default_output_path, generate_preview,
};
pub use temp_files::{FixedIdGenerator, IdGenerator, RandomIdGenerator, ensure_scratch_dir};
pub use utils::format_duration;

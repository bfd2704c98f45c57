// vidstrip-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "Vidstrip: video preview generator",
    long_about = "Samples evenly spaced frames from a video with ffmpeg and combines them \
                  into a stacked image (ImageMagick) or an animated GIF (gifski)."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generates a preview image or GIF from a video file
    Generate(GenerateArgs),
    /// Checks that the configured external tools can be started
    Check(CheckArgs),
}

/// Paths of the external tools. Each can also come from the environment.
#[derive(Args, Debug, Clone, Default)]
pub struct ToolArgs {
    /// ffmpeg executable used for frame extraction
    #[arg(long, value_name = "PATH", env = "VIDSTRIP_FFMPEG_BIN")]
    pub ffmpeg_bin: Option<String>,

    /// ImageMagick `convert` executable used for stacked output
    #[arg(long, value_name = "PATH", env = "VIDSTRIP_CONVERT_BIN")]
    pub convert_bin: Option<String>,

    /// gifski executable used for GIF output
    #[arg(long, value_name = "PATH", env = "VIDSTRIP_GIFSKI_BIN")]
    pub gifski_bin: Option<String>,

    /// mediainfo executable used to probe the video duration
    #[arg(long, value_name = "PATH", env = "VIDSTRIP_MEDIAINFO_BIN")]
    pub mediainfo_bin: Option<String>,
}

#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Source video file
    #[arg(short = 'i', long = "input", required = true, value_name = "INPUT")]
    pub input: PathBuf,

    /// Output file; may contain {{frames}}, {{duration}}, {{direction}} and {{resize}}.
    /// Defaults to <INPUT stem>_preview.<frames-format> next to the input
    #[arg(short = 'o', long = "output", value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Number of frames to sample
    #[arg(short = 'n', long = "frames", required = true, value_name = "COUNT",
          value_parser = clap::value_parser!(u32).range(1..))]
    pub frames: u32,

    /// JSON file with preview options; flags take precedence over it
    #[arg(long, value_name = "JSON")]
    pub config: Option<PathBuf>,

    // --- Sampling ---
    /// Video duration in milliseconds (skips probing with mediainfo)
    #[arg(long, value_name = "MS")]
    pub video_length: Option<f64>,

    // --- Composition ---
    /// Frame width in pixels
    #[arg(long, value_name = "PIXELS")]
    pub width: Option<u32>,

    /// Frame height in pixels
    #[arg(long, value_name = "PIXELS")]
    pub height: Option<u32>,

    /// Image format of the extracted frames
    #[arg(long, value_name = "EXT")]
    pub frames_format: Option<String>,

    /// Stacking direction: v/vertical, h/horizontal, or a raw convert flag
    #[arg(long, value_name = "DIRECTION", allow_hyphen_values = true)]
    pub direction: Option<String>,

    /// Extra arguments for convert, split with shell quoting (e.g. "-font 'Times New Roman'")
    #[arg(long, value_name = "ARGS", allow_hyphen_values = true)]
    pub convert_options: Option<String>,

    /// Play the GIF once instead of looping
    #[arg(long, default_value_t = false)]
    pub no_loop: bool,

    /// GIF frame rate
    #[arg(long, value_name = "FPS")]
    pub fps: Option<f64>,

    // --- Workspace ---
    /// Directory for extracted frames (default: temp_<random> next to the input)
    #[arg(long, value_name = "DIR")]
    pub temp_dir: Option<PathBuf>,

    /// Delete the extracted frames afterwards
    #[arg(long, default_value_t = false)]
    pub cleanup: bool,

    /// Discard the output of the external tools
    #[arg(long, default_value_t = false)]
    pub silent: bool,

    #[command(flatten)]
    pub tools: ToolArgs,
}

#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// JSON file with preview options (only the tool paths are used)
    #[arg(long, value_name = "JSON")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub tools: ToolArgs,
}

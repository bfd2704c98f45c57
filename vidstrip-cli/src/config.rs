// vidstrip-cli/src/config.rs
//
// Resolves the preview options for a CLI run. Precedence, lowest first:
// built-in defaults, the JSON file given with --config, then flags (and the
// VIDSTRIP_*_BIN environment variables, which clap folds into the flags).

use std::path::Path;

use anyhow::Context;
use vidstrip_core::{Direction, PreviewOptions, PreviewOptionsBuilder};

use crate::cli::{GenerateArgs, ToolArgs};
use crate::error::CliResult;

/// Loads the options file, or the defaults when none was given.
pub fn load_base_options(config: Option<&Path>) -> CliResult<PreviewOptions> {
    match config {
        Some(path) => {
            log::debug!("Loading preview options from {}", path.display());
            PreviewOptions::from_json_file(path)
                .with_context(|| format!("Failed to load options from '{}'", path.display()))
        }
        None => Ok(PreviewOptions::default()),
    }
}

/// Applies tool path overrides.
pub fn apply_tool_overrides(mut builder: PreviewOptionsBuilder, tools: &ToolArgs) -> PreviewOptionsBuilder {
    if let Some(bin) = &tools.ffmpeg_bin {
        builder = builder.ffmpeg_bin(bin);
    }
    if let Some(bin) = &tools.convert_bin {
        builder = builder.convert_bin(bin);
    }
    if let Some(bin) = &tools.gifski_bin {
        builder = builder.gifski_bin(bin);
    }
    if let Some(bin) = &tools.mediainfo_bin {
        builder = builder.mediainfo_bin(bin);
    }
    builder
}

/// Builds the final options for `vidstrip generate`.
pub fn resolve_generate_options(args: &GenerateArgs) -> CliResult<PreviewOptions> {
    let base = load_base_options(args.config.as_deref())?;
    let mut builder = apply_tool_overrides(PreviewOptionsBuilder::from_options(base), &args.tools);

    if let Some(length) = args.video_length {
        builder = builder.video_length(length);
    }
    if let Some(width) = args.width {
        builder = builder.width(width);
    }
    if let Some(height) = args.height {
        builder = builder.height(height);
    }
    if let Some(format) = &args.frames_format {
        builder = builder.frames_format(format);
    }
    if let Some(direction) = &args.direction {
        builder = builder.direction(Direction::from(direction.clone()));
    }
    if let Some(options) = &args.convert_options {
        builder = builder.convert_options(options);
    }
    if let Some(fps) = args.fps {
        builder = builder.fps(fps);
    }
    if let Some(dir) = &args.temp_dir {
        builder = builder.temp_dir(dir.clone());
    }
    // Switches only ever turn their behavior on (or looping off).
    if args.no_loop {
        builder = builder.loop_animation(false);
    }
    if args.cleanup {
        builder = builder.cleanup(true);
    }
    if args.silent {
        builder = builder.silent(true);
    }

    Ok(builder.build())
}

/// Builds the options for `vidstrip check`.
pub fn resolve_tool_options(config: Option<&Path>, tools: &ToolArgs) -> CliResult<PreviewOptions> {
    let base = load_base_options(config)?;
    Ok(apply_tool_overrides(PreviewOptionsBuilder::from_options(base), tools).build())
}

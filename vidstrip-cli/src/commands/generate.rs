//! Implementation of the 'generate' subcommand.
//!
//! Resolves the preview options, builds the request and hands it to
//! vidstrip-core. The finished preview's path is printed on stdout.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use log::{debug, info};
use vidstrip_core::{DefaultPreviewGenerator, PreviewRequest, PreviewResult};

use crate::cli::GenerateArgs;
use crate::config::resolve_generate_options;
use crate::error::CliResult;

/// Builds the core request from the parsed arguments.
pub fn build_request(args: &GenerateArgs) -> CliResult<PreviewRequest> {
    let options = resolve_generate_options(args)?;
    debug!("Resolved preview options: {options:?}");

    let output = args.output.clone().unwrap_or_default();
    PreviewRequest::new(args.input.clone(), output, args.frames, options)
        .context("Invalid preview request")
}

/// Main entry point for the generate command.
pub fn run_generate(args: GenerateArgs) -> CliResult<PathBuf> {
    let start_time = Instant::now();
    let request = build_request(&args)?;

    info!("Input: {}", request.input().display());
    let PreviewResult { file } = DefaultPreviewGenerator::default()
        .generate(&request)
        .with_context(|| format!("Failed to generate preview for '{}'", args.input.display()))?;

    info!("Finished in {:.1}s", start_time.elapsed().as_secs_f64());
    println!("{}", file.display());
    Ok(file)
}

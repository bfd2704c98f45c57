//! Preview generation: scheduling, planning and running the tool pipeline.
//!
//! This module ties the pieces together. A `PreviewGenerator` takes a
//! validated `PreviewRequest`, resolves the source duration (probing only
//! when the caller did not supply it), computes the frame schedule, renders
//! the output path, prepares the scratch directory and then executes the
//! pipeline through its `ProcessSpawner`.

/// Frame sampling schedule
pub mod schedule;

/// Output path templating
pub mod output_path;

/// Preview request type
pub mod request;

/// Step list construction
pub mod pipeline;

/// Sequential pipeline execution
pub mod orchestrator;

use std::path::{Path, PathBuf};

use crate::config::PreviewOptions;
use crate::error::CoreResult;
use crate::external::{DurationProbe, MediaInfoProbe, ProcessSpawner, SystemSpawner};
use crate::logging::log_pipeline;
use crate::temp_files::{IdGenerator, RandomIdGenerator, default_scratch_dir, ensure_scratch_dir};

pub use orchestrator::{DiagnosticLine, PipelineRun, PipelineRunner};
pub use output_path::{MacroValues, apply_macros, default_output_path, render_template_path};
pub use pipeline::{
    OutputKind, Pipeline, build_pipeline, resize_expression, split_convert_options,
};
pub use request::PreviewRequest;
pub use schedule::{FrameTimestamp, compute_schedule};

/// Returned when every critical step of a preview succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewResult {
    /// Path of the generated preview
    pub file: PathBuf,
}

/// Everything decided before the first process starts.
#[derive(Debug, Clone)]
pub struct PreviewPlan {
    pub duration_ms: f64,
    pub schedule: Vec<FrameTimestamp>,
    pub pipeline: Pipeline,
}

/// Generates previews using injected collaborators.
pub struct PreviewGenerator<S, P, I> {
    spawner: S,
    probe: P,
    ids: I,
}

/// Generator wired to the real tools.
pub type DefaultPreviewGenerator = PreviewGenerator<SystemSpawner, MediaInfoProbe, RandomIdGenerator>;

impl Default for DefaultPreviewGenerator {
    fn default() -> Self {
        Self::new(SystemSpawner, MediaInfoProbe, RandomIdGenerator)
    }
}

impl<S, P, I> PreviewGenerator<S, P, I>
where
    S: ProcessSpawner,
    P: DurationProbe,
    I: IdGenerator,
{
    pub fn new(spawner: S, probe: P, ids: I) -> Self {
        Self { spawner, probe, ids }
    }

    /// Resolves everything needed to run `request` without touching the
    /// filesystem (apart from the duration probe).
    pub fn plan(&self, request: &PreviewRequest) -> CoreResult<PreviewPlan> {
        let options = request.options();

        let duration_ms = match options.video_length {
            Some(length) => length,
            None => self.probe.duration_ms(request.input(), &options.mediainfo_bin)?,
        };
        let schedule = compute_schedule(duration_ms, request.frame_count())?;

        let scratch_dir = options
            .temp_dir
            .clone()
            .unwrap_or_else(|| default_scratch_dir(request.input(), &self.ids));

        let template = request.output_template().map_or_else(
            || default_output_path(request.input(), &options.frames_format),
            Path::to_path_buf,
        );
        let output = render_output_path(&template, request.frame_count(), duration_ms, options);

        let pipeline = build_pipeline(request, &schedule, &output, &scratch_dir)?;
        log_pipeline(&pipeline);

        Ok(PreviewPlan {
            duration_ms,
            schedule,
            pipeline,
        })
    }

    /// Plans and runs `request`, returning the path of the finished preview.
    pub fn generate(&self, request: &PreviewRequest) -> CoreResult<PreviewResult> {
        let plan = self.plan(request)?;
        log::info!(
            "Generating {}-frame preview of {} ({} ms)",
            request.frame_count(),
            request.input().display(),
            plan.duration_ms
        );

        ensure_scratch_dir(&plan.pipeline.scratch_dir)?;
        let result = PipelineRunner::new(&self.spawner, request.options().silent)
            .execute(&plan.pipeline)?;

        log::info!("Preview written to {}", result.file.display());
        Ok(result)
    }
}

fn render_output_path(
    template: &Path,
    frames: u32,
    duration_ms: f64,
    options: &PreviewOptions,
) -> PathBuf {
    let values = MacroValues {
        frames,
        duration_ms,
        direction: options.direction.append_flag().to_string(),
        resize: resize_expression(options.width, options.height).unwrap_or_default(),
    };
    render_template_path(template, &values)
}

/// Generates a preview with the default tools.
///
/// An empty `output` writes `<input stem>_preview.<frames_format>` next to
/// the input.
pub fn generate_preview(
    input: impl Into<PathBuf>,
    output: impl Into<PathBuf>,
    frame_count: u32,
    options: PreviewOptions,
) -> CoreResult<PreviewResult> {
    let request = PreviewRequest::new(input, output, frame_count, options)?;
    DefaultPreviewGenerator::default().generate(&request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Direction, PreviewOptionsBuilder};
    use crate::error::CoreError;
    use crate::external::StepKind;
    use crate::external::mocks::{MockDurationProbe, MockSpawner};
    use crate::temp_files::FixedIdGenerator;

    fn generator() -> (
        PreviewGenerator<MockSpawner, MockDurationProbe, FixedIdGenerator>,
        MockSpawner,
        MockDurationProbe,
    ) {
        let spawner = MockSpawner::new();
        let probe = MockDurationProbe::new();
        let generator = PreviewGenerator::new(
            spawner.clone(),
            probe.clone(),
            FixedIdGenerator("abc123".to_string()),
        );
        (generator, spawner, probe)
    }

    #[test]
    fn test_plan_probes_when_length_missing() {
        let (generator, _, probe) = generator();
        probe.expect_duration(Path::new("/videos/clip.mp4"), 10000.0);

        let request =
            PreviewRequest::new("/videos/clip.mp4", "", 5, PreviewOptions::default()).unwrap();
        let plan = generator.plan(&request).unwrap();

        assert_eq!(probe.call_count(), 1);
        let offsets: Vec<f64> = plan.schedule.iter().map(|t| t.offset_ms).collect();
        assert_eq!(offsets, [2000.0, 4000.0, 6000.0, 8000.0, 10000.0]);
        assert_eq!(plan.pipeline.output, PathBuf::from("/videos/clip_preview.jpg"));
        assert_eq!(plan.pipeline.scratch_dir, PathBuf::from("/videos/temp_abc123"));
    }

    #[test]
    fn test_plan_skips_probe_with_explicit_length() {
        let (generator, _, probe) = generator();
        let options = PreviewOptionsBuilder::new()
            .video_length(9000.0)
            .temp_dir(PathBuf::from("/work"))
            .direction(Direction::Horizontal)
            .width(160)
            .build();
        let request = PreviewRequest::new(
            "/videos/clip.mp4",
            "/out/{{frames}}_{{ duration }}_{{direction}}_{{resize}}.png",
            3,
            options,
        )
        .unwrap();

        let plan = generator.plan(&request).unwrap();
        assert_eq!(probe.call_count(), 0);
        assert_eq!(plan.pipeline.scratch_dir, PathBuf::from("/work"));
        assert_eq!(
            plan.pipeline.output,
            PathBuf::from("/out/3_9000_+append_scale=160:-1.png")
        );
    }

    #[test]
    fn test_probe_failure_propagates() {
        let (generator, spawner, _) = generator();
        let request =
            PreviewRequest::new("/videos/unknown.mp4", "", 2, PreviewOptions::default()).unwrap();
        assert!(matches!(generator.generate(&request), Err(CoreError::ProbeFailed(_))));
        assert!(spawner.get_received_calls().is_empty());
    }

    #[test]
    fn test_generate_runs_every_step() {
        let dir = tempfile::tempdir().unwrap();
        let (generator, spawner, _) = generator();
        let scratch = dir.path().join("frames");
        let options = PreviewOptionsBuilder::new()
            .video_length(8000.0)
            .temp_dir(scratch.clone())
            .cleanup(true)
            .build();
        let output = dir.path().join("preview.gif");
        let request = PreviewRequest::new("/videos/clip.mp4", &output, 4, options).unwrap();

        let result = generator.generate(&request).unwrap();
        assert_eq!(result.file, output);
        assert!(scratch.is_dir());

        let kinds: Vec<StepKind> = spawner.get_received_calls().iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            [
                StepKind::Extract,
                StepKind::Extract,
                StepKind::Extract,
                StepKind::Extract,
                StepKind::Compose,
                StepKind::Cleanup
            ]
        );
    }

    #[test]
    fn test_generate_reports_failing_exit_code() {
        let dir = tempfile::tempdir().unwrap();
        let (generator, spawner, _) = generator();
        spawner.add_exit_error_expectation("convert", 7);
        let options = PreviewOptionsBuilder::new()
            .video_length(6000.0)
            .temp_dir(dir.path().to_path_buf())
            .build();
        let request =
            PreviewRequest::new("/videos/clip.mp4", dir.path().join("p.jpg"), 2, options).unwrap();

        let err = generator.generate(&request).unwrap_err();
        assert_eq!(err.exit_code(), Some(7));
    }

    #[test]
    fn test_unsupported_output_spawns_nothing() {
        let (generator, spawner, _) = generator();
        let options = PreviewOptionsBuilder::new().video_length(6000.0).build();
        let request =
            PreviewRequest::new("/videos/clip.mp4", "/out/p.webm", 2, options).unwrap();
        assert!(matches!(
            generator.generate(&request),
            Err(CoreError::InvalidArgument(_))
        ));
        assert!(spawner.get_received_calls().is_empty());
    }

    #[test]
    fn test_default_output_for_uncomposable_frames_format() {
        let (generator, _, _) = generator();
        let options = PreviewOptionsBuilder::new()
            .video_length(6000.0)
            .frames_format("bmp")
            .build();
        let request = PreviewRequest::new("/videos/clip.mp4", "", 2, options).unwrap();

        let plan = generator.plan(&request).unwrap();
        assert_eq!(plan.pipeline.output, PathBuf::from("/videos/clip_preview.jpg"));
        assert_eq!(plan.pipeline.frames[0], PathBuf::from("/videos/temp_abc123/0000000001.bmp"));
    }
}

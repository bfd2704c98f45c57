// vidstrip-core/tests/preview_api_tests.rs
//
// Public API behavior that needs no external tools: schedules, templating,
// workspace preparation and pipeline shape.

use std::path::{Path, PathBuf};

use tempfile::tempdir;
use vidstrip_core::processing::{build_pipeline, compute_schedule};
use vidstrip_core::{
    CoreError, MacroValues, PreviewOptionsBuilder, PreviewRequest, StepKind, apply_macros,
    ensure_scratch_dir,
};

#[test]
fn test_schedule_examples() {
    let offsets: Vec<f64> = compute_schedule(10000.0, 5)
        .unwrap()
        .iter()
        .map(|t| t.offset_ms)
        .collect();
    assert_eq!(offsets, [2000.0, 4000.0, 6000.0, 8000.0, 10000.0]);

    let single = compute_schedule(9000.0, 1).unwrap();
    assert_eq!(single.len(), 1);
    assert_eq!(single[0].offset_ms, 4500.0);
    assert_eq!(single[0].wall_clock(), "00:00:04");
}

#[test]
fn test_schedule_is_strictly_increasing() {
    for (duration, count) in [(1234.0, 7), (3_600_000.0, 24), (999.9, 3), (50.0, 50)] {
        let schedule = compute_schedule(duration, count).unwrap();
        let step = (duration / f64::from(count)).floor();
        assert_eq!(schedule.len(), count as usize);
        for (i, ts) in schedule.iter().enumerate() {
            assert_eq!(ts.ordinal as usize, i + 1);
            assert_eq!(ts.offset_ms, step * (i as f64 + 1.0));
        }
        assert!(schedule.windows(2).all(|w| w[0].offset_ms < w[1].offset_ms));
    }
}

#[test]
fn test_schedule_rejects_bad_input() {
    assert!(matches!(compute_schedule(1000.0, 0), Err(CoreError::InvalidArgument(_))));
    assert!(matches!(compute_schedule(0.0, 3), Err(CoreError::InvalidArgument(_))));
    assert!(matches!(compute_schedule(f64::NAN, 3), Err(CoreError::InvalidArgument(_))));
    assert!(matches!(compute_schedule(2.0, 3), Err(CoreError::InvalidArgument(_))));
}

#[test]
fn test_apply_macros_example() {
    let values = MacroValues {
        frames: 5,
        duration_ms: 9000.0,
        direction: "-append".to_string(),
        resize: String::new(),
    };
    assert_eq!(apply_macros("out_{{frames}}_{{duration}}.jpg", &values), "out_5_9000.jpg");
    assert_eq!(apply_macros("plain.jpg", &values), "plain.jpg");
    assert_eq!(
        apply_macros("{{frames}}-{{ frames }}-{{unknown}}-{{Frames}}", &values),
        "5-5-{{unknown}}-{{Frames}}"
    );
}

#[test]
fn test_ensure_scratch_dir_is_idempotent() -> Result<(), Box<dyn std::error::Error>> {
    let root = tempdir()?;
    let scratch = root.path().join("nested").join("temp_abc");

    ensure_scratch_dir(&scratch)?;
    ensure_scratch_dir(&scratch)?;
    assert!(scratch.is_dir());
    Ok(())
}

#[test]
fn test_ensure_scratch_dir_rejects_file() -> Result<(), Box<dyn std::error::Error>> {
    let root = tempdir()?;
    let file = root.path().join("occupied");
    std::fs::write(&file, b"x")?;

    match ensure_scratch_dir(&file) {
        Err(CoreError::ScratchDir { path, .. }) => assert_eq!(path, file),
        other => panic!("expected ScratchDir error, got {other:?}"),
    }
    Ok(())
}

#[test]
fn test_cleanup_is_last_step() {
    let options = PreviewOptionsBuilder::new().cleanup(true).build();
    let request = PreviewRequest::new("/v/a b.mkv", "/v/out.png", 4, options).unwrap();
    let schedule = compute_schedule(60_000.0, 4).unwrap();
    let pipeline =
        build_pipeline(&request, &schedule, Path::new("/v/out.png"), Path::new("/v/tmp")).unwrap();

    let kinds: Vec<StepKind> = pipeline.steps.iter().map(|s| s.kind).collect();
    assert_eq!(kinds.iter().filter(|k| **k == StepKind::Extract).count(), 4);
    assert_eq!(kinds[4], StepKind::Compose);
    assert_eq!(kinds[5], StepKind::Cleanup);

    // Paths with spaces stay single arguments.
    assert!(pipeline.steps[0].has_arg("/v/a b.mkv"));
    assert_eq!(pipeline.frames[3], PathBuf::from("/v/tmp/0000000004.jpg"));
}

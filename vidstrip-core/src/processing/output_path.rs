//! Output path templating.
//!
//! Output paths may contain `{{frames}}`, `{{duration}}`, `{{direction}}` and
//! `{{resize}}` placeholders (whitespace inside the braces is allowed, key
//! names are case-sensitive). Only these four keys are ever rendered; any
//! other `{{...}}` token is left in the path as written.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::{NoExpand, Regex};

use crate::config::DEFAULT_FRAMES_FORMAT;
use crate::processing::pipeline::OutputKind;
use crate::temp_files::parent_dir;

/// Values substituted into an output path template.
#[derive(Debug, Clone, PartialEq)]
pub struct MacroValues {
    pub frames: u32,
    pub duration_ms: f64,
    /// Composition flag, e.g. "-append"
    pub direction: String,
    /// Scale expression, e.g. "scale=320:-1", or empty
    pub resize: String,
}

fn placeholder(key: &str) -> Regex {
    Regex::new(&format!(r"\{{\{{\s*{key}\s*\}}\}}")).expect("placeholder pattern is valid")
}

static FRAMES: LazyLock<Regex> = LazyLock::new(|| placeholder("frames"));
static DURATION: LazyLock<Regex> = LazyLock::new(|| placeholder("duration"));
static DIRECTION: LazyLock<Regex> = LazyLock::new(|| placeholder("direction"));
static RESIZE: LazyLock<Regex> = LazyLock::new(|| placeholder("resize"));

/// Replaces every recognized placeholder in `template`.
#[must_use]
pub fn apply_macros(template: &str, values: &MacroValues) -> String {
    let substitutions: [(&Regex, String); 4] = [
        (&FRAMES, values.frames.to_string()),
        (&DURATION, values.duration_ms.to_string()),
        (&DIRECTION, values.direction.clone()),
        (&RESIZE, values.resize.clone()),
    ];

    let mut rendered = template.to_string();
    for (pattern, value) in substitutions {
        if pattern.is_match(&rendered) {
            rendered = pattern.replace_all(&rendered, NoExpand(&value)).into_owned();
        }
    }
    rendered
}

/// Renders the placeholders in each path component. Components that are not
/// valid UTF-8 are kept as they are.
#[must_use]
pub fn render_template_path(template: &Path, values: &MacroValues) -> PathBuf {
    template
        .iter()
        .map(|part| match part.to_str() {
            Some(text) => OsString::from(apply_macros(text, values)),
            None => part.to_os_string(),
        })
        .collect()
}

/// Default output location: `<input dir>/<input stem>_preview.<extension>`.
///
/// The extension is the frames format when it can be composed, otherwise
/// `jpg`.
#[must_use]
pub fn default_output_path(input: &Path, frames_format: &str) -> PathBuf {
    let extension = if OutputKind::from_extension(frames_format).is_ok() {
        frames_format
    } else {
        log::debug!(
            "Frames format '{frames_format}' cannot be composed, defaulting output to {DEFAULT_FRAMES_FORMAT}"
        );
        DEFAULT_FRAMES_FORMAT
    };

    let mut name = input
        .file_stem()
        .map_or_else(|| OsString::from("video"), |s| s.to_os_string());
    name.push(format!("_preview.{extension}"));
    parent_dir(input).join(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values() -> MacroValues {
        MacroValues {
            frames: 5,
            duration_ms: 9000.0,
            direction: "-append".to_string(),
            resize: "scale=320:-1".to_string(),
        }
    }

    #[test]
    fn test_frames_and_duration() {
        assert_eq!(apply_macros("out_{{frames}}_{{duration}}.jpg", &values()), "out_5_9000.jpg");
    }

    #[test]
    fn test_whitespace_inside_braces() {
        assert_eq!(apply_macros("out_{{ frames }}_{{  duration}}.jpg", &values()), "out_5_9000.jpg");
    }

    #[test]
    fn test_every_occurrence_replaced() {
        assert_eq!(
            apply_macros("{{frames}}/{{frames}}x{{direction}}{{resize}}.png", &values()),
            "5/5x-appendscale=320:-1.png"
        );
    }

    #[test]
    fn test_fractional_duration() {
        let mut v = values();
        v.duration_ms = 4500.5;
        assert_eq!(apply_macros("{{duration}}.gif", &v), "4500.5.gif");
    }

    #[test]
    fn test_no_placeholders_unchanged() {
        let template = "/data/previews/clip_preview.jpg";
        assert_eq!(apply_macros(template, &values()), template);
    }

    #[test]
    fn test_unknown_and_miscased_keys_left_verbatim() {
        assert_eq!(
            apply_macros("{{width}}_{{Frames}}_{{frames}}.jpg", &values()),
            "{{width}}_{{Frames}}_5.jpg"
        );
    }

    #[test]
    fn test_replacement_is_literal() {
        let mut v = values();
        v.direction = "$1".to_string();
        assert_eq!(apply_macros("{{direction}}.jpg", &v), "$1.jpg");
    }

    #[test]
    fn test_empty_resize() {
        let mut v = values();
        v.resize = String::new();
        assert_eq!(apply_macros("a{{resize}}b.jpg", &v), "ab.jpg");
    }

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("/videos/holiday.mp4"), "jpg"),
            PathBuf::from("/videos/holiday_preview.jpg")
        );
        assert_eq!(
            default_output_path(Path::new("clip.mkv"), "png"),
            PathBuf::from("./clip_preview.png")
        );
    }

    #[test]
    fn test_default_output_falls_back_to_jpg() {
        assert_eq!(
            default_output_path(Path::new("/videos/holiday.mp4"), "bmp"),
            PathBuf::from("/videos/holiday_preview.jpg")
        );
    }

    #[test]
    fn test_render_template_path() {
        assert_eq!(
            render_template_path(Path::new("/out/{{frames}}/p_{{ duration }}.jpg"), &values()),
            PathBuf::from("/out/5/p_9000.jpg")
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_paths_survive() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = Path::new(OsStr::from_bytes(b"/out/\xff"));
        assert_eq!(
            render_template_path(&dir.join("p_{{frames}}.jpg"), &values()),
            dir.join("p_5.jpg")
        );

        let input = Path::new(OsStr::from_bytes(b"/videos/clip\xff.mp4"));
        assert_eq!(
            default_output_path(input, "png").as_os_str().as_bytes(),
            b"/videos/clip\xff_preview.png"
        );
    }
}

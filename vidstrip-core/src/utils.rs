//! Utility functions for formatting and file naming.
//!
//! This module provides general-purpose helpers used throughout the
//! vidstrip-core library: wall-clock formatting for seek positions and the
//! naming scheme for extracted frame files.

use std::path::Path;

/// Width of the zero-padded ordinal in frame file names. Fixed so that lexical
/// order of the file names equals temporal order.
pub const FRAME_NAME_WIDTH: usize = 10;

/// Formats milliseconds as HH:MM:SS, discarding sub-second precision
/// (e.g., 3_725_500.0 -> "01:02:05"). Hours are not wrapped at 24.
/// Returns "??:??:??" for invalid inputs.
#[must_use]
pub fn format_duration(millis: f64) -> String {
    if millis < 0.0 || !millis.is_finite() {
        return "??:??:??".to_string();
    }

    let total_seconds = (millis / 1000.0) as u64;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}

/// File name for the frame with the given 1-based ordinal.
#[must_use]
pub fn frame_file_name(ordinal: u32, extension: &str) -> String {
    format!("{ordinal:0width$}.{extension}", width = FRAME_NAME_WIDTH)
}

/// Lower-cased extension of a path, or an empty string when it has none.
#[must_use]
pub fn extension_lowercase(path: &Path) -> String {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0.0), "00:00:00");
        assert_eq!(format_duration(2000.0), "00:00:02");
        assert_eq!(format_duration(4500.0), "00:00:04");
        assert_eq!(format_duration(3_725_999.0), "01:02:05");
        assert_eq!(format_duration(90_000_000.0), "25:00:00");
        assert_eq!(format_duration(-1.0), "??:??:??");
        assert_eq!(format_duration(f64::INFINITY), "??:??:??");
    }

    #[test]
    fn test_frame_file_name_sorts_lexically() {
        assert_eq!(frame_file_name(1, "jpg"), "0000000001.jpg");
        assert_eq!(frame_file_name(42, "png"), "0000000042.png");

        let mut names: Vec<String> = [10, 2, 1, 100].iter().map(|i| frame_file_name(*i, "jpg")).collect();
        names.sort();
        assert_eq!(names[0], "0000000001.jpg");
        assert_eq!(names[3], "0000000100.jpg");
    }

    #[test]
    fn test_extension_lowercase() {
        assert_eq!(extension_lowercase(Path::new("out/preview.GIF")), "gif");
        assert_eq!(extension_lowercase(Path::new("out/preview")), "");
    }
}

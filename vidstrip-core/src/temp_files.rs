//! Scratch directory management.
//!
//! Extracted frames are written to a scratch directory before composition.
//! By default that directory sits next to the input file and carries a random
//! suffix, so concurrent previews of the same input never share frames. The
//! suffix comes from an `IdGenerator` so tests can pin it.

use crate::error::{CoreError, CoreResult};
use std::io;
use std::path::{Path, PathBuf};

/// Length of the random scratch directory suffix.
pub const SCRATCH_ID_LEN: usize = 12;

/// Source of unique identifiers for scratch directory names.
pub trait IdGenerator {
    fn next_id(&self) -> String;
}

/// Random alphanumeric identifiers.
#[derive(Debug, Clone, Default)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn next_id(&self) -> String {
        use rand::distributions::Alphanumeric;
        use rand::{Rng, thread_rng};

        thread_rng()
            .sample_iter(&Alphanumeric)
            .take(SCRATCH_ID_LEN)
            .map(char::from)
            .collect::<String>()
            .to_ascii_lowercase()
    }
}

/// Always returns the same identifier. Useful for deterministic paths.
#[derive(Debug, Clone)]
pub struct FixedIdGenerator(pub String);

impl IdGenerator for FixedIdGenerator {
    fn next_id(&self) -> String {
        self.0.clone()
    }
}

/// Returns `<input dir>/temp_<id>`. Does not create the directory.
pub fn default_scratch_dir(input: &Path, ids: &dyn IdGenerator) -> PathBuf {
    parent_dir(input).join(format!("temp_{}", ids.next_id()))
}

/// Creates the scratch directory (and parents). An existing directory counts
/// as success; anything else is reported with the offending path.
pub fn ensure_scratch_dir(path: &Path) -> CoreResult<()> {
    match std::fs::create_dir_all(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists && path.is_dir() => Ok(()),
        Err(e) => Err(CoreError::ScratchDir {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Directory containing `path`, or "." for bare file names.
pub(crate) fn parent_dir(path: &Path) -> PathBuf {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_scratch_dir_beside_input() {
        let ids = FixedIdGenerator("abc123".to_string());
        let dir = default_scratch_dir(Path::new("/videos/clip.mp4"), &ids);
        assert_eq!(dir, PathBuf::from("/videos/temp_abc123"));

        let dir = default_scratch_dir(Path::new("clip.mp4"), &ids);
        assert_eq!(dir, PathBuf::from("./temp_abc123"));
    }

    #[test]
    fn test_random_ids_are_distinct() {
        let ids = RandomIdGenerator;
        let a = ids.next_id();
        let b = ids.next_id();
        assert_eq!(a.len(), SCRATCH_ID_LEN);
        assert_ne!(a, b);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_ensure_scratch_dir_is_idempotent() {
        let root = tempdir().unwrap();
        let scratch = root.path().join("nested").join("temp_x");

        ensure_scratch_dir(&scratch).unwrap();
        ensure_scratch_dir(&scratch).unwrap();
        assert!(scratch.is_dir());
    }

    #[test]
    fn test_ensure_scratch_dir_reports_file_conflict() {
        let root = tempdir().unwrap();
        let blocker = root.path().join("occupied");
        std::fs::write(&blocker, b"not a directory").unwrap();

        let err = ensure_scratch_dir(&blocker.join("frames")).unwrap_err();
        match err {
            CoreError::ScratchDir { path, .. } => assert_eq!(path, blocker.join("frames")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}

// LogTally - platform/fs.rs
//
// Source path validation and opening.
// The core loader only ever sees an already-open reader.

use crate::util::error::LoadError;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Check that `path` exists and is a regular file.
///
/// Symlinks are followed. Fails with `SourceNotFound`, `PermissionDenied`
/// or `NotAFile`.
pub fn validate_source_path(path: &Path) -> Result<(), LoadError> {
    let metadata = std::fs::metadata(path).map_err(|e| LoadError::from_io(path, e))?;
    if !metadata.is_file() {
        return Err(LoadError::NotAFile {
            path: path.to_path_buf(),
        });
    }
    tracing::debug!(path = %path.display(), size = metadata.len(), "Source validated");
    Ok(())
}

/// Open a validated source for buffered sequential reading.
pub fn open_source(path: &Path) -> Result<BufReader<File>, LoadError> {
    let file = File::open(path).map_err(|e| LoadError::from_io(path, e))?;
    Ok(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_existing_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(validate_source_path(file.path()).is_ok());
        assert!(open_source(file.path()).is_ok());
    }

    #[test]
    fn test_validate_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.log");
        let result = validate_source_path(&missing);
        assert!(
            matches!(result, Err(LoadError::SourceNotFound { .. })),
            "expected SourceNotFound, got {result:?}"
        );
        assert!(matches!(
            open_source(&missing),
            Err(LoadError::SourceNotFound { .. })
        ));
    }

    #[test]
    fn test_validate_directory_is_not_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = validate_source_path(dir.path());
        assert!(matches!(result, Err(LoadError::NotAFile { .. })));
    }
}

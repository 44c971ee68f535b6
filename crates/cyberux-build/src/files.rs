//! File helpers shared by the build stages.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::builder::BuildError;

/// Read a file that may legitimately be absent.
///
/// Returns `Ok(None)` when the file does not exist. Any other I/O failure is an error.
pub fn read_optional(path: &Path) -> Result<Option<String>, BuildError> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(BuildError::read(path, e)),
    }
}

/// Read a file the build cannot proceed without.
pub fn read_required(path: &Path) -> Result<String, BuildError> {
    fs::read_to_string(path).map_err(|e| BuildError::read(path, e))
}

/// Write an output file, creating its parent directory first.
pub fn write_output(path: &Path, content: &str) -> Result<(), BuildError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| BuildError::write(parent, e))?;
    }

    fs::write(path, content).map_err(|e| BuildError::write(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_optional_file_is_none() {
        let temp = tempdir().unwrap();

        let result = read_optional(&temp.path().join("absent.css")).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn missing_required_file_is_an_error() {
        let temp = tempdir().unwrap();

        let result = read_required(&temp.path().join("absent.html"));

        assert!(matches!(result, Err(BuildError::ReadError { .. })));
    }

    #[test]
    fn write_creates_parent_directories() {
        let temp = tempdir().unwrap();
        let target = temp.path().join("build").join("index.html");

        write_output(&target, "<html></html>").unwrap();

        assert_eq!(fs::read_to_string(target).unwrap(), "<html></html>");
    }
}

// file: src/utils/validation.rs
// description: input validation utilities and helpers
// reference: input validation patterns

use crate::error::{ManifestError, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub struct Validator;

impl Validator {
    pub fn validate_file_path(path: &Path) -> Result<()> {
        let canonical = fs::canonicalize(path).map_err(|e| {
            ManifestError::Validation(format!(
                "Cannot canonicalize path {}: {}",
                path.display(),
                e
            ))
        })?;

        if !canonical.is_file() {
            return Err(ManifestError::Validation(format!(
                "Path is not a file: {}",
                canonical.display()
            )));
        }

        Ok(())
    }

    pub fn validate_directory(path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(ManifestError::Validation(format!(
                "Directory does not exist: {}",
                path.display()
            )));
        }

        if !path.is_dir() {
            return Err(ManifestError::Validation(format!(
                "Path is not a directory: {}",
                path.display()
            )));
        }

        Ok(())
    }

    /// Rejects an output path that points at an existing directory.
    pub fn validate_output_path(path: &Path) -> Result<()> {
        if path.is_dir() {
            return Err(ManifestError::Validation(format!(
                "Output path is a directory: {}",
                path.display()
            )));
        }
        Ok(())
    }

    pub fn validate_paths_given(paths: &[PathBuf]) -> Result<()> {
        if paths.is_empty() {
            return Err(ManifestError::Validation(
                "At least one manifest path is required".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_validate_file_path() {
        let temp = TempDir::new().unwrap();
        let file_path = temp.path().join("requirements.txt");
        fs::write(&file_path, "numpy").unwrap();

        assert!(Validator::validate_file_path(&file_path).is_ok());
        assert!(Validator::validate_file_path(temp.path()).is_err());
        assert!(Validator::validate_file_path(Path::new("/nonexistent")).is_err());
    }

    #[test]
    fn test_validate_directory() {
        let temp = TempDir::new().unwrap();
        assert!(Validator::validate_directory(temp.path()).is_ok());
        assert!(Validator::validate_directory(Path::new("/nonexistent")).is_err());
    }

    #[test]
    fn test_validate_output_path() {
        let temp = TempDir::new().unwrap();
        assert!(Validator::validate_output_path(temp.path()).is_err());
        assert!(Validator::validate_output_path(&temp.path().join("report.json")).is_ok());
    }

    #[test]
    fn test_validate_paths_given() {
        let empty: Vec<PathBuf> = vec![];
        assert!(Validator::validate_paths_given(&empty).is_err());
        assert!(Validator::validate_paths_given(&[PathBuf::from("requirements.txt")]).is_ok());
    }
}

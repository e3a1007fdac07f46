use crate::error::{Result, UpnotesError};
use std::path::{Path, PathBuf};

/// Path checks for the project directory and for package names under the vendor tree.
pub struct PathValidator;

impl PathValidator {
    /// Canonicalises the project directory given on the command line.
    pub fn validate_project_path(path: impl AsRef<Path>) -> Result<PathBuf> {
        let path = path.as_ref();

        let canonical = path.canonicalize().map_err(|e| {
            UpnotesError::PathValidation(format!("Invalid path '{}': {e}", path.display()))
        })?;

        if !canonical.is_dir() {
            return Err(UpnotesError::PathValidation(format!(
                "Path '{}' is not a directory",
                canonical.display()
            )));
        }

        Ok(canonical)
    }

    /// Checks that a package name has the `vendor/name` shape with no
    /// segment able to escape the vendor directory.
    pub fn validate_package_name(package: &str) -> Result<()> {
        let segments: Vec<&str> = package.split('/').collect();
        let well_formed = segments.len() == 2
            && segments
                .iter()
                .all(|s| !s.is_empty() && *s != "." && *s != ".." && !s.contains('\\'));

        if well_formed {
            Ok(())
        } else {
            Err(UpnotesError::PathValidation(format!(
                "Invalid package name '{package}', expected vendor/name"
            )))
        }
    }
}

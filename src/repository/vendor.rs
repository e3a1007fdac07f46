use crate::repository::NotesSource;
use crate::utils::path_validator::PathValidator;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads `<vendor_dir>/<package>/<notes_file>` from an installed project.
#[derive(Debug, Clone)]
pub struct VendorNotesSource {
    vendor_dir: PathBuf,
    notes_file: String,
}

impl VendorNotesSource {
    pub fn new<P: AsRef<Path>>(vendor_dir: P, notes_file: impl Into<String>) -> Self {
        Self {
            vendor_dir: vendor_dir.as_ref().to_path_buf(),
            notes_file: notes_file.into(),
        }
    }

    pub fn notes_path(&self, package: &str) -> PathBuf {
        self.vendor_dir.join(package).join(&self.notes_file)
    }
}

impl NotesSource for VendorNotesSource {
    fn read_notes(&self, package: &str) -> Option<String> {
        if let Err(e) = PathValidator::validate_package_name(package) {
            debug!("Not reading notes: {}", e);
            return None;
        }

        let path = self.notes_path(package);
        if !path.is_file() {
            debug!("No notes file at {}", path.display());
            return None;
        }

        match fs::read_to_string(&path) {
            Ok(text) => Some(text),
            Err(e) => {
                debug!("Failed to read {}: {}", path.display(), e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn reads_notes_of_installed_package() {
        let dir = tempdir().unwrap();
        let package_dir = dir.path().join("denisok94/helper");
        fs::create_dir_all(&package_dir).unwrap();
        fs::write(package_dir.join("UPGRADE.md"), "Upgrade from Helper 1.0\n").unwrap();

        let source = VendorNotesSource::new(dir.path(), "UPGRADE.md");
        assert_eq!(
            source.read_notes("denisok94/helper").as_deref(),
            Some("Upgrade from Helper 1.0\n")
        );
    }

    #[test]
    fn missing_notes_are_none() {
        let dir = tempdir().unwrap();
        let source = VendorNotesSource::new(dir.path(), "UPGRADE.md");
        assert!(source.read_notes("denisok94/helper").is_none());
    }

    #[test]
    fn directory_in_place_of_notes_is_none() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("denisok94/helper/UPGRADE.md")).unwrap();
        let source = VendorNotesSource::new(dir.path(), "UPGRADE.md");
        assert!(source.read_notes("denisok94/helper").is_none());
    }

    #[test]
    #[cfg(unix)]
    fn symlinked_package_dir_is_followed() {
        let dir = tempdir().unwrap();
        let package_dir = dir.path().join("packages/helper");
        fs::create_dir_all(&package_dir).unwrap();
        fs::write(package_dir.join("UPGRADE.md"), "Upgrade from Helper 2.0\n").unwrap();

        let vendor = dir.path().join("vendor");
        fs::create_dir_all(vendor.join("denisok94")).unwrap();
        std::os::unix::fs::symlink("../../packages/helper", vendor.join("denisok94/helper"))
            .unwrap();

        let source = VendorNotesSource::new(&vendor, "UPGRADE.md");
        assert_eq!(
            source.read_notes("denisok94/helper").as_deref(),
            Some("Upgrade from Helper 2.0\n")
        );
    }

    #[test]
    fn traversal_in_package_name_is_none() {
        let dir = tempdir().unwrap();
        let vendor = dir.path().join("vendor");
        fs::create_dir_all(&vendor).unwrap();
        fs::write(dir.path().join("UPGRADE.md"), "secret").unwrap();
        let source = VendorNotesSource::new(&vendor, "UPGRADE.md");
        assert!(source.read_notes("../x").is_none());
    }
}

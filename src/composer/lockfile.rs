use crate::composer::operation::{PackageVersion, UpdateOperation};
use crate::composer::version::normalize;
use crate::error::{Result, UpnotesError};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComposerLock {
    #[serde(default)]
    pub packages: Vec<LockedPackage>,
    #[serde(default, rename = "packages-dev")]
    pub packages_dev: Vec<LockedPackage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LockedPackage {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub version_normalized: Option<String>,
    #[serde(default)]
    pub source: Option<PackageReference>,
    #[serde(default)]
    pub dist: Option<PackageReference>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PackageReference {
    #[serde(default)]
    pub reference: Option<String>,
}

impl LockedPackage {
    pub fn normalized_version(&self) -> String {
        self.version_normalized
            .clone()
            .unwrap_or_else(|| normalize(&self.version))
    }

    fn reference(&self) -> Option<&str> {
        self.source
            .as_ref()
            .and_then(|s| s.reference.as_deref())
            .or_else(|| self.dist.as_ref().and_then(|d| d.reference.as_deref()))
    }

    fn package_version(&self) -> PackageVersion {
        PackageVersion::new(self.normalized_version(), self.version.clone())
    }
}

impl ComposerLock {
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            UpnotesError::LockFile(format!("Failed to read '{}': {}", path.display(), e))
        })?;
        Self::parse(&content).map_err(|e| {
            UpnotesError::LockFile(format!("Failed to parse '{}': {}", path.display(), e))
        })
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// All locked packages, production first.
    pub fn all_packages(&self) -> impl Iterator<Item = &LockedPackage> {
        self.packages.iter().chain(self.packages_dev.iter())
    }
}

/// Derive the update operations between two lock snapshots.
///
/// Only packages present in both snapshots count; installs and removals are
/// not updates. A package whose version or source reference changed yields
/// one operation, in the order of the newer lock.
pub fn diff_locks(old: &ComposerLock, new: &ComposerLock) -> Vec<UpdateOperation> {
    let previous: HashMap<&str, &LockedPackage> =
        old.all_packages().map(|p| (p.name.as_str(), p)).collect();

    new.all_packages()
        .filter_map(|current| {
            let before = previous.get(current.name.as_str())?;
            let changed = before.normalized_version() != current.normalized_version()
                || before.version != current.version
                || before.reference() != current.reference();
            if !changed {
                return None;
            }
            Some(UpdateOperation::new(
                current.name.clone(),
                before.package_version(),
                current.package_version(),
            ))
        })
        .collect()
}

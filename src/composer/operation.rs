use crate::composer::version::normalize;

/// One side of an update operation: Composer's normalised version plus the
/// version string a user would recognise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageVersion {
    pub version: String,
    pub pretty: String,
}

impl PackageVersion {
    pub fn new(version: impl Into<String>, pretty: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            pretty: pretty.into(),
        }
    }

    /// Build from a human version, deriving the normalised form.
    pub fn from_pretty(pretty: &str) -> Self {
        Self::new(normalize(pretty), pretty.trim())
    }
}

/// A single package version transition observed during an update pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateOperation {
    pub package: String,
    pub initial: PackageVersion,
    pub target: PackageVersion,
}

impl UpdateOperation {
    pub fn new(package: impl Into<String>, initial: PackageVersion, target: PackageVersion) -> Self {
        Self {
            package: package.into(),
            initial,
            target,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_pretty_derives_normalized_version() {
        let version = PackageVersion::from_pretty(" v2.1 ");
        assert_eq!(version.version, "2.1.0.0");
        assert_eq!(version.pretty, "v2.1");
    }
}

use crate::composer::PackageVersion;
use crate::repository::{DefaultVersionStrategy, VersionStrategy};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Upgrade,
    Downgrade,
}

impl Direction {
    /// Past-tense verb used in report intros.
    pub fn verb(self) -> &'static str {
        match self {
            Direction::Upgrade => "upgraded",
            Direction::Downgrade => "downgraded",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Direction::Upgrade => "up",
            Direction::Downgrade => "down",
        };
        f.write_str(label)
    }
}

/// Before and after versions of one package in the current update pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedUpdate {
    pub from_version: String,
    pub from_pretty: String,
    pub to_version: String,
    pub to_pretty: String,
    pub direction: Direction,
}

impl TrackedUpdate {
    /// Dev-version churn such as `dev-master` to `dev-master` is not worth reporting.
    pub fn is_noop(&self) -> bool {
        self.from_pretty == self.to_pretty
    }
}

/// Records the package updates observed during one update pass.
pub struct UpdateTracker {
    updates: HashMap<String, TrackedUpdate>,
    strategy: Arc<dyn VersionStrategy>,
}

impl Default for UpdateTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl UpdateTracker {
    pub fn new() -> Self {
        Self::with_strategy(DefaultVersionStrategy::shared())
    }

    pub fn with_strategy(strategy: Arc<dyn VersionStrategy>) -> Self {
        Self {
            updates: HashMap::new(),
            strategy,
        }
    }

    /// Store (or overwrite) the update of a package.
    pub fn record(&mut self, package: &str, from: &PackageVersion, to: &PackageVersion) {
        let direction = if self.strategy.is_upgrade(&from.version, &to.version) {
            Direction::Upgrade
        } else {
            Direction::Downgrade
        };

        debug!(
            "Tracked {} {} -> {} ({})",
            package, from.pretty, to.pretty, direction
        );

        self.updates.insert(
            package.to_string(),
            TrackedUpdate {
                from_version: from.version.clone(),
                from_pretty: from.pretty.clone(),
                to_version: to.version.clone(),
                to_pretty: to.pretty.clone(),
                direction,
            },
        );
    }

    pub fn get(&self, package: &str) -> Option<&TrackedUpdate> {
        self.updates.get(package)
    }

    /// Names of all tracked packages, sorted.
    pub fn package_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.updates.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn version(normalized: &str, pretty: &str) -> PackageVersion {
        PackageVersion::new(normalized, pretty)
    }

    #[test]
    fn records_upgrade() {
        let mut tracker = UpdateTracker::new();
        tracker.record(
            "denisok94/helper",
            &version("1.0.0.0", "1.0.0"),
            &version("2.0.0.0", "2.0.0"),
        );

        let update = tracker.get("denisok94/helper").unwrap();
        assert_eq!(update.direction, Direction::Upgrade);
        assert_eq!(update.from_pretty, "1.0.0");
        assert_eq!(update.to_version, "2.0.0.0");
    }

    #[test]
    fn records_downgrade() {
        let mut tracker = UpdateTracker::new();
        tracker.record(
            "denisok94/helper",
            &version("2.1.0.0", "2.1.0"),
            &version("2.0.9.0", "2.0.9"),
        );
        assert_eq!(
            tracker.get("denisok94/helper").unwrap().direction,
            Direction::Downgrade
        );
    }

    #[test]
    fn equal_versions_count_as_downgrade() {
        let mut tracker = UpdateTracker::new();
        tracker.record(
            "denisok94/helper",
            &version("dev-master", "dev-master"),
            &version("dev-master", "dev-master"),
        );
        let update = tracker.get("denisok94/helper").unwrap();
        assert_eq!(update.direction, Direction::Downgrade);
        assert!(update.is_noop());
    }

    #[test]
    fn later_record_overwrites() {
        let mut tracker = UpdateTracker::new();
        tracker.record("a/b", &version("1.0.0.0", "1.0"), &version("2.0.0.0", "2.0"));
        tracker.record("a/b", &version("2.0.0.0", "2.0"), &version("1.5.0.0", "1.5"));

        assert_eq!(tracker.package_names().len(), 1);
        let update = tracker.get("a/b").unwrap();
        assert_eq!(update.to_pretty, "1.5");
        assert_eq!(update.direction, Direction::Downgrade);
    }

    #[test]
    fn absent_package_is_none() {
        let tracker = UpdateTracker::new();
        assert!(tracker.get("a/b").is_none());
        assert!(tracker.package_names().is_empty());
    }

    #[test]
    fn package_names_are_sorted() {
        let mut tracker = UpdateTracker::new();
        let from = version("1.0.0.0", "1.0");
        let to = version("2.0.0.0", "2.0");
        tracker.record("z/last", &from, &to);
        tracker.record("a/first", &from, &to);
        assert_eq!(tracker.package_names(), vec!["a/first", "z/last"]);
    }
}

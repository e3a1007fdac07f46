use crate::agents::reporter::Reporter;
use crate::agents::update_tracker::UpdateTracker;
use crate::composer::UpdateOperation;
use crate::output::OutputSink;
use crate::repository::NotesSource;
use std::collections::HashSet;
use tracing::debug;

/// One update pass: operations are observed while the update runs, reports
/// are produced once it has finished.
pub struct UpdateSession {
    tracker: UpdateTracker,
    watched: Vec<String>,
}

impl UpdateSession {
    /// `watched` lists the packages to report on, in report order; repeated
    /// names are reported once. An empty list reports every tracked package.
    pub fn new(watched: Vec<String>) -> Self {
        Self {
            tracker: UpdateTracker::new(),
            watched,
        }
    }

    pub fn observe(&mut self, operation: &UpdateOperation) {
        self.tracker
            .record(&operation.package, &operation.initial, &operation.target);
    }

    /// Emit a report for every watched package that has one; returns how many were emitted.
    pub fn finish(
        &self,
        reporter: &Reporter,
        source: &dyn NotesSource,
        sink: &mut dyn OutputSink,
    ) -> usize {
        let packages: Vec<&str> = if self.watched.is_empty() {
            self.tracker.package_names()
        } else {
            let mut seen = HashSet::new();
            self.watched
                .iter()
                .map(String::as_str)
                .filter(|name| seen.insert(*name) && self.tracker.get(name).is_some())
                .collect()
        };

        let mut emitted = 0;
        for package in packages {
            match reporter.report(&self.tracker, source, package) {
                Some(lines) => {
                    sink.emit(package, &lines);
                    emitted += 1;
                }
                None => debug!("Nothing to report for {}", package),
            }
        }
        emitted
    }
}

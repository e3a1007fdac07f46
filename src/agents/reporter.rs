use crate::agents::notes_extractor::{NotesExtractor, UpgradeNotes};
use crate::agents::update_tracker::{Direction, TrackedUpdate, UpdateTracker};
use crate::composer::version::is_numeric_version;
use crate::config::NotesConfig;
use crate::error::Result;
use crate::output::ReportLine;
use crate::repository::NotesSource;
use tracing::{debug, info};

/// Display settings of the reporter.
#[derive(Debug, Clone)]
pub struct ReportSettings {
    pub link_base: String,
    pub notes_file: String,
    pub default_branch: String,
    pub max_note_lines: usize,
}

impl ReportSettings {
    pub fn from_config(config: &NotesConfig) -> Self {
        Self {
            link_base: config.link_base.trim_end_matches('/').to_string(),
            notes_file: config.notes_file.clone(),
            default_branch: config.default_branch.clone(),
            max_note_lines: config.max_note_lines,
        }
    }
}

/// Turns a tracked update into the lines shown to the developer.
pub struct Reporter {
    extractor: NotesExtractor,
    settings: ReportSettings,
}

impl Reporter {
    pub fn new(extractor: NotesExtractor, settings: ReportSettings) -> Self {
        Self {
            extractor,
            settings,
        }
    }

    pub fn from_config(config: &NotesConfig) -> Result<Self> {
        let extractor = NotesExtractor::new(&config.product)?;
        Ok(Self::new(extractor, ReportSettings::from_config(config)))
    }

    /// Report for one package, or `None` when there is nothing worth showing.
    pub fn report(
        &self,
        tracker: &UpdateTracker,
        source: &dyn NotesSource,
        package: &str,
    ) -> Option<Vec<ReportLine>> {
        let update = tracker.get(package)?;

        if update.is_noop() {
            debug!("Skipping {}: {} to itself", package, update.from_pretty);
            return None;
        }

        let notes = self.find_notes(update, source, package);
        if notes.is_empty() {
            info!(
                "No upgrade notes of {} concern {}",
                package, update.from_pretty
            );
            return None;
        }

        Some(self.render(package, update, &notes))
    }

    /// Notes are only looked up for upgrades from a release version; dev
    /// versions give no anchor into the document.
    fn find_notes(
        &self,
        update: &TrackedUpdate,
        source: &dyn NotesSource,
        package: &str,
    ) -> UpgradeNotes {
        if update.direction != Direction::Upgrade || !is_numeric_version(&update.from_pretty) {
            debug!(
                "Not looking up notes of {} ({} -> {})",
                package, update.from_version, update.to_version
            );
            return UpgradeNotes::Unavailable;
        }

        match source.read_notes(package) {
            Some(document) => {
                let lines = self.extractor.extract(&document, &update.from_pretty);
                debug!("{} relevant note lines for {}", lines.len(), package);
                UpgradeNotes::Relevant(lines)
            }
            None => {
                debug!("Upgrade notes of {} are unavailable", package);
                UpgradeNotes::Unavailable
            }
        }
    }

    fn render(&self, package: &str, update: &TrackedUpdate, notes: &UpgradeNotes) -> Vec<ReportLine> {
        let mut lines = vec![
            ReportLine::heading(format!(
                "Seems you have {} {} from version {} to {}.",
                update.direction.verb(),
                package,
                update.from_pretty,
                update.to_pretty
            )),
            ReportLine::blank(),
            ReportLine::emphasis("Please check the upgrade notes for possible incompatible changes"),
            ReportLine::emphasis("and adjust your application code accordingly."),
        ];

        let note_lines = notes.lines();
        if !note_lines.is_empty() {
            lines.push(ReportLine::blank());
            if note_lines.len() > self.settings.max_note_lines {
                lines.push(ReportLine::warning(
                    "The relevant notes for your upgrade are too long to be displayed here.",
                ));
            } else {
                let end = note_lines
                    .iter()
                    .rposition(|l| !l.trim().is_empty())
                    .map_or(0, |i| i + 1);
                lines.extend(note_lines[..end].iter().map(ReportLine::plain));
            }
        }

        lines.push(ReportLine::blank());
        lines.push(ReportLine::plain(
            "You can find the upgrade notes for all versions online at:",
        ));
        lines.push(ReportLine::link(self.notes_url(package, &update.to_pretty)));
        lines
    }

    /// Link to the notes file at the target version, or at the default
    /// branch when the target is not a release.
    pub fn notes_url(&self, package: &str, to_pretty: &str) -> String {
        let git_ref = if is_numeric_version(to_pretty) {
            to_pretty
        } else {
            self.settings.default_branch.as_str()
        };
        let repo = package.rsplit('/').next().unwrap_or(package);
        format!(
            "{}/{}/blob/{}/{}",
            self.settings.link_base, repo, git_ref, self.settings.notes_file
        )
    }
}

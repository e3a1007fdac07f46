use crate::agents::{NotesExtractor, Reporter, UpdateSession};
use crate::composer::{ComposerLock, PackageVersion, UpdateOperation, diff_locks};
use crate::config::NotesConfig;
use crate::error::{Result, UpnotesError};
use crate::output::{OutputSink, TerminalSink};
use crate::repository::{NotesSource, VendorNotesSource};
use crate::utils::path_validator::PathValidator;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Everything a command needs to produce reports for one project.
struct ProjectContext {
    config: NotesConfig,
    reporter: Reporter,
    source: VendorNotesSource,
}

impl ProjectContext {
    fn load(project_path: &Path, config_path: Option<&Path>) -> Result<Self> {
        let config = NotesConfig::load(project_path, config_path)?;
        let reporter = Reporter::from_config(&config)?;
        let vendor_dir = config.resolve_vendor_dir(project_path)?;
        info!("Reading upgrade notes from {}", vendor_dir.display());
        let source = VendorNotesSource::new(vendor_dir, config.notes_file.clone());
        Ok(Self {
            config,
            reporter,
            source,
        })
    }
}

/// Replay an update pass from two lock file snapshots and report on it.
pub fn execute_diff(
    project_path: &Path,
    config_path: Option<&Path>,
    old_lock: &Path,
    new_lock: Option<&Path>,
) -> Result<()> {
    let project_path = PathValidator::validate_project_path(project_path)?;
    let context = ProjectContext::load(&project_path, config_path)?;

    let new_lock: PathBuf = new_lock
        .map(Path::to_path_buf)
        .unwrap_or_else(|| project_path.join("composer.lock"));

    let old = ComposerLock::from_path(old_lock)?;
    let new = ComposerLock::from_path(&new_lock)?;
    let operations = diff_locks(&old, &new);
    info!("{} package update(s) between lock files", operations.len());

    let emitted = run_session(
        &context.config,
        &context.reporter,
        &context.source,
        &operations,
        &mut TerminalSink,
    );

    if emitted == 0 {
        println!("{}", "No upgrade notes to show.".dimmed());
    }
    Ok(())
}

/// Report a single package update given on the command line.
pub fn execute_show(
    project_path: &Path,
    config_path: Option<&Path>,
    package: &str,
    from: &str,
    to: &str,
) -> Result<()> {
    PathValidator::validate_package_name(package)?;
    let project_path = PathValidator::validate_project_path(project_path)?;
    let context = ProjectContext::load(&project_path, config_path)?;

    let operation = UpdateOperation::new(
        package,
        PackageVersion::from_pretty(from),
        PackageVersion::from_pretty(to),
    );

    let mut session = UpdateSession::new(vec![package.to_string()]);
    session.observe(&operation);
    let emitted = session.finish(&context.reporter, &context.source, &mut TerminalSink);

    if emitted == 0 {
        println!(
            "{}",
            format!("No upgrade notes of {} to show.", package).dimmed()
        );
    }
    Ok(())
}

/// Print the relevant lines of a notes file without any wrapper.
pub fn execute_extract(
    project_path: &Path,
    config_path: Option<&Path>,
    file: &Path,
    from: &str,
) -> Result<()> {
    let config = NotesConfig::load(project_path, config_path)?;
    let extractor = NotesExtractor::new(&config.product)?;

    let document = fs::read_to_string(file).map_err(|e| {
        UpnotesError::PathValidation(format!("Failed to read '{}': {}", file.display(), e))
    })?;

    for line in extractor.extract(&document, from) {
        println!("{}", line);
    }
    Ok(())
}

/// Observe every operation, then report the watched packages.
fn run_session(
    config: &NotesConfig,
    reporter: &Reporter,
    source: &dyn NotesSource,
    operations: &[UpdateOperation],
    sink: &mut dyn OutputSink,
) -> usize {
    let mut session = UpdateSession::new(config.packages.clone());
    for operation in operations {
        session.observe(operation);
    }
    session.finish(reporter, source, sink)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::BufferSink;
    use tempfile::tempdir;

    #[test]
    fn lock_diff_reports_upgrade_notes_from_vendor_dir() {
        let dir = tempdir().unwrap();
        let project = dir.path();
        let package_dir = project.join("vendor/denisok94/helper");
        fs::create_dir_all(&package_dir).unwrap();
        fs::write(
            package_dir.join("UPGRADE.md"),
            "Upgrade from Helper 1.1.0\n* renamed Str::camel()\nUpgrade from Helper 1.0.0\n* old\n",
        )
        .unwrap();
        fs::write(
            project.join("old.lock"),
            r#"{"packages": [{"name": "denisok94/helper", "version": "1.1.0"}]}"#,
        )
        .unwrap();
        fs::write(
            project.join("composer.lock"),
            r#"{"packages": [{"name": "denisok94/helper", "version": "1.2.0"}]}"#,
        )
        .unwrap();

        let context = ProjectContext::load(project, None).unwrap();
        let old = ComposerLock::from_path(&project.join("old.lock")).unwrap();
        let new = ComposerLock::from_path(&project.join("composer.lock")).unwrap();

        let mut sink = BufferSink::new();
        let emitted = run_session(
            &context.config,
            &context.reporter,
            &context.source,
            &diff_locks(&old, &new),
            &mut sink,
        );

        assert_eq!(emitted, 1);
        let texts = sink.texts("denisok94/helper");
        assert!(texts.contains(&"* renamed Str::camel()".to_string()));
        assert!(!texts.contains(&"* old".to_string()));
        assert_eq!(
            texts.last().map(String::as_str),
            Some("https://github.com/Denisok94/helper/blob/1.2.0/UPGRADE.md")
        );
    }

    #[test]
    fn show_rejects_invalid_package_name() {
        let dir = tempdir().unwrap();
        let err = execute_show(dir.path(), None, "../helper", "1.0", "2.0").unwrap_err();
        assert!(matches!(err, UpnotesError::PathValidation(_)));
    }

    #[test]
    fn extract_reports_missing_file() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("UPGRADE.md");
        assert!(execute_extract(dir.path(), None, &missing, "1.0").is_err());
    }
}

use crate::composer::version::{VersionComparator, numeric_prefix};
use crate::error::{Result, UpnotesError};
use regex::{Regex, RegexBuilder};
use std::sync::LazyLock;
use tracing::debug;

static LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r\n|\n|\r").expect("valid line break regex"));

/// Splits on `\n`, `\r\n` and lone `\r`; a final line break does not start
/// another line.
fn split_lines(document: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = LINE_BREAK.split(document).collect();
    if lines.last() == Some(&"") {
        lines.pop();
    }
    lines
}

/// Outcome of looking for the notes relevant to an upgrade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpgradeNotes {
    /// The notes document could not be found or read.
    Unavailable,
    /// Lines of every section newer than the from-version; may be empty.
    Relevant(Vec<String>),
}

impl UpgradeNotes {
    /// True when the document was read but nothing in it concerns the upgrade.
    pub fn is_empty(&self) -> bool {
        matches!(self, UpgradeNotes::Relevant(lines) if lines.is_empty())
    }

    pub fn lines(&self) -> &[String] {
        match self {
            UpgradeNotes::Unavailable => &[],
            UpgradeNotes::Relevant(lines) => lines,
        }
    }
}

/// Scans a notes document organised in `Upgrade from <Product> <version>` sections.
#[derive(Debug, Clone)]
pub struct NotesExtractor {
    header: Regex,
}

impl NotesExtractor {
    pub fn new(product: &str) -> Result<Self> {
        let pattern = format!(
            r"^Upgrade from {} (\d+\.\d+(?:\.\d+)*)",
            regex::escape(product.trim())
        );
        let header = RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| {
                UpnotesError::Config(format!("Invalid product name '{}': {}", product, e))
            })?;
        Ok(Self { header })
    }

    /// Version captured from a section header line, if the line is one.
    pub fn header_version<'a>(&self, line: &'a str) -> Option<&'a str> {
        self.header
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    /// Returns the lines of every section still relevant when upgrading from `from`.
    ///
    /// Sections are expected newest first. Scanning stops at the first header
    /// older than `from` once the exact `from` section has been seen, or at
    /// the first header older than the numeric part of `from`.
    pub fn extract(&self, document: &str, from: &str) -> Vec<String> {
        let from_major = numeric_prefix(from).unwrap_or(from);

        let mut relevant = Vec::new();
        let mut consuming = false;
        let mut found_exact_match = false;

        for line in split_lines(document) {
            if let Some(version) = self.header_version(line) {
                if version == from {
                    found_exact_match = true;
                }
                if VersionComparator::is_older(version, from)
                    && (found_exact_match || VersionComparator::is_older(version, from_major))
                {
                    debug!("Stopped at header {} (from {})", version, from);
                    break;
                }
                consuming = true;
            }
            if consuming {
                relevant.push(line.to_string());
            }
        }

        relevant
    }
}

use crate::error::{Result, UpnotesError};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;

pub const CONFIG_FILE: &str = "upnotes.toml";

const DEFAULT_PACKAGES: &[&str] = &[
    "denisok94/helper",
    "denisok94/yii-metatag",
    "denisok94/yii-helper",
    "denisok94/symfony-helper",
    "denisok94/symfony-export-xlsx",
];

/// Settings read from `upnotes.toml`; every key is optional.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NotesConfig {
    /// Packages to report on, in report order
    pub packages: Vec<String>,
    /// Product name used in `Upgrade from <product> <version>` headers
    pub product: String,
    pub notes_file: String,
    /// Prefix of the online notes link, followed by `/<repo>/blob/<ref>/<notes_file>`
    pub link_base: String,
    pub default_branch: String,
    pub max_note_lines: usize,
    pub vendor_dir: Option<PathBuf>,
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            packages: DEFAULT_PACKAGES.iter().map(|p| p.to_string()).collect(),
            product: "Helper".to_string(),
            notes_file: "UPGRADE.md".to_string(),
            link_base: "https://github.com/Denisok94".to_string(),
            default_branch: "main".to_string(),
            max_note_lines: 250,
            vendor_dir: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ComposerJson {
    #[serde(default)]
    config: ComposerJsonConfig,
}

#[derive(Debug, Default, Deserialize)]
struct ComposerJsonConfig {
    #[serde(default, rename = "vendor-dir")]
    vendor_dir: Option<String>,
}

impl NotesConfig {
    /// Load the configuration of a project.
    ///
    /// An explicit `config_path` must exist; otherwise `upnotes.toml` in the
    /// project directory is used when present and the defaults when not.
    pub fn load(project_path: &Path, config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => Self::from_file(path)?,
            None => {
                let path = project_path.join(CONFIG_FILE);
                if path.is_file() {
                    Self::from_file(&path)?
                } else {
                    debug!("No {} in {}, using defaults", CONFIG_FILE, project_path.display());
                    Self::default()
                }
            }
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            UpnotesError::Config(format!("Failed to read '{}': {}", path.display(), e))
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn validate(&self) -> Result<()> {
        let base = Url::parse(&self.link_base)?;
        if base.cannot_be_a_base() {
            return Err(UpnotesError::Config(format!(
                "link_base '{}' cannot be used as a link prefix",
                self.link_base
            )));
        }

        for (key, value) in [
            ("product", &self.product),
            ("notes_file", &self.notes_file),
            ("default_branch", &self.default_branch),
        ] {
            if value.trim().is_empty() {
                return Err(UpnotesError::Config(format!("{key} must not be empty")));
            }
        }

        if self.max_note_lines == 0 {
            return Err(UpnotesError::Config(
                "max_note_lines must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Vendor directory of the project: the configured one, else composer.json's
    /// `config.vendor-dir`, else `vendor`. Relative paths resolve against the project.
    pub fn resolve_vendor_dir(&self, project_path: &Path) -> Result<PathBuf> {
        let configured = match &self.vendor_dir {
            Some(dir) => dir.clone(),
            None => Self::composer_vendor_dir(project_path)?
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("vendor")),
        };

        let trimmed = PathBuf::from(
            configured
                .to_string_lossy()
                .trim_end_matches(['/', '\\'])
                .to_string(),
        );

        if trimmed.is_absolute() {
            Ok(trimmed)
        } else {
            Ok(project_path.join(trimmed))
        }
    }

    fn composer_vendor_dir(project_path: &Path) -> Result<Option<String>> {
        let path = project_path.join("composer.json");
        if !path.is_file() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)?;
        let composer: ComposerJson = serde_json::from_str(&content)?;
        Ok(composer.config.vendor_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn empty_file_yields_defaults() {
        let config = NotesConfig::parse("").unwrap();
        assert_eq!(config.packages.len(), 5);
        assert_eq!(config.product, "Helper");
        assert_eq!(config.max_note_lines, 250);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parses_overrides() {
        let config = NotesConfig::parse(
            r#"
packages = ["acme/widgets"]
product = "Widgets"
link_base = "https://github.com/acme"
default_branch = "master"
max_note_lines = 40
"#,
        )
        .unwrap();

        assert_eq!(config.packages, vec!["acme/widgets".to_string()]);
        assert_eq!(config.product, "Widgets");
        assert_eq!(config.default_branch, "master");
        assert_eq!(config.max_note_lines, 40);
        assert_eq!(config.notes_file, "UPGRADE.md");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(NotesConfig::parse("colour = \"red\"").is_err());
    }

    #[test]
    fn invalid_link_base_is_rejected() {
        let config = NotesConfig::parse("link_base = \"not a url\"").unwrap();
        assert!(matches!(config.validate(), Err(UpnotesError::Url(_))));
    }

    #[test]
    fn zero_line_limit_is_rejected() {
        let config = NotesConfig::parse("max_note_lines = 0").unwrap();
        assert!(matches!(config.validate(), Err(UpnotesError::Config(_))));
    }

    #[test]
    fn load_uses_project_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "product = \"Widgets\"").unwrap();
        let config = NotesConfig::load(dir.path(), None).unwrap();
        assert_eq!(config.product, "Widgets");
    }

    #[test]
    fn load_requires_explicit_file() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("other.toml");
        assert!(NotesConfig::load(dir.path(), Some(&missing)).is_err());
    }

    #[test]
    fn vendor_dir_defaults_to_vendor() {
        let dir = tempdir().unwrap();
        let vendor = NotesConfig::default().resolve_vendor_dir(dir.path()).unwrap();
        assert_eq!(vendor, dir.path().join("vendor"));
    }

    #[test]
    fn vendor_dir_comes_from_composer_json() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("composer.json"),
            r#"{"name": "acme/app", "config": {"vendor-dir": "lib/"}}"#,
        )
        .unwrap();
        let vendor = NotesConfig::default().resolve_vendor_dir(dir.path()).unwrap();
        assert_eq!(vendor, dir.path().join("lib"));
    }

    #[test]
    fn configured_vendor_dir_wins() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("composer.json"),
            r#"{"config": {"vendor-dir": "lib"}}"#,
        )
        .unwrap();
        let config = NotesConfig::parse("vendor_dir = \"deps\"").unwrap();
        assert_eq!(
            config.resolve_vendor_dir(dir.path()).unwrap(),
            dir.path().join("deps")
        );
    }
}

//! Configuration management for sitegraph.
//!
//! Parses `sitegraph.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! `site.manifest` supports environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

mod expand;

use std::path::{Path, PathBuf};

use serde::Deserialize;
use sitegraph_engine::{CanonicalPath, IssueKind};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override manifest path.
    pub manifest: Option<PathBuf>,
    /// Override issue kinds that fail a check.
    pub fail_on: Option<Vec<IssueKind>>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "sitegraph.toml";

/// Default manifest filename, relative to the config directory.
const DEFAULT_MANIFEST: &str = "site.json";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site configuration (paths are relative strings from TOML).
    site: SiteConfigRaw,
    /// Check policy.
    pub check: CheckConfig,

    /// Resolved site configuration (set after loading).
    #[serde(skip)]
    pub site_resolved: SiteConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw site configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SiteConfigRaw {
    manifest: Option<String>,
    virtual_pages: Vec<String>,
    landing_pages: Vec<String>,
}

/// Resolved site configuration with absolute paths.
#[derive(Debug, Default)]
pub struct SiteConfig {
    /// Page manifest (JSON or YAML).
    pub manifest: PathBuf,
    /// Slugs registered as destinations without a content page.
    pub virtual_pages: Vec<String>,
    /// Section landing pages never expanded in navigation.
    pub landing_pages: Vec<String>,
}

/// Check policy: which issues fail a run and which paths are ignored.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CheckConfig {
    /// Issue kinds that fail a check. Others are reported as warnings.
    pub fail_on: Vec<IssueKind>,
    /// Issues reported against paths under these prefixes are dropped.
    pub ignore_prefixes: Vec<String>,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            fail_on: vec![IssueKind::MalformedLink, IssueKind::BrokenLink],
            ignore_prefixes: Vec::new(),
        }
    }
}

impl CheckConfig {
    /// Whether an issue of `kind` fails the check.
    #[must_use]
    pub fn is_failure(&self, kind: IssueKind) -> bool {
        self.fail_on.contains(&kind)
    }

    /// Whether issues reported against `path` are ignored.
    #[must_use]
    pub fn is_ignored(&self, path: &CanonicalPath) -> bool {
        self.ignore_prefixes
            .iter()
            .any(|prefix| path.starts_with(&CanonicalPath::new(prefix)))
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`site.manifest`").
        field: String,
        /// Error message (e.g., "${`SITE_MANIFEST`} not set").
        message: String,
    },
}

/// Require every entry of a path list to be an absolute site path.
fn require_absolute_paths(values: &[String], field: &str) -> Result<(), ConfigError> {
    if let Some(bad) = values.iter().find(|v| !v.starts_with('/')) {
        return Err(ConfigError::Validation(format!(
            "{field} entries must start with '/': {bad}"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `sitegraph.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(manifest) = &settings.manifest {
            self.site_resolved.manifest.clone_from(manifest);
        }
        if let Some(fail_on) = &settings.fail_on {
            self.check.fail_on.clone_from(fail_on);
        }
    }

    /// Navigation landing pages as canonical paths.
    #[must_use]
    pub fn landing_pages(&self) -> Vec<CanonicalPath> {
        self.site_resolved
            .landing_pages
            .iter()
            .map(|slug| CanonicalPath::new(slug))
            .collect()
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        Self::discover_from(&current)
    }

    /// Search for config file in `start` and its parents.
    fn discover_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            site: SiteConfigRaw::default(),
            check: CheckConfig::default(),
            site_resolved: SiteConfig {
                manifest: base.join(DEFAULT_MANIFEST),
                virtual_pages: Vec::new(),
                landing_pages: Vec::new(),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_absolute_paths(&self.site_resolved.virtual_pages, "site.virtual_pages")?;
        require_absolute_paths(&self.site_resolved.landing_pages, "site.landing_pages")?;
        require_absolute_paths(&self.check.ignore_prefixes, "check.ignore_prefixes")?;
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref manifest) = self.site.manifest {
            self.site.manifest = Some(expand::expand_env(manifest, "site.manifest")?);
        }
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.site_resolved = SiteConfig {
            manifest: config_dir.join(self.site.manifest.as_deref().unwrap_or(DEFAULT_MANIFEST)),
            virtual_pages: std::mem::take(&mut self.site.virtual_pages),
            landing_pages: std::mem::take(&mut self.site.landing_pages),
        };
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.site_resolved.manifest, PathBuf::from("/test/site.json"));
        assert!(config.site_resolved.virtual_pages.is_empty());
        assert!(config.site_resolved.landing_pages.is_empty());
        assert_eq!(
            config.check.fail_on,
            vec![IssueKind::MalformedLink, IssueKind::BrokenLink]
        );
        assert!(config.check.ignore_prefixes.is_empty());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(
            config.check.fail_on,
            vec![IssueKind::MalformedLink, IssueKind::BrokenLink]
        );
    }

    #[test]
    fn test_parse_check_config() {
        let toml = r#"
[check]
fail_on = ["broken_link", "missing_backing_page"]
ignore_prefixes = ["/drafts/"]
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(
            config.check.fail_on,
            vec![IssueKind::BrokenLink, IssueKind::MissingBackingPage]
        );
        assert_eq!(config.check.ignore_prefixes, vec!["/drafts/"]);
    }

    #[test]
    fn test_parse_unknown_issue_kind_fails() {
        let toml = r#"
[check]
fail_on = ["dangling"]
"#;
        let result: Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_is_failure() {
        let check = CheckConfig::default();
        assert!(check.is_failure(IssueKind::BrokenLink));
        assert!(check.is_failure(IssueKind::MalformedLink));
        assert!(!check.is_failure(IssueKind::MissingBackingPage));
    }

    #[test]
    fn test_is_ignored_matches_prefix() {
        let check = CheckConfig {
            ignore_prefixes: vec!["/Drafts".to_owned()],
            ..CheckConfig::default()
        };
        assert!(check.is_ignored(&CanonicalPath::new("/drafts/")));
        assert!(check.is_ignored(&CanonicalPath::new("/drafts/wip/")));
        assert!(!check.is_ignored(&CanonicalPath::new("/drafts-old/")));
        assert!(!check.is_ignored(&CanonicalPath::new("/about/")));
    }

    #[test]
    fn test_load_from_file_resolves_manifest_relative_to_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(
            &path,
            r#"
[site]
manifest = "build/pages.yaml"
virtual_pages = ["/about/", "/courses/"]
landing_pages = ["/courses/"]
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(
            config.site_resolved.manifest,
            dir.path().join("build/pages.yaml")
        );
        assert_eq!(config.site_resolved.virtual_pages, vec!["/about/", "/courses/"]);
        assert_eq!(
            config.landing_pages(),
            vec![CanonicalPath::new("/courses/")]
        );
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_missing_explicit_path_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(matches!(err, ConfigError::NotFound(p) if p == path));
    }

    #[test]
    fn test_load_rejects_relative_virtual_page() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[site]\nvirtual_pages = [\"about/\"]\n").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();

        assert_eq!(
            err.to_string(),
            "Configuration error: site.virtual_pages entries must start with '/': about/"
        );
    }

    #[test]
    fn test_load_invalid_toml_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[site\n").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_cli_settings_override_file_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[check]\nfail_on = [\"broken_link\"]\n").unwrap();
        let settings = CliSettings {
            manifest: Some(PathBuf::from("/elsewhere/site.json")),
            fail_on: Some(vec![IssueKind::MissingBackingPage]),
        };

        let config = Config::load(Some(&path), Some(&settings)).unwrap();

        assert_eq!(
            config.site_resolved.manifest,
            PathBuf::from("/elsewhere/site.json")
        );
        assert_eq!(config.check.fail_on, vec![IssueKind::MissingBackingPage]);
    }

    #[test]
    fn test_discover_from_finds_config_in_parent() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("content/courses");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(CONFIG_FILENAME), "").unwrap();

        let found = Config::discover_from(&nested);

        assert_eq!(found, Some(dir.path().join(CONFIG_FILENAME)));
    }
}

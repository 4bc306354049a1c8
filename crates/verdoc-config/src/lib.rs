//! Configuration management for verdoc.
//!
//! Parses `verdoc.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `content.dir`
//! - `site.dir`
//! - every argument of `generator.build`, `generator.snapshot` and `generator.build_into`

mod expand;

use serde::Deserialize;
use std::path::{Component, Path, PathBuf};

/// Placeholder replaced with the version label in the snapshot command.
pub const VERSION_PLACEHOLDER: &str = "{version}";

/// Placeholder replaced with the output directory in the build-into command.
pub const OUT_DIR_PLACEHOLDER: &str = "{out_dir}";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override content root directory.
    pub content_dir: Option<PathBuf>,
    /// Override generator site root directory.
    pub site_dir: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "verdoc.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Content configuration (paths are relative strings from TOML).
    content: ContentConfigRaw,
    /// Site configuration (paths are relative strings from TOML).
    site: SiteConfigRaw,
    /// Version directory naming.
    pub versions: VersionsConfig,
    /// External generator commands.
    pub generator: GeneratorConfig,

    /// Resolved paths (set after loading).
    #[serde(skip)]
    pub paths: PathsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ContentConfigRaw {
    dir: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SiteConfigRaw {
    dir: Option<String>,
    docs_dir: Option<String>,
}

/// Resolved filesystem layout with absolute paths.
#[derive(Debug, Default)]
pub struct PathsConfig {
    /// Content root holding one directory per docset.
    pub content_dir: PathBuf,
    /// Generator site root (working directory for generator commands).
    pub site_dir: PathBuf,
    /// Docs directory, relative to `site_dir`.
    pub docs_dir: PathBuf,
    /// Project directory for verdoc data (.verdoc/).
    pub project_dir: PathBuf,
}

impl PathsConfig {
    /// Absolute path of the generator's docs input directory.
    #[must_use]
    pub fn site_docs_dir(&self) -> PathBuf {
        self.site_dir.join(&self.docs_dir)
    }

    /// Staging directory path (.verdoc/staging/).
    #[must_use]
    pub fn staging_dir(&self) -> PathBuf {
        self.project_dir.join("staging")
    }
}

/// Version directory naming.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct VersionsConfig {
    /// Prefix stripped from version directory names to form the label.
    pub prefix: String,
}

impl Default for VersionsConfig {
    fn default() -> Self {
        Self {
            prefix: "v".to_owned(),
        }
    }
}

/// External generator command configuration.
///
/// Each command is an argv list; the first element is the program.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Generic site build command.
    pub build: Vec<String>,
    /// Version snapshot command, must contain `{version}`.
    pub snapshot: Vec<String>,
    /// Build command targeting a directory, must contain `{out_dir}`.
    pub build_into: Vec<String>,
    /// Files and directories (relative to the site root) removed before a snapshot run.
    pub snapshot_artifacts: Vec<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        let argv = |args: &[&str]| args.iter().map(|&a| a.to_owned()).collect();
        Self {
            build: argv(&["yarn", "build"]),
            snapshot: argv(&["yarn", "run", "docusaurus", "docs:version", VERSION_PLACEHOLDER]),
            build_into: argv(&["yarn", "build", "--out-dir", OUT_DIR_PLACEHOLDER]),
            snapshot_artifacts: argv(&["versioned_docs", "versioned_sidebars", "versions.json"]),
        }
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
        /// Config field path (e.g., "`site.dir`").
        field: String,
        /// Error message (e.g., "${`SITE_ROOT`} not set").
        message: String,
    },
}

fn require_command(args: &[String], field: &str) -> Result<(), ConfigError> {
    match args.first() {
        Some(program) if !program.trim().is_empty() => Ok(()),
        _ => Err(ConfigError::Validation(format!(
            "{field} must name a program to run"
        ))),
    }
}

fn require_placeholder(args: &[String], placeholder: &str, field: &str) -> Result<(), ConfigError> {
    if args.iter().any(|a| a.contains(placeholder)) {
        return Ok(());
    }
    Err(ConfigError::Validation(format!(
        "{field} must reference {placeholder}"
    )))
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `verdoc.toml` in current directory and parents.
    /// Without any config file, defaults are resolved against the current directory.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or validation fails.
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

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(content_dir) = &settings.content_dir {
            self.paths.content_dir.clone_from(content_dir);
        }
        if let Some(site_dir) = &settings.site_dir {
            self.paths.site_dir.clone_from(site_dir);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
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

    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            content: ContentConfigRaw::default(),
            site: SiteConfigRaw::default(),
            versions: VersionsConfig::default(),
            generator: GeneratorConfig::default(),
            paths: PathsConfig {
                content_dir: base.join("content"),
                site_dir: base.join("website"),
                docs_dir: PathBuf::from("docs"),
                project_dir: base.join(".verdoc"),
            },
            config_path: None,
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir)?;
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
        let generator = &self.generator;
        require_command(&generator.build, "generator.build")?;
        require_command(&generator.snapshot, "generator.snapshot")?;
        require_command(&generator.build_into, "generator.build_into")?;
        require_placeholder(&generator.snapshot, VERSION_PLACEHOLDER, "generator.snapshot")?;
        require_placeholder(
            &generator.build_into,
            OUT_DIR_PLACEHOLDER,
            "generator.build_into",
        )?;
        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref dir) = self.content.dir {
            self.content.dir = Some(expand::expand_env(dir, "content.dir")?);
        }
        if let Some(ref dir) = self.site.dir {
            self.site.dir = Some(expand::expand_env(dir, "site.dir")?);
        }

        let generator = &mut self.generator;
        generator.build = expand::expand_args(&generator.build, "generator.build")?;
        generator.snapshot = expand::expand_args(&generator.snapshot, "generator.snapshot")?;
        generator.build_into =
            expand::expand_args(&generator.build_into, "generator.build_into")?;

        Ok(())
    }

    /// Resolve relative paths against the config directory.
    ///
    /// `site.docs_dir` stays relative to the site root and must not escape it.
    fn resolve_paths(&mut self, config_dir: &Path) -> Result<(), ConfigError> {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        let docs_dir = PathBuf::from(self.site.docs_dir.as_deref().unwrap_or("docs"));
        let is_plain_relative = docs_dir
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        if docs_dir.as_os_str().is_empty() || !is_plain_relative {
            return Err(ConfigError::Validation(
                "site.docs_dir must be a non-empty path relative to site.dir".to_owned(),
            ));
        }

        self.paths = PathsConfig {
            content_dir: resolve(self.content.dir.as_deref(), "content"),
            site_dir: resolve(self.site.dir.as_deref(), "website"),
            docs_dir,
            project_dir: config_dir.join(".verdoc"),
        };

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.paths.content_dir, PathBuf::from("/test/content"));
        assert_eq!(config.paths.site_dir, PathBuf::from("/test/website"));
        assert_eq!(
            config.paths.site_docs_dir(),
            PathBuf::from("/test/website/docs")
        );
        assert_eq!(
            config.paths.staging_dir(),
            PathBuf::from("/test/.verdoc/staging")
        );
        assert_eq!(config.versions.prefix, "v");
        assert_eq!(config.generator.build, vec!["yarn", "build"]);
        assert_eq!(
            config.generator.snapshot,
            vec!["yarn", "run", "docusaurus", "docs:version", "{version}"]
        );
        assert_eq!(
            config.generator.snapshot_artifacts,
            vec!["versioned_docs", "versioned_sidebars", "versions.json"]
        );
        config.validate().unwrap();
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.versions.prefix, "v");
        assert_eq!(config.generator.build_into[3], "{out_dir}");
    }

    #[test]
    fn test_parse_generator_config() {
        let toml = r#"
[generator]
build = ["npm", "run", "build"]
snapshot = ["npx", "docusaurus", "docs:version", "{version}"]
snapshot_artifacts = ["versions.json"]
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.generator.build, vec!["npm", "run", "build"]);
        assert_eq!(config.generator.snapshot[0], "npx");
        assert_eq!(config.generator.snapshot_artifacts, vec!["versions.json"]);
        // Unset commands keep their defaults
        assert_eq!(config.generator.build_into[0], "yarn");
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[content]
dir = "src/content"

[site]
dir = "site"
docs_dir = "docs/current"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project")).unwrap();

        assert_eq!(
            config.paths.content_dir,
            PathBuf::from("/project/src/content")
        );
        assert_eq!(config.paths.site_dir, PathBuf::from("/project/site"));
        assert_eq!(
            config.paths.site_docs_dir(),
            PathBuf::from("/project/site/docs/current")
        );
        assert_eq!(config.paths.project_dir, PathBuf::from("/project/.verdoc"));
    }

    #[test]
    fn test_docs_dir_must_stay_inside_site() {
        for docs_dir in ["", "../docs", "/abs/docs"] {
            let toml = format!("[site]\ndocs_dir = \"{docs_dir}\"\n");
            let mut config: Config = toml::from_str(&toml).unwrap();
            let err = config.resolve_paths(Path::new("/project")).unwrap_err();
            assert!(
                matches!(err, ConfigError::Validation(_)),
                "Expected validation error for {docs_dir:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn test_snapshot_requires_version_placeholder() {
        let toml = r#"
[generator]
snapshot = ["yarn", "run", "docusaurus", "docs:version"]
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("{version}"));
    }

    #[test]
    fn test_build_into_requires_out_dir_placeholder() {
        let toml = r#"
[generator]
build_into = ["yarn", "build"]
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("{out_dir}"));
    }

    #[test]
    fn test_empty_command_rejected() {
        let toml = r#"
[generator]
build = []
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("generator.build"));
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            site_dir: Some(PathBuf::from("/elsewhere/site")),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.paths.site_dir, PathBuf::from("/elsewhere/site"));
        assert_eq!(config.paths.content_dir, PathBuf::from("/test/content")); // Unchanged
    }

    #[test]
    fn test_load_explicit_path_not_found() {
        let result = Config::load(Some(Path::new("/nonexistent/verdoc.toml")), None);
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_from_file_resolves_against_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[content]\ndir = \"docsets\"\n").unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.paths.content_dir, dir.path().join("docsets"));
        assert_eq!(config.paths.site_dir, dir.path().join("website"));
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_from_file_expands_env() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("VERDOC_TEST_SITE_DIR", "generated-site");
        }
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[site]\ndir = \"${VERDOC_TEST_SITE_DIR}\"\n").unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.paths.site_dir, dir.path().join("generated-site"));
        unsafe {
            std::env::remove_var("VERDOC_TEST_SITE_DIR");
        }
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[generator\nbuild = 1").unwrap();

        let result = Config::load(Some(&path), None);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}

//! Configuration management for Folio.
//!
//! Parses `folio.toml` configuration files with serde and provides
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
//! - `layouts.root_dir`
//! - `layouts.template`
//! - `layouts.layout_set`
//! - `urls.entry_prefix`
//! - `repository.path`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the project template directory (relative to the layout root).
    pub template: Option<String>,
    /// Override the fallback layout set.
    pub layout_set: Option<String>,
    /// Override the repository file.
    pub repository: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "folio.toml";

/// Default fallback layout set.
const DEFAULT_LAYOUT_SET: &str = "bootstrap-3";

/// Default layout file extension.
const DEFAULT_EXTENSION: &str = "jinja";

/// Default application entry prefix.
const DEFAULT_ENTRY_PREFIX: &str = "/index.php";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Layout configuration (paths are relative strings from TOML).
    layouts: LayoutsConfigRaw,
    /// URL configuration.
    pub urls: UrlsConfig,
    /// Repository configuration (optional section).
    repository: Option<RepositoryConfigRaw>,

    /// Resolved layout configuration (set after loading).
    #[serde(skip)]
    pub layouts_resolved: LayoutsConfig,
    /// Resolved repository file (set after loading).
    #[serde(skip)]
    pub repository_path: Option<PathBuf>,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw layout configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct LayoutsConfigRaw {
    root_dir: Option<String>,
    template: Option<String>,
    layout_set: Option<String>,
    extension: Option<String>,
}

/// Resolved layout configuration with absolute paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutsConfig {
    /// Root directory that template and layout directories live under.
    pub root_dir: PathBuf,
    /// Project template directory, relative to `root_dir`.
    pub template: Option<PathBuf>,
    /// Fallback layout set name under `<root_dir>/layouts/`.
    pub layout_set: String,
    /// Layout file extension without the dot.
    pub extension: String,
}

impl Default for LayoutsConfig {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from("."),
            template: None,
            layout_set: DEFAULT_LAYOUT_SET.to_owned(),
            extension: DEFAULT_EXTENSION.to_owned(),
        }
    }
}

impl LayoutsConfig {
    /// Project override directory (`<root_dir>/<template>`), if configured.
    #[must_use]
    pub fn override_dir(&self) -> Option<PathBuf> {
        self.template
            .as_ref()
            .map(|template| self.root_dir.join(template))
    }

    /// Fallback layout directory (`<root_dir>/layouts/<layout_set>`).
    #[must_use]
    pub fn fallback_dir(&self) -> PathBuf {
        self.root_dir.join("layouts").join(&self.layout_set)
    }
}

/// URL configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct UrlsConfig {
    /// Prefix of every expanded URL; also the front-page URL.
    pub entry_prefix: String,
}

impl Default for UrlsConfig {
    fn default() -> Self {
        Self {
            entry_prefix: DEFAULT_ENTRY_PREFIX.to_owned(),
        }
    }
}

/// Raw repository configuration as parsed from TOML.
#[derive(Debug, Deserialize)]
struct RepositoryConfigRaw {
    path: String,
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
        /// Config field path (e.g., "`layouts.template`").
        field: String,
        /// Error message (e.g., "${`FOLIO_TEMPLATE`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Strip leading slashes so the path stays below the layout root.
fn relative_dir(path: &str) -> PathBuf {
    PathBuf::from(path.trim_start_matches('/'))
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `folio.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
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
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(template) = &settings.template {
            self.layouts_resolved.template = Some(relative_dir(template));
        }
        if let Some(layout_set) = &settings.layout_set {
            self.layouts_resolved.layout_set.clone_from(layout_set);
        }
        if let Some(repository) = &settings.repository {
            self.repository_path = Some(repository.clone());
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

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            layouts: LayoutsConfigRaw::default(),
            urls: UrlsConfig::default(),
            repository: None,
            layouts_resolved: LayoutsConfig {
                root_dir: base.to_path_buf(),
                ..LayoutsConfig::default()
            },
            repository_path: None,
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
        self.validate_layouts()?;
        self.validate_urls()?;
        Ok(())
    }

    /// Validate layout configuration.
    fn validate_layouts(&self) -> Result<(), ConfigError> {
        let layouts = &self.layouts_resolved;
        require_non_empty(&layouts.layout_set, "layouts.layout_set")?;
        require_non_empty(&layouts.extension, "layouts.extension")?;

        if layouts.layout_set.contains(['/', '\\']) || layouts.layout_set == ".." {
            return Err(ConfigError::Validation(
                "layouts.layout_set must be a single directory name".to_owned(),
            ));
        }

        if layouts.extension.starts_with('.') {
            return Err(ConfigError::Validation(
                "layouts.extension must not start with a dot".to_owned(),
            ));
        }

        Ok(())
    }

    /// Validate URL configuration.
    fn validate_urls(&self) -> Result<(), ConfigError> {
        let prefix = &self.urls.entry_prefix;
        require_non_empty(prefix, "urls.entry_prefix")?;

        if !prefix.starts_with('/') {
            return Err(ConfigError::Validation(
                "urls.entry_prefix must start with /".to_owned(),
            ));
        }

        if prefix.len() > 1 && prefix.ends_with('/') {
            return Err(ConfigError::Validation(
                "urls.entry_prefix must not end with /".to_owned(),
            ));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        let layouts = &mut self.layouts;
        if let Some(ref root_dir) = layouts.root_dir {
            layouts.root_dir = Some(expand::expand_env(root_dir, "layouts.root_dir")?);
        }
        if let Some(ref template) = layouts.template {
            layouts.template = Some(expand::expand_env(template, "layouts.template")?);
        }
        if let Some(ref layout_set) = layouts.layout_set {
            layouts.layout_set = Some(expand::expand_env(layout_set, "layouts.layout_set")?);
        }

        self.urls.entry_prefix = expand::expand_env(&self.urls.entry_prefix, "urls.entry_prefix")?;

        if let Some(ref mut repository) = self.repository {
            repository.path = expand::expand_env(&repository.path, "repository.path")?;
        }

        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let layouts = &self.layouts;

        self.layouts_resolved = LayoutsConfig {
            root_dir: config_dir.join(layouts.root_dir.as_deref().unwrap_or(".")),
            template: layouts.template.as_deref().map(relative_dir),
            layout_set: layouts
                .layout_set
                .clone()
                .unwrap_or_else(|| DEFAULT_LAYOUT_SET.to_owned()),
            extension: layouts
                .extension
                .clone()
                .unwrap_or_else(|| DEFAULT_EXTENSION.to_owned()),
        };

        self.repository_path = self
            .repository
            .as_ref()
            .map(|repository| config_dir.join(&repository.path));
    }
}

//! Configuration management for spacetraveling.
//!
//! Parses `spacetraveling.toml` configuration files with serde and provides
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
//! - `server.host`
//! - `content.endpoint`
//! - `content.access_token`
//! - `comments.repo`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    pub host: Option<String>,
    pub port: Option<u16>,
    /// Override content API endpoint.
    pub endpoint: Option<String>,
    /// Override static export directory.
    pub output_dir: Option<PathBuf>,
    /// Override pre-rendering of enumerated posts at server startup.
    pub prerender: Option<bool>,
    /// Override page caching.
    pub cache_enabled: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "spacetraveling.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub content: ContentConfig,
    pub site: SiteSettings,
    /// Comment widget (optional section).
    pub comments: Option<CommentsConfig>,
    /// Build configuration (paths are relative strings from TOML).
    build: BuildConfigRaw,

    /// Resolved build configuration (set after loading).
    #[serde(skip)]
    pub build_resolved: BuildConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 3000,
        }
    }
}

/// Content repository configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// API root, e.g. `https://my-repo.cdn.prismic.io/api/v2`.
    pub endpoint: Option<String>,
    /// Access token for private repositories.
    pub access_token: Option<String>,
    /// Custom type of post documents.
    pub document_type: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            access_token: None,
            document_type: "post".to_owned(),
        }
    }
}

/// Site presentation and generation settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteSettings {
    /// Shown in page titles and the header.
    pub name: String,
    /// Locale for month names and UI labels (`en_US` or `pt_BR`).
    pub locale: String,
    /// Seconds a generated page is served before regeneration.
    pub revalidate_secs: u64,
    /// Render every enumerated post when the server starts.
    pub prerender: bool,
    /// Keep generated pages between requests.
    pub cache: bool,
    /// Stylesheet URL linked from every page.
    pub stylesheet: Option<String>,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            name: "spacetraveling".to_owned(),
            locale: "en_US".to_owned(),
            revalidate_secs: 1800,
            prerender: true,
            cache: true,
            stylesheet: None,
        }
    }
}

/// Utterances comment widget configuration.
#[derive(Debug, Deserialize)]
pub struct CommentsConfig {
    /// GitHub repository holding comment issues, as `owner/name`.
    pub repo: String,
    #[serde(default = "default_comments_theme")]
    pub theme: String,
}

impl CommentsConfig {
    /// Validate that all fields are properly set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the repo is not `owner/name`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.repo, "comments.repo")?;
        match self.repo.split_once('/') {
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
                Ok(())
            }
            _ => Err(ConfigError::Validation(
                "comments.repo must have the form owner/name".to_owned(),
            )),
        }?;
        require_non_empty(&self.theme, "comments.theme")
    }
}

fn default_comments_theme() -> String {
    "github-dark".to_owned()
}

/// Raw build configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct BuildConfigRaw {
    output_dir: Option<String>,
}

/// Resolved build configuration with absolute paths.
#[derive(Debug, Default)]
pub struct BuildConfig {
    /// Directory the static export is written to.
    pub output_dir: PathBuf,
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
        /// Config field path (e.g., "`content.access_token`").
        field: String,
        /// Error message (e.g., "${`PRISMIC_TOKEN`} not set").
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

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `spacetraveling.toml` in current directory and
    /// parents.
    ///
    /// CLI settings are applied after loading and path resolution, and the
    /// result is validated again.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the final configuration is invalid.
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
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(endpoint) = &settings.endpoint {
            self.content.endpoint = Some(endpoint.clone());
        }
        if let Some(output_dir) = &settings.output_dir {
            self.build_resolved.output_dir.clone_from(output_dir);
        }
        if let Some(prerender) = settings.prerender {
            self.site.prerender = prerender;
        }
        if let Some(cache) = settings.cache_enabled {
            self.site.cache = cache;
        }
    }

    /// Get the content API endpoint.
    ///
    /// Use this instead of reading `content.endpoint` when the command needs
    /// to fetch content.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if no endpoint is configured.
    pub fn require_endpoint(&self) -> Result<&str, ConfigError> {
        self.content.endpoint.as_deref().ok_or_else(|| {
            ConfigError::Validation(
                "content.endpoint is required (set it in [content] or pass --endpoint)".into(),
            )
        })
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
            server: ServerConfig::default(),
            content: ContentConfig::default(),
            site: SiteSettings::default(),
            comments: None,
            build: BuildConfigRaw::default(),
            build_resolved: BuildConfig {
                output_dir: base.join("dist"),
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
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_content()?;
        self.validate_site()?;
        if let Some(comments) = &self.comments {
            comments.validate()?;
        }
        Ok(())
    }

    fn validate_server(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.host, "server.host")?;
        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }
        Ok(())
    }

    fn validate_content(&self) -> Result<(), ConfigError> {
        // Endpoint is optional here; commands that fetch use `require_endpoint`
        if let Some(endpoint) = &self.content.endpoint {
            require_non_empty(endpoint, "content.endpoint")?;
            require_http_url(endpoint, "content.endpoint")?;
        }
        require_non_empty(&self.content.document_type, "content.document_type")
    }

    fn validate_site(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.site.name, "site.name")?;
        require_non_empty(&self.site.locale, "site.locale")?;
        if self.site.revalidate_secs == 0 {
            return Err(ConfigError::Validation(
                "site.revalidate_secs must be greater than 0".to_owned(),
            ));
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.server.host = expand::expand_env(&self.server.host, "server.host")?;
        expand::expand_opt(&mut self.content.endpoint, "content.endpoint")?;
        expand::expand_opt(&mut self.content.access_token, "content.access_token")?;
        if let Some(ref mut comments) = self.comments {
            comments.repo = expand::expand_env(&comments.repo, "comments.repo")?;
        }
        Ok(())
    }

    /// Resolve relative paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.build_resolved = BuildConfig {
            output_dir: config_dir.join(self.build.output_dir.as_deref().unwrap_or("dist")),
        };
    }
}

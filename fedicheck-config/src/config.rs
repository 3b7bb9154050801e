//! Configuration loading.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ConfigError;

// ============================================================================
// Environment Variables
// ============================================================================

/// Path of the configuration file.
pub const CONFIG_PATH_ENV: &str = "FEDICHECK_CONFIG";

/// Overrides `environment.base_url`.
pub const BASE_URL_ENV: &str = "FEDICHECK_BASE_URL";

/// Overrides `admin.username`.
pub const ADMIN_USERNAME_ENV: &str = "FEDICHECK_ADMIN_USERNAME";

/// Overrides `admin.password`.
pub const ADMIN_PASSWORD_ENV: &str = "FEDICHECK_ADMIN_PASSWORD";

/// Returns the default configuration file path.
///
/// - Linux: `~/.config/fedicheck/config.yaml`
/// - macOS: `~/Library/Application Support/fedicheck/config.yaml`
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("fedicheck")
        .join("config.yaml")
}

// ============================================================================
// Config Types
// ============================================================================

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// The instance under test.
    #[serde(default)]
    pub environment: EnvironmentConfig,
    /// Admin credentials used for registration and confirmation.
    #[serde(default)]
    pub admin: AdminConfig,
}

/// The instance under test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    /// Base URL, scheme included.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Admin credentials.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminConfig {
    /// Admin login email.
    #[serde(default = "default_admin_username")]
    pub username: String,
    /// Admin password.
    #[serde(default = "default_admin_password")]
    pub password: String,
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_admin_username() -> String {
    "admin@localhost".to_string()
}

fn default_admin_password() -> String {
    "mastodonadmin".to_string()
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            username: default_admin_username(),
            password: default_admin_password(),
        }
    }
}

impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

// ============================================================================
// Loading
// ============================================================================

impl Config {
    /// Loads configuration from the process environment.
    ///
    /// `explicit` is the CLI's `--config` flag, if any.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with(explicit, |key| std::env::var(key).ok())
    }

    /// Loads configuration, reading variables through `env`.
    pub fn load_with<F>(explicit: Option<&Path>, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match explicit
            .map(Path::to_path_buf)
            .or_else(|| env(CONFIG_PATH_ENV).map(PathBuf::from))
        {
            Some(path) => Self::load_from(&path)?,
            None => {
                let path = default_config_path();
                if path.exists() {
                    Self::load_from(&path)?
                } else {
                    debug!(path = %path.display(), "Config file not found, using defaults");
                    Self::default()
                }
            }
        };

        config.apply_overrides(env);
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a specific file. The file must exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        let config = Self::from_yaml(&content)?;

        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Parses a YAML document. Missing keys take their defaults.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Applies the `FEDICHECK_*` overrides. Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, env: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| env(key).filter(|value| !value.is_empty());

        if let Some(base_url) = lookup(BASE_URL_ENV) {
            debug!(base_url = %base_url, "Base URL overridden from environment");
            self.environment.base_url = base_url;
        }
        if let Some(username) = lookup(ADMIN_USERNAME_ENV) {
            self.admin.username = username;
        }
        if let Some(password) = lookup(ADMIN_PASSWORD_ENV) {
            self.admin.password = password;
        }
    }

    /// Checks that the configuration can be used.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base_url = self.environment.base_url.trim();
        if base_url.is_empty() {
            return Err(ConfigError::Invalid {
                field: "environment.base_url",
                reason: "must not be empty".to_string(),
            });
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                field: "environment.base_url",
                reason: format!("expected an http(s) URL, got {base_url:?}"),
            });
        }
        if self.environment.timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "environment.timeout_secs",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Per-request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.environment.timeout_secs)
    }

    /// Writes the configuration as YAML, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;

        info!(path = %path.display(), "Saved configuration");
        Ok(())
    }
}

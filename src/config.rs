use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{ReleaserError, Result};

/// Environment variable overriding `gitlab.token`
pub const TOKEN_ENV_VAR: &str = "RELEASER_GITLAB_TOKEN";

/// File names looked up in the current directory, in order
const LOCAL_CONFIG_FILES: [&str; 3] = ["config.yml", "releaser.yml", "releaser.toml"];

/// Represents the complete configuration for releaser.
///
/// Names the GitLab project to release, how to reach it, and which files go
/// into the release archive.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub project_id: String,

    #[serde(default)]
    pub gitlab: GitLabConfig,

    #[serde(default)]
    pub files: Vec<String>,
}

/// Returns the default GitLab instance URL.
fn default_gitlab_url() -> String {
    "https://gitlab.com".to_string()
}

/// Connection settings for the GitLab instance.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GitLabConfig {
    #[serde(default = "default_gitlab_url")]
    pub url: String,

    #[serde(default)]
    pub token: String,
}

impl Default for GitLabConfig {
    fn default() -> Self {
        GitLabConfig {
            url: default_gitlab_url(),
            token: String::new(),
        }
    }
}

impl Config {
    /// Parse configuration text; `.toml` files are TOML, everything else YAML.
    pub fn from_str_with_format(content: &str, path: &Path) -> Result<Config> {
        if path.extension().is_some_and(|ext| ext == "toml") {
            Ok(toml::from_str(content)?)
        } else {
            Ok(serde_yaml::from_str(content)?)
        }
    }

    /// Replace the token with `RELEASER_GITLAB_TOKEN` when it is set and non-empty.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(token) = std::env::var(TOKEN_ENV_VAR) {
            if !token.is_empty() {
                debug!("using GitLab token from {}", TOKEN_ENV_VAR);
                self.gitlab.token = token;
            }
        }
    }

    /// Check that every setting a release needs is present.
    pub fn validate(&self) -> Result<()> {
        let mut missing = Vec::new();
        if self.project_id.trim().is_empty() {
            missing.push("project_id");
        }
        if self.gitlab.url.trim().is_empty() {
            missing.push("gitlab.url");
        }
        if self.gitlab.token.trim().is_empty() {
            missing.push("gitlab.token");
        }
        if self.files.is_empty() {
            missing.push("files");
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ReleaserError::config(format!(
                "missing required settings: {}",
                missing.join(", ")
            )))
        }
    }
}

/// Locate the configuration file to use.
///
/// Lookup order:
/// 1. Custom path provided as parameter
/// 2. `config.yml`, `releaser.yml`, `releaser.toml` in the current directory
/// 3. `releaser/config.yml` in the user config directory
fn find_config(config_path: Option<&str>) -> Option<PathBuf> {
    if let Some(path) = config_path {
        return Some(PathBuf::from(path));
    }

    if let Some(local) = LOCAL_CONFIG_FILES
        .iter()
        .map(PathBuf::from)
        .find(|path| path.exists())
    {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join("releaser").join("config.yml"))
        .filter(|path| path.exists())
}

/// Loads configuration from file or returns defaults.
///
/// The environment token override is applied either way. Validation is left
/// to the caller so partially configured setups can still be inspected.
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists (or was named) but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let mut config = match find_config(config_path) {
        Some(path) => {
            debug!(path = %path.display(), "loading config");
            let content = fs::read_to_string(&path).map_err(|e| {
                ReleaserError::config(format!("cannot read '{}': {}", path.display(), e))
            })?;
            Config::from_str_with_format(&content, &path)?
        }
        None => {
            debug!("no config file found, using defaults");
            Config::default()
        }
    };

    config.apply_env_overrides();
    Ok(config)
}

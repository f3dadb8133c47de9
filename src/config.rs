//! Configuration management for the NewReleases CLI.
//!
//! Values are resolved once per invocation into an explicit [`Config`] that
//! commands receive by reference. Sources, from highest to lowest priority:
//!
//! 1. Command line flags
//! 2. `NEWRELEASES_*` environment variables (optionally from a local `.env`)
//! 3. The YAML configuration file, `~/.newreleases.yaml` by default
//! 4. Application defaults
//!
//! Flags and environment variables are merged by clap before they reach
//! [`Config::load`] as a [`ConfigOverrides`] value.

use std::{
    io,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{management::ConfigManager, utils};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const CONFIG_FILE_NAME: &str = ".newreleases.yaml";

pub const AUTH_KEY_ENV: &str = "NEWRELEASES_AUTH_KEY";
pub const TIMEOUT_ENV: &str = "NEWRELEASES_TIMEOUT";
pub const API_ENDPOINT_ENV: &str = "NEWRELEASES_API_ENDPOINT";

/// Printed when a command needs the API but no auth key is configured.
pub const CONFIGURATION_HELP: &str = "Initial configuration:

  This tool needs to authenticate to NewReleases API using a secret Auth Key
  that can be generated on the service settings web pages.

  The key can be stored permanently by issuing interactive commands:

    newreleases configure

  or

    newreleases get-auth-key

  or it can be provided as the command line argument flag --auth-key on every
  newreleases tool execution.
";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("home directory not found")]
    HomeDirNotFound,

    #[error("read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("serialize config: {0}")]
    Serialize(#[source] serde_yaml::Error),

    #[error("write config file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid timeout {0:?}")]
    InvalidTimeout(String),

    #[error("auth key not configured")]
    AuthKeyNotConfigured,
}

/// On-disk representation of the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ConfigFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_endpoint: Option<String>,
}

/// Values given on the command line or through the environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config_path: Option<PathBuf>,
    pub auth_key: Option<String>,
    pub timeout: Option<Duration>,
    pub api_endpoint: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Configuration file that was read, and that `configure` and
    /// `get-auth-key` write to.
    pub path: PathBuf,
    pub auth_key: Option<String>,
    pub timeout: Duration,
    pub api_endpoint: Option<String>,
}

impl Config {
    pub async fn load(overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        let path = resolve_path(overrides.config_path.as_deref())?;
        let file = ConfigManager::new(path.clone()).load().await?;
        Self::resolve(path, file, overrides)
    }

    /// Merges the file contents with the overrides. Blank strings count as
    /// unset so an empty `auth-key:` in the file does not shadow the default.
    pub fn resolve(
        path: PathBuf,
        file: ConfigFile,
        overrides: ConfigOverrides,
    ) -> Result<Self, ConfigError> {
        let timeout = match overrides.timeout {
            Some(timeout) => timeout,
            None => match non_empty(file.timeout) {
                Some(raw) => {
                    utils::parse_timeout(&raw).map_err(|_| ConfigError::InvalidTimeout(raw))?
                }
                None => DEFAULT_TIMEOUT,
            },
        };

        Ok(Self {
            path,
            auth_key: non_empty(overrides.auth_key).or_else(|| non_empty(file.auth_key)),
            timeout,
            api_endpoint: non_empty(overrides.api_endpoint)
                .or_else(|| non_empty(file.api_endpoint)),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Returns the explicit path if one was given, otherwise the default file in
/// the home directory.
pub fn resolve_path(explicit: Option<&Path>) -> Result<PathBuf, ConfigError> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => dirs::home_dir()
            .map(|home| home.join(CONFIG_FILE_NAME))
            .ok_or(ConfigError::HomeDirNotFound),
    }
}

/// Loads environment variables from a `.env` file in the working directory.
///
/// A missing file is fine, the variables are optional.
pub fn load_env() {
    if let Ok(path) = dotenv::dotenv() {
        tracing::debug!(path = %path.display(), "loaded environment file");
    }
}

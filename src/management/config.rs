use std::{io, path::PathBuf};

use async_trait::async_trait;
use serde_yaml::{Mapping, Value};

use crate::config::{ConfigError, ConfigFile};

const AUTH_KEY_FIELD: &str = "auth-key";

/// Stores a chosen auth key secret.
#[async_trait]
pub trait ConfigWriter: Send + Sync {
    /// Persists the secret and returns the path it was written to.
    async fn persist_secret(&self, secret: &str) -> Result<PathBuf, ConfigError>;
}

/// Reads and writes the YAML configuration file.
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new(path: PathBuf) -> Self {
        ConfigManager { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Loads the configuration file. A missing or empty file yields defaults.
    pub async fn load(&self) -> Result<ConfigFile, ConfigError> {
        let content = match self.read().await? {
            Some(content) => content,
            None => return Ok(ConfigFile::default()),
        };

        if content.trim().is_empty() {
            return Ok(ConfigFile::default());
        }

        serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    async fn read(&self) -> Result<Option<String>, ConfigError> {
        match async_fs::read_to_string(&self.path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(ConfigError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }

    /// Reads the document as a raw mapping so unknown keys survive a rewrite.
    async fn load_document(&self) -> Result<Mapping, ConfigError> {
        let content = self.read().await?.unwrap_or_default();
        if content.trim().is_empty() {
            return Ok(Mapping::new());
        }

        serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    async fn persist(&self, document: &Mapping) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            async_fs::create_dir_all(parent).await.map_err(write_err)?;
        }

        let yaml = serde_yaml::to_string(document).map_err(ConfigError::Serialize)?;

        let mut tmp_name = self.path.file_name().unwrap_or_default().to_os_string();
        tmp_name.push(".tmp");
        let tmp_path = self.path.with_file_name(tmp_name);

        async_fs::write(&tmp_path, yaml).await.map_err(write_err)?;
        if let Err(e) = async_fs::rename(&tmp_path, &self.path).await {
            let _ = async_fs::remove_file(&tmp_path).await;
            return Err(write_err(e));
        }

        tracing::debug!(path = %self.path.display(), "configuration written");
        Ok(())
    }
}

#[async_trait]
impl ConfigWriter for ConfigManager {
    async fn persist_secret(&self, secret: &str) -> Result<PathBuf, ConfigError> {
        let mut document = self.load_document().await?;
        document.insert(
            Value::String(AUTH_KEY_FIELD.to_string()),
            Value::String(secret.trim().to_string()),
        );
        self.persist(&document).await?;
        Ok(self.path.clone())
    }
}

//! Client configuration loaded from YAML with environment overrides.

use ledsdk_types::SdkError;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::time::Duration;
use tokio::fs;

pub const DEFAULT_CONFIG_FILE: &str = "ledsdk.yaml";
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:30080";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the device gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub server_url: String,
    pub sdk_key: Option<String>,
    pub sdk_secret: Option<String>,
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            sdk_key: None,
            sdk_secret: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
            ..Default::default()
        }
    }

    pub fn with_credentials(mut self, key: impl Into<String>, secret: impl Into<String>) -> Self {
        self.sdk_key = Some(key.into());
        self.sdk_secret = Some(secret.into());
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Result<(), SdkError> {
        if self.server_url.is_empty() {
            return Err(SdkError::config("server_url cannot be empty"));
        }

        if !(self.server_url.starts_with("http://") || self.server_url.starts_with("https://")) {
            return Err(SdkError::config(format!(
                "server_url must start with http:// or https://, got '{}'",
                self.server_url
            )));
        }

        if self.timeout_secs == 0 {
            return Err(SdkError::config("timeout_secs must be greater than 0"));
        }

        match (&self.sdk_key, &self.sdk_secret) {
            (Some(_), None) => Err(SdkError::config("sdk_key is set but sdk_secret is missing")),
            (None, Some(_)) => Err(SdkError::config("sdk_secret is set but sdk_key is missing")),
            _ => Ok(()),
        }
    }
}

/// Loads [`ClientConfig`] from files, strings and the environment.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load from `path`, falling back to defaults when the file does not exist.
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<ClientConfig, SdkError> {
        Self::load_with(path, |_| {}).await
    }

    /// Like [`ConfigLoader::load`], with `overrides` applied after the file and
    /// environment and before validation.
    pub async fn load_with<P, F>(path: P, overrides: F) -> Result<ClientConfig, SdkError>
    where
        P: AsRef<Path>,
        F: FnOnce(&mut ClientConfig),
    {
        let path = path.as_ref();
        let mut config = if fs::try_exists(path).await.unwrap_or(false) {
            Self::parse(&Self::read(path).await?)?
        } else {
            log::debug!(
                "Config file {} not found, using defaults and environment",
                path.display()
            );
            ClientConfig::default()
        };

        Self::apply_env(&mut config)?;
        overrides(&mut config);
        config.validate()?;
        Ok(config)
    }

    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<ClientConfig, SdkError> {
        Self::from_str(&Self::read(path.as_ref()).await?)
    }

    pub fn from_str(content: &str) -> Result<ClientConfig, SdkError> {
        let mut config = Self::parse(content)?;
        Self::apply_env(&mut config)?;
        config.validate()?;
        Ok(config)
    }

    async fn read(path: &Path) -> Result<String, SdkError> {
        fs::read_to_string(path).await.map_err(|e| {
            SdkError::config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })
    }

    fn parse(content: &str) -> Result<ClientConfig, SdkError> {
        if content.trim().is_empty() {
            return Ok(ClientConfig::default());
        }
        serde_yaml::from_str(content)
            .map_err(|e| SdkError::config(format!("Failed to parse YAML config: {}", e)))
    }

    /// Override fields from `LEDSDK_*` environment variables.
    fn apply_env(config: &mut ClientConfig) -> Result<(), SdkError> {
        if let Ok(url) = env::var("LEDSDK_SERVER_URL") {
            config.server_url = url;
        }
        if let Ok(key) = env::var("LEDSDK_SDK_KEY") {
            config.sdk_key = Some(key);
        }
        if let Ok(secret) = env::var("LEDSDK_SDK_SECRET") {
            config.sdk_secret = Some(secret);
        }
        if let Ok(timeout) = env::var("LEDSDK_TIMEOUT_SECS") {
            config.timeout_secs = timeout.parse().map_err(|_| {
                SdkError::config(format!("LEDSDK_TIMEOUT_SECS is not a number: '{}'", timeout))
            })?;
        }
        Ok(())
    }
}

// ABOUTME: Configuration types and parsing for vigil.yml.
// ABOUTME: Handles YAML parsing, environment fallbacks, validation, and destination merging.

mod deserialize;
mod env_value;
mod health;
mod init;
mod polling;

pub use env_value::EnvValue;
pub use health::HealthConfig;
pub use init::init_config;
pub use polling::PollingConfig;

use crate::api::ApiConfig;
use crate::error::{Error, Result};
use crate::types::{ImageRef, ServiceEndpoint, ServiceId};
use deserialize::{deserialize_service_id, deserialize_service_id_option};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

pub const CONFIG_FILENAME: &str = "vigil.yml";
pub const CONFIG_FILENAME_ALT: &str = "vigil.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".vigil/config.yml";

pub const ENV_SERVICE_ID: &str = "RENDER_SERVICE_ID";
pub const ENV_API_KEY: &str = "RENDER_API_KEY";
pub const ENV_API_URL: &str = "RENDER_API_URL";

pub const DEFAULT_API_URL: &str = "https://api.render.com";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(deserialize_with = "deserialize_service_id")]
    pub service_id: ServiceId,

    #[serde(default = "default_api_key")]
    pub api_key: EnvValue,

    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default)]
    pub image: Option<ImageRef>,

    #[serde(default = "default_clear_cache")]
    pub clear_cache: bool,

    #[serde(default = "default_request_timeout", with = "humantime_serde")]
    pub request_timeout: Duration,

    #[serde(default)]
    pub polling: PollingConfig,

    #[serde(default)]
    pub health: HealthConfig,

    #[serde(default)]
    pub destinations: HashMap<String, Destination>,

    /// Name of the destination merged into this config, if any.
    #[serde(skip)]
    pub destination: Option<String>,
}

/// A named target environment (staging, production, ...).
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Destination {
    #[serde(default, deserialize_with = "deserialize_service_id_option")]
    pub service_id: Option<ServiceId>,

    #[serde(default)]
    pub api_key: Option<EnvValue>,

    #[serde(default)]
    pub image: Option<ImageRef>,

    #[serde(default)]
    pub clear_cache: Option<bool>,

    #[serde(default)]
    pub health: Option<HealthConfig>,
}

fn default_api_key() -> EnvValue {
    EnvValue::env(ENV_API_KEY)
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_clear_cache() -> bool {
    true
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn discover(dir: &Path) -> Result<Self> {
        let candidates = [
            dir.join(CONFIG_FILENAME),
            dir.join(CONFIG_FILENAME_ALT),
            dir.join(CONFIG_FILENAME_DIR),
        ];

        for path in &candidates {
            if path.exists() {
                return Self::load(path);
            }
        }

        Err(Error::ConfigNotFound(dir.to_path_buf()))
    }

    /// Build a config purely from `RENDER_*` environment variables.
    pub fn from_env() -> Result<Self> {
        let service_id = match std::env::var(ENV_SERVICE_ID) {
            Ok(v) if !v.trim().is_empty() => ServiceId::new(v.trim()),
            _ => return Err(Error::MissingEnvVar(ENV_SERVICE_ID.to_string())),
        };

        let mut config = Self::template();
        config.service_id = service_id;
        if let Ok(url) = std::env::var(ENV_API_URL)
            && !url.trim().is_empty()
        {
            config.api_url = url.trim().to_string();
        }

        config.validate()?;
        Ok(config)
    }

    /// Load the config for a run: an explicit path wins, then a discovered
    /// file, then the environment.
    pub fn locate(dir: &Path, explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        match Self::discover(dir) {
            Err(Error::ConfigNotFound(searched)) => {
                if std::env::var_os(ENV_SERVICE_ID).is_none() {
                    return Err(Error::ConfigNotFound(searched));
                }
                tracing::debug!("no config file found, using {ENV_SERVICE_ID}");
                Self::from_env()
            }
            other => other,
        }
    }

    pub fn for_destination(&self, name: &str) -> Result<Config> {
        let dest = self
            .destinations
            .get(name)
            .ok_or_else(|| Error::UnknownDestination(name.to_string()))?;

        let mut merged = self.clone();
        merged.destination = Some(name.to_string());

        if let Some(ref id) = dest.service_id {
            merged.service_id = id.clone();
        }

        if let Some(ref key) = dest.api_key {
            merged.api_key = key.clone();
        }

        if dest.image.is_some() {
            merged.image = dest.image.clone();
        }

        if let Some(clear) = dest.clear_cache {
            merged.clear_cache = clear;
        }

        if let Some(ref health) = dest.health {
            merged.health = health.clone();
        }

        merged.validate()?;
        Ok(merged)
    }

    pub fn validate(&self) -> Result<()> {
        if self.service_id.is_blank() {
            return Err(Error::InvalidConfig("service_id cannot be empty".into()));
        }

        ServiceEndpoint::parse(&self.api_url)
            .map_err(|e| Error::InvalidConfig(format!("api_url: {e}")))?;

        if self.polling.interval.is_zero() {
            return Err(Error::InvalidConfig(
                "polling.interval must be greater than zero".into(),
            ));
        }

        if self.polling.timeout.is_zero() {
            return Err(Error::InvalidConfig(
                "polling.timeout must be greater than zero".into(),
            ));
        }

        if self.health.attempts == 0 {
            return Err(Error::InvalidConfig(
                "health.attempts must be at least 1".into(),
            ));
        }

        if !self.health.path.starts_with('/') {
            return Err(Error::InvalidConfig(format!(
                "health.path must start with '/': {}",
                self.health.path
            )));
        }

        Ok(())
    }

    /// Resolve credentials and build the API client settings.
    pub fn api_config(&self) -> Result<ApiConfig> {
        Ok(ApiConfig {
            base_url: self.api_url.trim_end_matches('/').to_string(),
            service_id: self.service_id.clone(),
            api_key: self.api_key.resolve_api_key()?,
            timeout: self.request_timeout,
        })
    }

    pub fn template() -> Self {
        Config {
            service_id: ServiceId::new("srv-my-service"),
            api_key: default_api_key(),
            api_url: default_api_url(),
            image: None,
            clear_cache: default_clear_cache(),
            request_timeout: default_request_timeout(),
            polling: PollingConfig::default(),
            health: HealthConfig::default(),
            destinations: HashMap::new(),
            destination: None,
        }
    }
}

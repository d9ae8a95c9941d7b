// ABOUTME: Config values that are either literals or read from the environment.
// ABOUTME: Used for secrets such as the platform API key.

use crate::error::{Error, Result};
use crate::types::ApiKey;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum EnvValue {
    Literal(String),
    FromEnv {
        #[serde(rename = "env")]
        var: String,
        #[serde(default)]
        default: Option<String>,
    },
}

impl EnvValue {
    /// Reference an environment variable with no fallback.
    pub fn env(var: impl Into<String>) -> Self {
        EnvValue::FromEnv {
            var: var.into(),
            default: None,
        }
    }

    pub fn resolve(&self) -> Result<String> {
        match self {
            EnvValue::Literal(s) => Ok(s.clone()),
            EnvValue::FromEnv { var, default } => match std::env::var(var) {
                Ok(val) if !val.is_empty() => Ok(val),
                _ => default
                    .clone()
                    .ok_or_else(|| Error::MissingEnvVar(var.clone())),
            },
        }
    }

    /// Resolve as a bearer token. Blank tokens are rejected here rather than
    /// surfacing later as a 401 from the platform.
    pub fn resolve_api_key(&self) -> Result<ApiKey> {
        let key = ApiKey::new(self.resolve()?);
        if key.is_empty() {
            return Err(Error::InvalidConfig("api_key resolved to an empty value".into()));
        }
        Ok(key)
    }
}

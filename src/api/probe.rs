// ABOUTME: Health probe abstraction and its HTTP implementation.
// ABOUTME: A probe succeeds on any 2xx response from the health URL.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::{ApiError, ProbeError};

/// Issues one health request against a URL.
#[async_trait]
pub trait HealthProbe: Send + Sync {
    /// Probe `url`, returning the HTTP status on success.
    async fn probe(&self, url: &str) -> Result<u16, ProbeError>;
}

/// reqwest-backed probe with a per-request timeout.
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: Client,
}

impl HttpProbe {
    pub fn new(timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("vigil/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Client(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HealthProbe for HttpProbe {
    async fn probe(&self, url: &str) -> Result<u16, ProbeError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                ProbeError::Timeout
            } else {
                ProbeError::Transport(e.to_string())
            }
        })?;

        let status = response.status();
        if status.is_success() {
            Ok(status.as_u16())
        } else {
            Err(ProbeError::Status(status.as_u16()))
        }
    }
}

// ABOUTME: reqwest client for the Render-style REST deploy API.
// ABOUTME: Bearer auth, service-scoped paths, and status/body checks on every call.

use async_trait::async_trait;
use reqwest::{Client, Response};
use urlencoding::encode;

use super::wire::{self, TriggerBody};
use super::{ApiConfig, ApiError, DeployApi, DeployRequest};
use crate::types::{DeployId, ServiceEndpoint, ServiceId};

/// Longest response body kept in error messages.
const MAX_ERROR_BODY: usize = 512;

/// HTTP client for one service on the platform.
#[derive(Debug, Clone)]
pub struct RenderClient {
    client: Client,
    config: ApiConfig,
}

impl RenderClient {
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("vigil/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Client(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn service_path(&self) -> String {
        format!(
            "{}/v1/services/{}",
            self.config.base_url,
            encode(self.config.service_id.as_str())
        )
    }

    fn deploys_path(&self) -> String {
        format!("{}/deploys", self.service_path())
    }

    fn deploy_path(&self, deploy_id: &DeployId) -> String {
        format!("{}/{}", self.deploys_path(), encode(deploy_id.as_str()))
    }

    async fn get(&self, url: &str) -> Result<String, ApiError> {
        tracing::debug!(%url, "GET");
        let response = self
            .client
            .get(url)
            .bearer_auth(self.config.api_key.expose())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        read_body(response).await
    }
}

/// Return the body of a 2xx response, or a `Status` error carrying a
/// truncated body otherwise.
async fn read_body(response: Response) -> Result<String, ApiError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let mut body = body;
        if body.len() > MAX_ERROR_BODY {
            let mut cut = MAX_ERROR_BODY;
            while !body.is_char_boundary(cut) {
                cut -= 1;
            }
            body.truncate(cut);
        }
        return Err(ApiError::Status {
            status: status.as_u16(),
            body,
        });
    }

    Ok(body)
}

#[async_trait]
impl DeployApi for RenderClient {
    fn service_id(&self) -> &ServiceId {
        &self.config.service_id
    }

    async fn trigger_deploy(&self, request: &DeployRequest) -> Result<DeployId, ApiError> {
        let url = self.deploys_path();
        let body = TriggerBody::new(
            self.config.service_id.as_str(),
            request.clear_cache,
            request.image.as_ref().map(ToString::to_string),
        );

        tracing::debug!(%url, image = ?body.image_url, "POST");
        let response = self
            .client
            .post(&url)
            .bearer_auth(self.config.api_key.expose())
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&body)
            .send()
            .await?;

        let body = read_body(response).await?;
        let deploy_id = wire::parse_deploy_id(&body)?;
        tracing::info!(deploy_id = %deploy_id, "deploy triggered");
        Ok(deploy_id)
    }

    async fn deploy_status(&self, deploy_id: &DeployId) -> Result<String, ApiError> {
        let body = self.get(&self.deploy_path(deploy_id)).await?;
        wire::parse_deploy_status(&body)
    }

    async fn service_url(&self) -> Result<ServiceEndpoint, ApiError> {
        let body = self.get(&self.service_path()).await?;
        wire::parse_service_url(&body)
    }
}

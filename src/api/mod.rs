// ABOUTME: Hosting platform API boundary.
// ABOUTME: Defines the DeployApi and HealthProbe traits plus their reqwest-backed implementations.

mod error;
mod probe;
mod render;
mod wire;

pub use error::{ApiError, ProbeError};
pub use probe::{HealthProbe, HttpProbe};
pub use render::RenderClient;

use crate::types::{ApiKey, DeployId, ImageRef, ServiceEndpoint, ServiceId};
use async_trait::async_trait;
use std::time::Duration;

/// Connection settings for the platform API, built from config once per run.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub service_id: ServiceId,
    pub api_key: ApiKey,
    pub timeout: Duration,
}

/// Parameters of a deploy trigger.
#[derive(Debug, Clone, Default)]
pub struct DeployRequest {
    /// Image to roll out; `None` redeploys the service's configured image.
    pub image: Option<ImageRef>,
    /// Whether the platform should drop its build cache.
    pub clear_cache: bool,
}

/// Read and trigger operations against the platform's deploy API.
///
/// Status values are returned raw; interpreting them is the monitor's job.
#[async_trait]
pub trait DeployApi: Send + Sync {
    /// The service all calls are scoped to.
    fn service_id(&self) -> &ServiceId;

    /// Start a new deploy and return its id.
    async fn trigger_deploy(&self, request: &DeployRequest) -> Result<DeployId, ApiError>;

    /// Current status string of a deploy.
    async fn deploy_status(&self, deploy_id: &DeployId) -> Result<String, ApiError>;

    /// Public URL of the service.
    async fn service_url(&self) -> Result<ServiceEndpoint, ApiError>;
}

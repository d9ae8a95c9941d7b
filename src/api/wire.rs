// ABOUTME: JSON request and response shapes of the platform's deploy API.
// ABOUTME: Extracts .deploy.id, .deploy.status and .service.serviceDetails.url.

use serde::{Deserialize, Serialize};

use super::ApiError;
use crate::types::{DeployId, ServiceEndpoint};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TriggerBody<'a> {
    pub service_id: &'a str,
    pub clear_cache: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl<'a> TriggerBody<'a> {
    pub fn new(service_id: &'a str, clear_cache: bool, image_url: Option<String>) -> Self {
        Self {
            service_id,
            clear_cache: if clear_cache { "clear" } else { "do_not_clear" },
            image_url,
        }
    }
}

#[derive(Debug, Deserialize)]
struct DeployEnvelope {
    deploy: Option<DeployBody>,
}

#[derive(Debug, Deserialize)]
struct DeployBody {
    id: Option<String>,
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ServiceEnvelope {
    service: Option<ServiceBody>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ServiceBody {
    service_details: Option<ServiceDetails>,
}

#[derive(Debug, Deserialize)]
struct ServiceDetails {
    url: Option<String>,
}

fn decode<'a, T: Deserialize<'a>>(body: &'a str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

pub(crate) fn parse_deploy_id(body: &str) -> Result<DeployId, ApiError> {
    let envelope: DeployEnvelope = decode(body)?;
    envelope
        .deploy
        .and_then(|d| non_empty(d.id))
        .map(DeployId::new)
        .ok_or(ApiError::MissingField("deploy.id"))
}

pub(crate) fn parse_deploy_status(body: &str) -> Result<String, ApiError> {
    let envelope: DeployEnvelope = decode(body)?;
    envelope
        .deploy
        .and_then(|d| non_empty(d.status))
        .ok_or(ApiError::MissingField("deploy.status"))
}

pub(crate) fn parse_service_url(body: &str) -> Result<ServiceEndpoint, ApiError> {
    let envelope: ServiceEnvelope = decode(body)?;
    let url = envelope
        .service
        .and_then(|s| s.service_details)
        .and_then(|d| non_empty(d.url))
        .ok_or(ApiError::MissingField("service.serviceDetails.url"))?;
    Ok(ServiceEndpoint::parse(&url)?)
}

// ABOUTME: Post-deploy health verification loop.
// ABOUTME: Probes <url><path> up to a fixed number of times, stopping at the first 2xx.

use std::time::Duration;

use super::Monitor;
use super::error::Unhealthy;
use crate::api::{DeployApi, HealthProbe};
use crate::types::ServiceEndpoint;

/// The service answered its health endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Healthy {
    /// Probes issued, including the successful one.
    pub attempts: u32,
    /// HTTP status of the successful probe.
    pub status: u16,
}

impl<A: DeployApi, P: HealthProbe> Monitor<A, P> {
    /// Probe the service's health path until it answers 2xx.
    ///
    /// Issues at most `max_attempts` probes (at least one), waiting
    /// `interval` after each failure except the last.
    pub async fn verify_health(
        &self,
        endpoint: &ServiceEndpoint,
        max_attempts: u32,
        interval: Duration,
    ) -> Result<Healthy, Unhealthy> {
        let url = endpoint.join(&self.health_path);
        let max_attempts = max_attempts.max(1);
        let mut attempt: u32 = 1;

        tracing::info!(%url, max_attempts, "verifying service health");

        loop {
            let Some(outcome) = self.cancellable(self.probe.probe(&url)).await else {
                return Err(Unhealthy::Cancelled {
                    url,
                    attempts: attempt - 1,
                });
            };

            self.progress.probe(attempt, max_attempts, &outcome);

            match outcome {
                Ok(status) => {
                    tracing::info!(%url, attempt, status, "service is healthy");
                    return Ok(Healthy {
                        attempts: attempt,
                        status,
                    });
                }
                Err(last_error) if attempt >= max_attempts => {
                    return Err(Unhealthy::Exhausted {
                        url,
                        attempts: attempt,
                        last_error,
                    });
                }
                Err(e) => {
                    tracing::debug!(%url, attempt, error = %e, "health probe failed");
                }
            }

            if !self.pause(interval).await {
                return Err(Unhealthy::Cancelled {
                    url,
                    attempts: attempt,
                });
            }
            attempt += 1;
        }
    }
}

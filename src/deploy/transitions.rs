// ABOUTME: State transition methods for the deploy lifecycle.
// ABOUTME: Each method consumes self and returns the next state on success.

use crate::api::{DeployApi, DeployRequest, HealthProbe};
use crate::config::HealthConfig;
use crate::monitor::{Monitor, MonitorError, Unhealthy};
use crate::types::{DeployId, ServiceEndpoint, ServiceId};

use super::Deployment;
use super::state::{HealthOutcome, Live, Resolved, Triggered, Verified};

/// Result type for transitions that hand the deploy back on failure.
pub type TransitionResult<T, S, E> = Result<Deployment<T>, (Deployment<S>, E)>;

// =============================================================================
// -> Triggered
// =============================================================================

impl Deployment<Triggered> {
    /// Ask the platform to start a new deploy.
    ///
    /// # Errors
    ///
    /// Returns a monitor error if the trigger call fails, the response
    /// carries no deploy id, or the run is cancelled before it answers.
    pub async fn trigger<A: DeployApi, P: HealthProbe>(
        monitor: &Monitor<A, P>,
        request: &DeployRequest,
        destination: Option<String>,
    ) -> Result<Self, MonitorError> {
        let deploy_id = monitor.trigger(request).await?;
        Ok(Deployment {
            service_id: monitor.api().service_id().clone(),
            destination,
            image: request.image.clone(),
            state: Triggered { deploy_id },
        })
    }

    /// Attach to a deploy that was started elsewhere.
    pub fn existing(
        service_id: ServiceId,
        deploy_id: DeployId,
        destination: Option<String>,
    ) -> Self {
        Deployment {
            service_id,
            destination,
            image: None,
            state: Triggered { deploy_id },
        }
    }

    /// Wait until the platform reports the deploy as live.
    ///
    /// # Errors
    ///
    /// Returns the monitor error for failure statuses, timeouts, exhausted
    /// retries and cancellation.
    #[must_use = "deployment state must be used"]
    pub async fn await_live<A: DeployApi, P: HealthProbe>(
        self,
        monitor: &Monitor<A, P>,
    ) -> Result<Deployment<Live>, MonitorError> {
        let result = monitor.await_deployment(&self.state.deploy_id).await?;
        let deploy_id = self.state.deploy_id.clone();
        Ok(self.with_state(Live {
            deploy_id,
            polls: result.attempt,
        }))
    }
}

// =============================================================================
// Live -> Resolved
// =============================================================================

impl Deployment<Live> {
    /// Look up the service's public URL.
    ///
    /// # Errors
    ///
    /// Returns `(self, error)` so the caller still knows the deploy is live.
    #[must_use = "deployment state must be used"]
    pub async fn resolve_endpoint<A: DeployApi, P: HealthProbe>(
        self,
        monitor: &Monitor<A, P>,
    ) -> TransitionResult<Resolved, Live, MonitorError> {
        match monitor.service_url().await {
            Ok(endpoint) => Ok(self.with_endpoint(endpoint)),
            Err(e) => Err((self, e)),
        }
    }

    /// Use a known endpoint instead of asking the platform.
    pub fn with_endpoint(self, endpoint: ServiceEndpoint) -> Deployment<Resolved> {
        let deploy_id = self.state.deploy_id.clone();
        self.with_state(Resolved {
            deploy_id,
            endpoint,
        })
    }
}

// =============================================================================
// Resolved -> Verified
// =============================================================================

impl Deployment<Resolved> {
    /// Probe the service until healthy or the attempt budget is spent.
    ///
    /// # Errors
    ///
    /// Returns `(self, unhealthy)` so the caller can apply its health policy
    /// (see `accept_unhealthy`).
    #[must_use = "deployment state must be used"]
    pub async fn verify<A: DeployApi, P: HealthProbe>(
        self,
        monitor: &Monitor<A, P>,
        health: &HealthConfig,
    ) -> TransitionResult<Verified, Resolved, Unhealthy> {
        match monitor
            .verify_health(&self.state.endpoint, health.attempts, health.interval)
            .await
        {
            Ok(healthy) => Ok(self.finish(HealthOutcome::Healthy(healthy))),
            Err(e) => Err((self, e)),
        }
    }

    /// Finish despite a failed health check (advisory health policy).
    pub fn accept_unhealthy(self, unhealthy: Unhealthy) -> Deployment<Verified> {
        self.finish(HealthOutcome::Advisory(unhealthy))
    }

    /// Finish without probing.
    pub fn skip_verification(self) -> Deployment<Verified> {
        self.finish(HealthOutcome::Skipped)
    }

    fn finish(self, health: HealthOutcome) -> Deployment<Verified> {
        let Resolved {
            deploy_id,
            endpoint,
        } = self.state.clone();
        self.with_state(Verified {
            deploy_id,
            endpoint,
            health,
        })
    }
}

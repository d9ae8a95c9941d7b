// ABOUTME: Deployment monitor: waits for a terminal deploy status, then verifies health.
// ABOUTME: Bounded by a deadline and a retry budget, cancellable through a CancellationToken.

mod backoff;
mod error;
mod health;
mod poll;
mod progress;
mod status;

pub use error::{MonitorError, MonitorErrorKind, Unhealthy};
pub use health::Healthy;
pub use progress::{Progress, Silent};
pub use status::{DeployStatus, PollResult, StatusClass};

use parking_lot::Mutex;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use snafu::ResultExt;

use crate::api::{DeployApi, DeployRequest, HealthProbe};
use crate::config::PollingConfig;
use crate::diagnostics::{Diagnostics, Warning};
use crate::types::{DeployId, ServiceEndpoint};
use error::{InterruptedSnafu, RequestSnafu};

/// Watches a deploy through the platform API and probes the deployed service.
///
/// All waiting happens on the calling task. Every sleep and every in-flight
/// request races the cancellation token, so a cancelled run returns promptly
/// with a `Cancelled` outcome instead of a success or failure claim.
pub struct Monitor<A, P> {
    api: A,
    probe: P,
    polling: PollingConfig,
    health_path: String,
    progress: Arc<dyn Progress>,
    diagnostics: Mutex<Diagnostics>,
    cancel: CancellationToken,
}

impl<A: DeployApi, P: HealthProbe> Monitor<A, P> {
    pub fn new(api: A, probe: P, cancel: CancellationToken) -> Self {
        Self {
            api,
            probe,
            polling: PollingConfig::default(),
            health_path: "/health".to_string(),
            progress: Arc::new(Silent),
            diagnostics: Mutex::new(Diagnostics::default()),
            cancel,
        }
    }

    pub fn polling(mut self, polling: PollingConfig) -> Self {
        self.polling = polling;
        self
    }

    pub fn health_path(mut self, path: impl Into<String>) -> Self {
        self.health_path = path.into();
        self
    }

    pub fn progress(mut self, progress: Arc<dyn Progress>) -> Self {
        self.progress = progress;
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn health_probe(&self) -> &P {
        &self.probe
    }

    /// Ask the platform to start a deploy. The request races the token.
    pub async fn trigger(&self, request: &DeployRequest) -> Result<DeployId, MonitorError> {
        const CALL: &str = "deploy trigger";
        match self.cancellable(self.api.trigger_deploy(request)).await {
            None => InterruptedSnafu { call: CALL }.fail(),
            Some(result) => result.context(RequestSnafu { call: CALL }),
        }
    }

    /// Look up the service's public URL. The request races the token.
    pub async fn service_url(&self) -> Result<ServiceEndpoint, MonitorError> {
        const CALL: &str = "service URL lookup";
        match self.cancellable(self.api.service_url()).await {
            None => InterruptedSnafu { call: CALL }.fail(),
            Some(result) => result.context(RequestSnafu { call: CALL }),
        }
    }

    /// Drain the warnings recorded so far.
    pub fn take_warnings(&self) -> Vec<Warning> {
        self.diagnostics.lock().take()
    }

    fn warn(&self, warning: Warning) {
        self.diagnostics.lock().warn(warning);
    }

    /// Run `fut` unless the token fires first.
    async fn cancellable<F: Future>(&self, fut: F) -> Option<F::Output> {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => None,
            out = fut => Some(out),
        }
    }

    /// Sleep for `delay`; `false` if cancelled meanwhile.
    async fn pause(&self, delay: Duration) -> bool {
        self.cancellable(tokio::time::sleep(delay)).await.is_some()
    }
}

// ABOUTME: Deploy status polling loop.
// ABOUTME: Stops on live or a failure status; retries transient errors with backoff until the budget runs out.

use snafu::IntoError;
use tokio::time::Instant;

use super::error::{
    ApiSnafu, CancelledSnafu, DeployFailedSnafu, MonitorError, RetriesExhaustedSnafu,
    TimedOutSnafu, UnknownStatusSnafu,
};
use super::status::{DeployStatus, PollResult, StatusClass};
use super::Monitor;
use super::backoff::Backoff;
use crate::api::{DeployApi, HealthProbe};
use crate::diagnostics::Warning;
use crate::types::DeployId;

impl<A: DeployApi, P: HealthProbe> Monitor<A, P> {
    /// Poll the deploy until it is live.
    ///
    /// Returns the observation that reported `live`. Every status query uses
    /// `deploy_id` unchanged. A recognized failure status ends the wait on the
    /// first observation. Transient API errors and unrecognized statuses share
    /// one consecutive budget (`max_consecutive_errors`); any in-progress
    /// status resets it.
    pub async fn await_deployment(&self, deploy_id: &DeployId) -> Result<PollResult, MonitorError> {
        let polling = &self.polling;
        let started = Instant::now();
        let deadline = started + polling.timeout;
        let mut backoff = Backoff::new(polling.interval, polling.max_backoff);
        let mut anomalies: u32 = 0;
        let mut last_status: Option<DeployStatus> = None;
        let mut attempt: u32 = 0;

        tracing::info!(deploy_id = %deploy_id, "waiting for deploy");

        loop {
            attempt += 1;

            let Some(response) = self.cancellable(self.api.deploy_status(deploy_id)).await else {
                return CancelledSnafu { deploy_id: deploy_id.clone() }.fail();
            };

            let delay = match response {
                Ok(raw) => {
                    let result = PollResult::new(attempt, &raw);
                    tracing::debug!(attempt, status = %result.status, raw = %result.raw, "deploy status");
                    self.progress.poll(&result);

                    match result.status.class() {
                        StatusClass::Success => {
                            tracing::info!(deploy_id = %deploy_id, attempt, "deploy is live");
                            return Ok(result);
                        }
                        StatusClass::Failure => {
                            return DeployFailedSnafu {
                                deploy_id: deploy_id.clone(),
                                status: result.status,
                            }
                            .fail();
                        }
                        StatusClass::InProgress => {
                            anomalies = 0;
                            backoff.reset();
                        }
                        StatusClass::Unknown => {
                            anomalies += 1;
                            if anomalies > polling.max_consecutive_errors {
                                return UnknownStatusSnafu {
                                    deploy_id: deploy_id.clone(),
                                    raw,
                                    attempts: anomalies,
                                }
                                .fail();
                            }
                            self.warn(Warning::unknown_status(format!(
                                "deploy {deploy_id} reported unrecognized status {raw:?}"
                            )));
                        }
                    }

                    last_status = Some(result.status);
                    polling.interval
                }
                Err(e) if e.is_transient() => {
                    self.progress.poll_error(attempt, &e);
                    anomalies += 1;
                    if anomalies > polling.max_consecutive_errors {
                        return Err(RetriesExhaustedSnafu {
                            deploy_id: deploy_id.clone(),
                            attempts: anomalies,
                        }
                        .into_error(e));
                    }
                    let delay = backoff.next_delay();
                    self.warn(Warning::transient_error(format!(
                        "status query {attempt} failed, retrying in {}s: {e}",
                        delay.as_secs()
                    )));
                    delay
                }
                Err(e) => {
                    self.progress.poll_error(attempt, &e);
                    return Err(ApiSnafu {
                        deploy_id: deploy_id.clone(),
                    }
                    .into_error(e));
                }
            };

            let now = Instant::now();
            if now + delay > deadline {
                return TimedOutSnafu {
                    deploy_id: deploy_id.clone(),
                    elapsed: now - started,
                    last_status,
                }
                .fail();
            }

            if !self.pause(delay).await {
                return CancelledSnafu { deploy_id: deploy_id.clone() }.fail();
            }
        }
    }

    /// Query the status once without waiting.
    pub async fn status_once(&self, deploy_id: &DeployId) -> Result<PollResult, MonitorError> {
        match self.cancellable(self.api.deploy_status(deploy_id)).await {
            None => CancelledSnafu { deploy_id: deploy_id.clone() }.fail(),
            Some(Ok(raw)) => Ok(PollResult::new(1, &raw)),
            Some(Err(e)) => Err(ApiSnafu {
                deploy_id: deploy_id.clone(),
            }
            .into_error(e)),
        }
    }
}

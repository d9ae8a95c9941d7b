// ABOUTME: Monitor error types with SNAFU pattern.
// ABOUTME: Distinguishes terminal deploy failure from timeouts, exhausted retries and cancellation.

use snafu::Snafu;
use std::time::Duration;

use super::status::DeployStatus;
use crate::api::{ApiError, ProbeError};
use crate::types::DeployId;

/// Why waiting for a deploy did not end in `live`.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum MonitorError {
    #[snafu(display("deploy {deploy_id} failed with status {status}"))]
    DeployFailed {
        deploy_id: DeployId,
        status: DeployStatus,
    },

    #[snafu(display(
        "deploy {deploy_id} did not finish within {}s (last status: {})",
        elapsed.as_secs(),
        last_status.as_ref().map_or("none", |s| s.as_str())
    ))]
    TimedOut {
        deploy_id: DeployId,
        elapsed: Duration,
        last_status: Option<DeployStatus>,
    },

    #[snafu(display("gave up on deploy {deploy_id} after {attempts} consecutive errors: {source}"))]
    RetriesExhausted {
        deploy_id: DeployId,
        attempts: u32,
        source: ApiError,
    },

    #[snafu(display(
        "deploy {deploy_id} kept reporting unrecognized status {raw:?} ({attempts} times)"
    ))]
    UnknownStatus {
        deploy_id: DeployId,
        raw: String,
        attempts: u32,
    },

    #[snafu(display("status query for deploy {deploy_id} failed: {source}"))]
    Api {
        deploy_id: DeployId,
        source: ApiError,
    },

    #[snafu(display("cancelled while waiting for deploy {deploy_id}"))]
    Cancelled { deploy_id: DeployId },

    #[snafu(display("{call} failed: {source}"))]
    Request {
        call: &'static str,
        source: ApiError,
    },

    #[snafu(display("cancelled during {call}"))]
    Interrupted { call: &'static str },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorErrorKind {
    /// The platform reported a failure status.
    DeployFailed,
    /// The polling deadline passed before a terminal status.
    TimedOut,
    /// Too many transient errors in a row.
    RetriesExhausted,
    /// Too many unrecognized statuses in a row.
    UnknownStatus,
    /// A non-retryable API error.
    Api,
    /// The caller cancelled the wait.
    Cancelled,
}

impl MonitorError {
    pub fn kind(&self) -> MonitorErrorKind {
        match self {
            MonitorError::DeployFailed { .. } => MonitorErrorKind::DeployFailed,
            MonitorError::TimedOut { .. } => MonitorErrorKind::TimedOut,
            MonitorError::RetriesExhausted { .. } => MonitorErrorKind::RetriesExhausted,
            MonitorError::UnknownStatus { .. } => MonitorErrorKind::UnknownStatus,
            MonitorError::Api { .. } | MonitorError::Request { .. } => MonitorErrorKind::Api,
            MonitorError::Cancelled { .. } | MonitorError::Interrupted { .. } => {
                MonitorErrorKind::Cancelled
            }
        }
    }

    /// The failure status, if the platform reported one.
    pub fn failed_status(&self) -> Option<&DeployStatus> {
        match self {
            MonitorError::DeployFailed { status, .. } => Some(status),
            _ => None,
        }
    }
}

/// Why health verification did not succeed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Unhealthy {
    #[error("{url} not healthy after {attempts} attempts (last: {last_error})")]
    Exhausted {
        url: String,
        attempts: u32,
        last_error: ProbeError,
    },

    #[error("health check of {url} cancelled after {attempts} attempts")]
    Cancelled { url: String, attempts: u32 },
}

impl Unhealthy {
    pub fn attempts(&self) -> u32 {
        match self {
            Unhealthy::Exhausted { attempts, .. } | Unhealthy::Cancelled { attempts, .. } => {
                *attempts
            }
        }
    }
}

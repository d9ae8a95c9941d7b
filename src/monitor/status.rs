// ABOUTME: Closed set of deploy statuses reported by the platform.
// ABOUTME: Maps raw status strings to in-progress, success, failure or unknown.

use std::fmt;

/// A deploy status as reported by the platform.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DeployStatus {
    Created,
    Queued,
    BuildInProgress,
    UpdateInProgress,
    PreDeployInProgress,
    Live,
    BuildFailed,
    UpdateFailed,
    PreDeployFailed,
    Canceled,
    Deactivated,
    /// A value this version does not recognize. Never treated as progress.
    Unknown(String),
}

/// How the monitor reacts to a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    InProgress,
    Success,
    Failure,
    Unknown,
}

impl DeployStatus {
    /// Exact, case-sensitive match. Anything else is `Unknown`, so a value
    /// like `LIVE` never counts as success.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "created" => DeployStatus::Created,
            "queued" => DeployStatus::Queued,
            "build_in_progress" | "building" => DeployStatus::BuildInProgress,
            "update_in_progress" | "updating" => DeployStatus::UpdateInProgress,
            "pre_deploy_in_progress" => DeployStatus::PreDeployInProgress,
            "live" => DeployStatus::Live,
            "build_failed" => DeployStatus::BuildFailed,
            "update_failed" => DeployStatus::UpdateFailed,
            "pre_deploy_failed" => DeployStatus::PreDeployFailed,
            "canceled" | "cancelled" => DeployStatus::Canceled,
            "deactivated" => DeployStatus::Deactivated,
            _ => DeployStatus::Unknown(raw.to_string()),
        }
    }

    pub fn class(&self) -> StatusClass {
        match self {
            DeployStatus::Created
            | DeployStatus::Queued
            | DeployStatus::BuildInProgress
            | DeployStatus::UpdateInProgress
            | DeployStatus::PreDeployInProgress => StatusClass::InProgress,
            DeployStatus::Live => StatusClass::Success,
            DeployStatus::BuildFailed
            | DeployStatus::UpdateFailed
            | DeployStatus::PreDeployFailed
            | DeployStatus::Canceled
            | DeployStatus::Deactivated => StatusClass::Failure,
            DeployStatus::Unknown(_) => StatusClass::Unknown,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            DeployStatus::Created => "created",
            DeployStatus::Queued => "queued",
            DeployStatus::BuildInProgress => "build_in_progress",
            DeployStatus::UpdateInProgress => "update_in_progress",
            DeployStatus::PreDeployInProgress => "pre_deploy_in_progress",
            DeployStatus::Live => "live",
            DeployStatus::BuildFailed => "build_failed",
            DeployStatus::UpdateFailed => "update_failed",
            DeployStatus::PreDeployFailed => "pre_deploy_failed",
            DeployStatus::Canceled => "canceled",
            DeployStatus::Deactivated => "deactivated",
            DeployStatus::Unknown(raw) => raw,
        }
    }
}

impl fmt::Display for DeployStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for StatusClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StatusClass::InProgress => "in progress",
            StatusClass::Success => "success",
            StatusClass::Failure => "failure",
            StatusClass::Unknown => "unknown",
        })
    }
}

/// One observation of a deploy's status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollResult {
    /// 1-based number of the status query that produced this result.
    pub attempt: u32,
    pub status: DeployStatus,
    /// The status string exactly as the platform sent it.
    pub raw: String,
}

impl PollResult {
    pub fn new(attempt: u32, raw: &str) -> Self {
        Self {
            attempt,
            status: DeployStatus::parse(raw),
            raw: raw.to_string(),
        }
    }
}

// ABOUTME: Application-wide error types for vigil.
// ABOUTME: Uses thiserror and maps every failure to a process exit code.

use std::path::PathBuf;
use thiserror::Error;

use crate::api::ApiError;
use crate::monitor::{MonitorError, MonitorErrorKind, Unhealthy};

/// Exit code when the deploy reached a failure status, or for setup errors.
pub const EXIT_FAILURE: i32 = 1;
/// Exit code when the service never answered its health endpoint.
pub const EXIT_UNHEALTHY: i32 = 2;
/// Exit code when the deploy outcome could not be determined in time.
pub const EXIT_INCONCLUSIVE: i32 = 3;
/// Exit code after Ctrl-C / SIGTERM.
pub const EXIT_CANCELLED: i32 = 130;

#[derive(Debug, Error)]
pub enum Error {
    #[error("file already exists: {0}")]
    AlreadyExists(PathBuf),

    #[error("configuration file not found in {0}")]
    ConfigNotFound(PathBuf),

    #[error("unknown destination: {0}")]
    UnknownDestination(String),

    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("platform API error: {0}")]
    Api(#[from] ApiError),

    #[error(transparent)]
    Monitor(#[from] MonitorError),

    #[error(transparent)]
    Unhealthy(#[from] Unhealthy),

    #[error("hook failed: {0}")]
    Hook(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Monitor(e) => match e.kind() {
                MonitorErrorKind::DeployFailed | MonitorErrorKind::Api => EXIT_FAILURE,
                MonitorErrorKind::TimedOut
                | MonitorErrorKind::RetriesExhausted
                | MonitorErrorKind::UnknownStatus => EXIT_INCONCLUSIVE,
                MonitorErrorKind::Cancelled => EXIT_CANCELLED,
            },
            Error::Unhealthy(Unhealthy::Cancelled { .. }) => EXIT_CANCELLED,
            Error::Unhealthy(Unhealthy::Exhausted { .. }) => EXIT_UNHEALTHY,
            _ => EXIT_FAILURE,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

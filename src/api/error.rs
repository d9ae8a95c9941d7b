// ABOUTME: Error types for platform API calls and health probes.
// ABOUTME: Separates transient failures (retry) from permanent ones (stop).

use crate::types::EndpointError;

/// Errors from calls to the platform API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("failed to build HTTP client: {0}")]
    Client(String),

    #[error("request failed: {0}")]
    Transport(String),

    #[error("unexpected HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("response is missing field {0}")]
    MissingField(&'static str),

    #[error("platform returned an invalid service URL: {0}")]
    InvalidServiceUrl(#[from] EndpointError),
}

impl ApiError {
    /// Whether repeating the same request may succeed.
    ///
    /// Client errors other than 429 are permanent: a wrong key or id will not
    /// fix itself between polls.
    pub fn is_transient(&self) -> bool {
        match self {
            ApiError::Transport(_) | ApiError::Decode(_) | ApiError::MissingField(_) => true,
            ApiError::Status { status, .. } => *status == 429 || *status >= 500,
            ApiError::Client(_) | ApiError::InvalidServiceUrl(_) => false,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else if err.is_builder() {
            ApiError::Client(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

/// Why a single health probe did not count as healthy.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProbeError {
    #[error("HTTP {0}")]
    Status(u16),

    #[error("timed out")]
    Timeout,

    #[error("{0}")]
    Transport(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_errors_and_throttling_are_transient() {
        for status in [429, 500, 502, 503] {
            let err = ApiError::Status {
                status,
                body: String::new(),
            };
            assert!(err.is_transient(), "{status} should be retried");
        }
    }

    #[test]
    fn client_errors_are_permanent() {
        for status in [400, 401, 403, 404] {
            let err = ApiError::Status {
                status,
                body: String::new(),
            };
            assert!(!err.is_transient(), "{status} should not be retried");
        }
        assert!(!ApiError::Client("bad".into()).is_transient());
    }

    #[test]
    fn missing_fields_are_retried() {
        assert!(ApiError::MissingField("deploy.status").is_transient());
        assert!(ApiError::Transport("connection reset".into()).is_transient());
    }
}

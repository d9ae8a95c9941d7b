// ABOUTME: Deployment status polling settings.
// ABOUTME: Poll interval, overall deadline, and the transient error budget with backoff cap.

use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PollingConfig {
    /// Delay between status queries while the deploy is in progress.
    #[serde(with = "humantime_serde")]
    pub interval: Duration,

    /// Give up waiting for a terminal status after this long.
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,

    /// Consecutive transient errors or unknown statuses tolerated before
    /// the run is aborted.
    pub max_consecutive_errors: u32,

    /// Upper bound for the exponential backoff after transient errors.
    #[serde(with = "humantime_serde")]
    pub max_backoff: Duration,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(30),
            timeout: Duration::from_secs(30 * 60),
            max_consecutive_errors: 5,
            max_backoff: Duration::from_secs(120),
        }
    }
}

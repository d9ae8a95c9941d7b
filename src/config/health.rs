// ABOUTME: Post-deploy health verification settings.
// ABOUTME: Probe path, attempt budget, spacing, per-probe timeout and failure policy.

use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HealthConfig {
    /// Path probed on the service's public URL.
    pub path: String,

    /// Number of probes before giving up.
    pub attempts: u32,

    /// Delay between failed probes.
    #[serde(with = "humantime_serde")]
    pub interval: Duration,

    /// Timeout for a single probe request.
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,

    /// When false, exhausting all probes is reported as a warning and the
    /// run still succeeds.
    pub required: bool,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            path: "/health".to_string(),
            attempts: 10,
            interval: Duration::from_secs(30),
            timeout: Duration::from_secs(10),
            required: true,
        }
    }
}

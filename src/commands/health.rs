// ABOUTME: Health command implementation.
// ABOUTME: Probes a service's health endpoint without deploying.

use super::connection::connect;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use vigil::config::Config;
use vigil::error::Result;
use vigil::output::Output;
use vigil::types::ServiceEndpoint;

/// Overrides for a one-off health check.
#[derive(Debug, Default)]
pub struct HealthOptions {
    pub url: Option<ServiceEndpoint>,
    pub attempts: Option<u32>,
    pub interval: Option<Duration>,
}

/// Always fails on exhaustion, regardless of `health.required`: the user
/// asked for the check explicitly.
pub async fn health(
    config: Config,
    options: HealthOptions,
    mut output: Output,
    cancel: CancellationToken,
) -> Result<()> {
    output.start_timer();
    let output = Arc::new(output);
    let monitor = connect(&config, output.clone(), cancel)?;

    let endpoint = match options.url {
        Some(url) => url,
        None => monitor.service_url().await?,
    };
    let attempts = options.attempts.unwrap_or(config.health.attempts);
    let interval = options.interval.unwrap_or(config.health.interval);

    output.progress(&format!(
        "Checking {} ({} attempt(s), {}s apart)",
        endpoint.join(&config.health.path),
        attempts.max(1),
        interval.as_secs()
    ));

    let healthy = monitor.verify_health(&endpoint, attempts, interval).await?;
    output.success(&format!(
        "{endpoint} is healthy (HTTP {}, attempt {})",
        healthy.status, healthy.attempts
    ));
    Ok(())
}

// ABOUTME: Shared helper for building the platform client and monitor.
// ABOUTME: Eliminates duplication across deploy, watch, health and status commands.

use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use vigil::api::{HttpProbe, RenderClient};
use vigil::config::Config;
use vigil::error::Result;
use vigil::monitor::Monitor;
use vigil::output::Output;

pub type PlatformMonitor = Monitor<RenderClient, HttpProbe>;

/// Resolve credentials and wire the API client, probe and progress output
/// into a monitor.
pub fn connect(
    config: &Config,
    output: Arc<Output>,
    cancel: CancellationToken,
) -> Result<PlatformMonitor> {
    let api = RenderClient::new(config.api_config()?)?;
    let probe = HttpProbe::new(config.health.timeout)?;

    tracing::debug!(
        service_id = %config.service_id,
        api_url = %config.api_url,
        "connecting to platform"
    );

    Ok(Monitor::new(api, probe, cancel)
        .polling(config.polling.clone())
        .health_path(config.health.path.clone())
        .progress(output))
}

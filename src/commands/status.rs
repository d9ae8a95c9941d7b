// ABOUTME: Status command implementation.
// ABOUTME: Queries a deploy's status once and prints it with its classification.

use super::connection::connect;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use vigil::config::Config;
use vigil::error::{Error, Result};
use vigil::output::Output;
use vigil::types::DeployId;

pub async fn status(
    config: Config,
    deploy_id: String,
    output: Output,
    cancel: CancellationToken,
) -> Result<()> {
    let deploy_id = DeployId::new(deploy_id.trim());
    if deploy_id.is_blank() {
        return Err(Error::InvalidConfig("deploy id cannot be empty".into()));
    }

    let output = Arc::new(output);
    let monitor = connect(&config, output.clone(), cancel)?;
    let result = monitor.status_once(&deploy_id).await?;

    output.success(&format!(
        "Deploy {deploy_id}: {} ({})",
        result.status,
        result.status.class()
    ));
    Ok(())
}

// ABOUTME: Watch command implementation.
// ABOUTME: Follows a deploy started elsewhere through live and health verification.

use super::connection::connect;
use super::deploy::{banner, emit_warnings, follow};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use vigil::config::Config;
use vigil::deploy::{Deployment, Triggered};
use vigil::diagnostics::Diagnostics;
use vigil::error::{Error, Result};
use vigil::output::Output;
use vigil::types::DeployId;

pub async fn watch(
    config: Config,
    deploy_id: String,
    skip_health: bool,
    mut output: Output,
    cancel: CancellationToken,
) -> Result<()> {
    let deploy_id = DeployId::new(deploy_id.trim());
    if deploy_id.is_blank() {
        return Err(Error::InvalidConfig("deploy id cannot be empty".into()));
    }

    output.start_timer();
    let output = Arc::new(output);
    let mut diag = Diagnostics::default();
    let monitor = connect(&config, output.clone(), cancel)?;

    let deployment = Deployment::<Triggered>::existing(
        config.service_id.clone(),
        deploy_id,
        config.destination.clone(),
    );

    let result = follow(deployment, &monitor, &config, skip_health, &output, &mut diag).await;
    emit_warnings(&output, &diag);

    let done = result?;
    output.success(&banner(&done));
    Ok(())
}

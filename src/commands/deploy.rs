// ABOUTME: Deploy command implementation.
// ABOUTME: Runs hooks, triggers the deploy, and follows it through live and health verification.

use super::connection::{PlatformMonitor, connect};
use std::env;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use vigil::api::DeployRequest;
use vigil::config::Config;
use vigil::deploy::{Deployment, HealthOutcome, Triggered, Verified};
use vigil::diagnostics::{Diagnostics, Warning};
use vigil::error::{Error, Result};
use vigil::hooks::{HookContext, HookPoint, HookRunner};
use vigil::monitor::Unhealthy;
use vigil::output::Output;
use vigil::types::ImageRef;

/// Trigger a deploy of `image` (or the configured image) and follow it.
pub async fn deploy(
    config: Config,
    image: Option<ImageRef>,
    skip_health: bool,
    mut output: Output,
    cancel: CancellationToken,
) -> Result<()> {
    output.start_timer();
    let output = Arc::new(output);
    let cwd = env::current_dir()?;
    let hook_runner = HookRunner::new(&cwd);
    let mut diag = Diagnostics::default();

    let image = image.or_else(|| config.image.clone());
    if let Some(ref img) = image
        && !img.is_pinned()
    {
        diag.warn(Warning::unpinned_image(format!(
            "{img} uses a mutable tag; the deployed version cannot be traced"
        )));
    }

    let mut context = HookContext::new(config.service_id.clone(), config.destination.clone());
    context.image = image.clone();

    run_hook(&hook_runner, HookPoint::PreDeploy, &context, &output, &mut diag).await?;

    output.progress(&format!(
        "Deploying {} to service {}{}",
        image
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| "the current image".to_string()),
        config.service_id,
        config
            .destination
            .as_ref()
            .map(|d| format!(" ({d})"))
            .unwrap_or_default()
    ));

    let request = DeployRequest {
        image,
        clear_cache: config.clear_cache,
    };

    let result = run_deploy(
        &config,
        &request,
        skip_health,
        &output,
        cancel,
        &mut context,
        &mut diag,
    )
    .await;

    match result {
        Ok(done) => {
            context.service_url = Some(done.endpoint().clone());
            context.status = Some("live".to_string());

            run_hook(&hook_runner, HookPoint::PostDeploy, &context, &output, &mut diag).await?;

            emit_warnings(&output, &diag);
            output.success(&banner(&done));
            Ok(())
        }
        Err(e) => {
            context.status = Some(e.to_string());
            run_hook(&hook_runner, HookPoint::OnError, &context, &output, &mut diag).await?;

            emit_warnings(&output, &diag);
            Err(e)
        }
    }
}

/// Run the hook for `point`, if one exists.
///
/// A failing fatal hook aborts the run; any other failing hook only adds a
/// warning. Hook stderr goes through `output` so `--json` stays parseable.
async fn run_hook(
    runner: &HookRunner,
    point: HookPoint,
    context: &HookContext,
    output: &Output,
    diag: &mut Diagnostics,
) -> Result<()> {
    let Some(result) = runner.run(point, context).await else {
        return Ok(());
    };
    if result.success {
        return Ok(());
    }

    let stderr = result.stderr.trim();
    if !stderr.is_empty() {
        output.warning(&format!("{} hook: {stderr}", point.filename()));
    }

    let message = format!("{} hook failed", point.filename());
    if point.is_fatal() {
        return Err(Error::Hook(message));
    }
    diag.warn(Warning::hook(message));
    Ok(())
}

async fn run_deploy(
    config: &Config,
    request: &DeployRequest,
    skip_health: bool,
    output: &Arc<Output>,
    cancel: CancellationToken,
    context: &mut HookContext,
    diag: &mut Diagnostics,
) -> Result<Deployment<Verified>> {
    let monitor = connect(config, output.clone(), cancel)?;

    let deployment =
        Deployment::<Triggered>::trigger(&monitor, request, config.destination.clone()).await?;
    context.deploy_id = Some(deployment.deploy_id().clone());
    output.progress(&format!("  → Triggered deploy {}", deployment.deploy_id()));

    follow(deployment, &monitor, config, skip_health, output, diag).await
}

/// Wait for a triggered deploy to go live, resolve its URL and apply the
/// health policy. Shared with `watch`.
pub(super) async fn follow(
    deployment: Deployment<Triggered>,
    monitor: &PlatformMonitor,
    config: &Config,
    skip_health: bool,
    output: &Output,
    diag: &mut Diagnostics,
) -> Result<Deployment<Verified>> {
    output.progress(&format!(
        "  → Waiting for deploy {} to go live...",
        deployment.deploy_id()
    ));
    let live = deployment.await_live(monitor).await;
    diag.extend(monitor.take_warnings());
    let live = live?;

    output.progress(&format!(
        "  ✓ Deploy {} is live ({} status queries)",
        live.deploy_id(),
        live.polls()
    ));

    let resolved = live
        .resolve_endpoint(monitor)
        .await
        .map_err(|(_, e)| Error::Monitor(e))?;

    if skip_health {
        output.progress("  → Skipping health check");
        return Ok(resolved.skip_verification());
    }

    output.progress(&format!(
        "  → Verifying health at {}",
        resolved.endpoint().join(&config.health.path)
    ));

    match resolved.verify(monitor, &config.health).await {
        Ok(verified) => Ok(verified),
        Err((resolved, unhealthy)) => match unhealthy {
            Unhealthy::Exhausted { .. } if !config.health.required => {
                diag.warn(Warning::advisory_health(format!(
                    "{unhealthy} (health.required is false, continuing)"
                )));
                Ok(resolved.accept_unhealthy(unhealthy))
            }
            unhealthy => Err(unhealthy.into()),
        },
    }
}

pub(super) fn emit_warnings(output: &Output, diag: &Diagnostics) {
    for warning in diag.warnings() {
        output.warning(&warning.message);
    }
}

pub(super) fn banner(done: &Deployment<Verified>) -> String {
    match done.health() {
        HealthOutcome::Healthy(h) => format!(
            "Deploy {} is live and healthy at {} (after {} probe(s))",
            done.deploy_id(),
            done.endpoint(),
            h.attempts
        ),
        HealthOutcome::Advisory(_) => format!(
            "Deploy {} is live at {} but never reported healthy",
            done.deploy_id(),
            done.endpoint()
        ),
        HealthOutcome::Skipped => format!(
            "Deploy {} is live at {}",
            done.deploy_id(),
            done.endpoint()
        ),
    }
}

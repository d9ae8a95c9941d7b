// ABOUTME: Integration tests for deploy lifecycle hooks.
// ABOUTME: Runs real scripts at each hook point and checks what they see of the run.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use tempfile::TempDir;
use vigil::api::ProbeError;
use vigil::error::Error;
use vigil::hooks::{HookContext, HookPoint, HookRunner};
use vigil::monitor::Unhealthy;
use vigil::types::{DeployId, ImageRef, ServiceEndpoint, ServiceId};

fn write_hook(project: &Path, point: HookPoint, script: &str, mode: u32) {
    let hooks_dir = project.join(".vigil").join("hooks");
    fs::create_dir_all(&hooks_dir).unwrap();

    let path = hooks_dir.join(point.filename());
    fs::write(&path, script).unwrap();
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(mode);
    fs::set_permissions(&path, perms).unwrap();
}

fn install(project: &Path, point: HookPoint, script: &str) {
    write_hook(project, point, script, 0o755);
}

/// Context as the deploy command builds it before anything is triggered.
fn before_trigger() -> HookContext {
    let mut context = HookContext::new(ServiceId::new("srv-shop"), Some("production".into()));
    context.image = Some(ImageRef::parse("ghcr.io/acme/shop:2.4.1").unwrap());
    context
}

const PRINT_RUN: &str = r#"#!/bin/sh
echo "service=$VIGIL_SERVICE_ID"
echo "destination=${VIGIL_DESTINATION:-none}"
echo "image=${VIGIL_IMAGE:-none}"
echo "deploy=${VIGIL_DEPLOY_ID:-none}"
echo "url=${VIGIL_SERVICE_URL:-none}"
echo "status=${VIGIL_STATUS:-none}"
"#;

#[tokio::test]
async fn pre_deploy_sees_image_but_no_deploy_yet() {
    let project = TempDir::new().unwrap();
    install(project.path(), HookPoint::PreDeploy, PRINT_RUN);

    let result = HookRunner::new(project.path())
        .run(HookPoint::PreDeploy, &before_trigger())
        .await
        .unwrap();

    assert!(result.success);
    assert!(result.stdout.contains("service=srv-shop"));
    assert!(result.stdout.contains("destination=production"));
    assert!(result.stdout.contains("image=ghcr.io/acme/shop:2.4.1"));
    assert!(result.stdout.contains("deploy=none"));
    assert!(result.stdout.contains("url=none"));
    assert!(result.stdout.contains("status=none"));
}

#[tokio::test]
async fn post_deploy_sees_the_live_service() {
    let project = TempDir::new().unwrap();
    install(project.path(), HookPoint::PostDeploy, PRINT_RUN);

    let mut context = before_trigger();
    context.deploy_id = Some(DeployId::new("dep-c0ffee"));
    context.service_url = Some(ServiceEndpoint::parse("https://shop.example.com").unwrap());
    context.status = Some("live".into());

    let result = HookRunner::new(project.path())
        .run(HookPoint::PostDeploy, &context)
        .await
        .unwrap();

    assert!(result.success);
    assert!(result.stdout.contains("deploy=dep-c0ffee"));
    assert!(result.stdout.contains("url=https://shop.example.com"));
    assert!(result.stdout.contains("status=live"));
}

#[tokio::test]
async fn on_error_sees_the_failure_message() {
    let project = TempDir::new().unwrap();
    install(
        project.path(),
        HookPoint::OnError,
        "#!/bin/sh\nprintf '%s' \"$VIGIL_STATUS\"\n",
    );

    let failure = Error::from(Unhealthy::Exhausted {
        url: "https://shop.example.com/health".into(),
        attempts: 3,
        last_error: ProbeError::Status(503),
    });
    let mut context = before_trigger();
    context.deploy_id = Some(DeployId::new("dep-c0ffee"));
    context.status = Some(failure.to_string());

    let result = HookRunner::new(project.path())
        .run(HookPoint::OnError, &context)
        .await
        .unwrap();

    assert!(result.success);
    assert_eq!(result.stdout, failure.to_string());
    assert!(result.stdout.contains("not healthy after 3 attempts"));
}

#[tokio::test]
async fn failing_pre_deploy_hook_reports_exit_code_and_stderr() {
    let project = TempDir::new().unwrap();
    install(
        project.path(),
        HookPoint::PreDeploy,
        "#!/bin/sh\necho 'migrations pending' >&2\nexit 3\n",
    );

    let result = HookRunner::new(project.path())
        .run(HookPoint::PreDeploy, &before_trigger())
        .await
        .unwrap();

    assert!(!result.success);
    assert_eq!(result.exit_code, Some(3));
    assert_eq!(result.stderr.trim(), "migrations pending");
    assert!(HookPoint::PreDeploy.is_fatal());
}

#[tokio::test]
async fn hook_without_execute_bit_fails_to_start() {
    let project = TempDir::new().unwrap();
    write_hook(project.path(), HookPoint::PostDeploy, PRINT_RUN, 0o644);

    let runner = HookRunner::new(project.path());
    assert!(runner.hook_exists(HookPoint::PostDeploy));

    let result = runner
        .run(HookPoint::PostDeploy, &before_trigger())
        .await
        .unwrap();

    assert!(!result.success);
    assert_eq!(result.exit_code, None);
    assert!(!result.stderr.is_empty());
    assert!(!HookPoint::PostDeploy.is_fatal());
}

#[tokio::test]
async fn hooks_get_no_stdin() {
    let project = TempDir::new().unwrap();
    install(
        project.path(),
        HookPoint::PreDeploy,
        "#!/bin/sh\nif read -r line; then exit 1; fi\nexit 0\n",
    );

    let result = HookRunner::new(project.path())
        .run(HookPoint::PreDeploy, &before_trigger())
        .await
        .unwrap();

    assert!(result.success);
}

#[tokio::test]
async fn project_without_hooks_runs_nothing() {
    let project = TempDir::new().unwrap();
    let runner = HookRunner::new(project.path());

    for point in [HookPoint::PreDeploy, HookPoint::PostDeploy, HookPoint::OnError] {
        assert!(!runner.hook_exists(point));
        assert!(runner.run(point, &before_trigger()).await.is_none());
    }
}

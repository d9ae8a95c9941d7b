// ABOUTME: Lifecycle hooks around a deploy run.
// ABOUTME: Discovers and executes .vigil/hooks/{pre-deploy,post-deploy,on-error} with run details in the environment.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

use crate::types::{DeployId, ImageRef, ServiceEndpoint, ServiceId};

/// Hook execution points in the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookPoint {
    /// Before the deploy is triggered. Failure aborts the run.
    PreDeploy,
    /// After the deploy is live and verified. Failure logs a warning.
    PostDeploy,
    /// After any failure. Failure logs a warning.
    OnError,
}

impl HookPoint {
    /// Get the hook filename for this point.
    pub fn filename(&self) -> &'static str {
        match self {
            HookPoint::PreDeploy => "pre-deploy",
            HookPoint::PostDeploy => "post-deploy",
            HookPoint::OnError => "on-error",
        }
    }

    /// Whether failure at this hook point should abort the run.
    pub fn is_fatal(&self) -> bool {
        matches!(self, HookPoint::PreDeploy)
    }
}

/// Run details passed to hooks via environment variables.
#[derive(Debug, Clone)]
pub struct HookContext {
    pub service_id: ServiceId,
    pub destination: Option<String>,
    pub image: Option<ImageRef>,
    pub deploy_id: Option<DeployId>,
    pub service_url: Option<ServiceEndpoint>,
    /// Last known deploy status, or the failure description for on-error.
    pub status: Option<String>,
}

impl HookContext {
    pub fn new(service_id: ServiceId, destination: Option<String>) -> Self {
        Self {
            service_id,
            destination,
            image: None,
            deploy_id: None,
            service_url: None,
            status: None,
        }
    }

    /// Convert context to environment variables. Unknown values are omitted.
    pub fn to_env(&self) -> HashMap<String, String> {
        let mut env = HashMap::new();
        env.insert("VIGIL_SERVICE_ID".to_string(), self.service_id.to_string());
        if let Some(ref destination) = self.destination {
            env.insert("VIGIL_DESTINATION".to_string(), destination.clone());
        }
        if let Some(ref image) = self.image {
            env.insert("VIGIL_IMAGE".to_string(), image.to_string());
        }
        if let Some(ref deploy_id) = self.deploy_id {
            env.insert("VIGIL_DEPLOY_ID".to_string(), deploy_id.to_string());
        }
        if let Some(ref url) = self.service_url {
            env.insert("VIGIL_SERVICE_URL".to_string(), url.to_string());
        }
        if let Some(ref status) = self.status {
            env.insert("VIGIL_STATUS".to_string(), status.clone());
        }
        env
    }
}

/// Result of running a hook.
#[derive(Debug)]
pub struct HookResult {
    pub success: bool,
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

/// Discovers and runs hooks from a project directory.
pub struct HookRunner {
    hooks_dir: PathBuf,
}

impl HookRunner {
    /// Create a new hook runner looking for hooks in the given project directory.
    pub fn new(project_dir: &Path) -> Self {
        Self {
            hooks_dir: project_dir.join(".vigil").join("hooks"),
        }
    }

    /// Check if a hook exists for the given point.
    pub fn hook_exists(&self, point: HookPoint) -> bool {
        self.hook_path(point).is_file()
    }

    fn hook_path(&self, point: HookPoint) -> PathBuf {
        self.hooks_dir.join(point.filename())
    }

    /// Run a hook if it exists.
    ///
    /// Returns None if the hook doesn't exist, or Some(HookResult) if it was run.
    pub async fn run(&self, point: HookPoint, context: &HookContext) -> Option<HookResult> {
        let hook_path = self.hook_path(point);

        if !hook_path.is_file() {
            return None;
        }

        tracing::info!(hook = point.filename(), path = %hook_path.display(), "running hook");

        let output = Command::new(&hook_path)
            .envs(context.to_env())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await;

        let result = match output {
            Ok(output) => HookResult {
                success: output.status.success(),
                exit_code: output.status.code(),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            },
            Err(e) => {
                tracing::error!(hook = point.filename(), error = %e, "failed to execute hook");
                HookResult {
                    success: false,
                    exit_code: None,
                    stdout: String::new(),
                    stderr: e.to_string(),
                }
            }
        };

        if result.success {
            tracing::info!(hook = point.filename(), "hook completed");
        } else {
            tracing::warn!(
                hook = point.filename(),
                exit_code = ?result.exit_code,
                "hook failed"
            );
        }

        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hook_point_filenames() {
        assert_eq!(HookPoint::PreDeploy.filename(), "pre-deploy");
        assert_eq!(HookPoint::PostDeploy.filename(), "post-deploy");
        assert_eq!(HookPoint::OnError.filename(), "on-error");
    }

    #[test]
    fn pre_deploy_is_fatal() {
        assert!(HookPoint::PreDeploy.is_fatal());
        assert!(!HookPoint::PostDeploy.is_fatal());
        assert!(!HookPoint::OnError.is_fatal());
    }

    #[test]
    fn hook_context_to_env() {
        let mut context = HookContext::new(ServiceId::new("srv-1"), Some("staging".into()));
        context.image = Some(ImageRef::parse("ghcr.io/org/app:v2").unwrap());
        context.deploy_id = Some(DeployId::new("dep-7"));
        context.service_url = Some(ServiceEndpoint::parse("https://app.example.com").unwrap());
        context.status = Some("live".into());

        let env = context.to_env();
        assert_eq!(env.get("VIGIL_SERVICE_ID"), Some(&"srv-1".to_string()));
        assert_eq!(env.get("VIGIL_DESTINATION"), Some(&"staging".to_string()));
        assert_eq!(env.get("VIGIL_IMAGE"), Some(&"ghcr.io/org/app:v2".to_string()));
        assert_eq!(env.get("VIGIL_DEPLOY_ID"), Some(&"dep-7".to_string()));
        assert_eq!(
            env.get("VIGIL_SERVICE_URL"),
            Some(&"https://app.example.com".to_string())
        );
        assert_eq!(env.get("VIGIL_STATUS"), Some(&"live".to_string()));
    }

    #[test]
    fn hook_context_omits_unknown_values() {
        let env = HookContext::new(ServiceId::new("srv-1"), None).to_env();
        assert_eq!(env.len(), 1);
        assert!(!env.contains_key("VIGIL_DEPLOY_ID"));
    }

    #[test]
    fn hook_runner_checks_hooks_dir() {
        let runner = HookRunner::new(Path::new("/nonexistent"));
        assert!(!runner.hook_exists(HookPoint::PreDeploy));
    }
}

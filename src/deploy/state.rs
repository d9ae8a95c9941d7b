// ABOUTME: Deploy state types for the type state pattern.
// ABOUTME: Each state carries the data that is guaranteed to exist at that point.

use crate::monitor::{Healthy, Unhealthy};
use crate::types::{DeployId, ServiceEndpoint};

/// Deploy exists on the platform; outcome not yet known.
/// Available actions: `await_live()`
#[derive(Debug, Clone)]
pub struct Triggered {
    pub(crate) deploy_id: DeployId,
}

/// The platform reported `live`.
/// Available actions: `resolve_endpoint()`, `with_endpoint()`
#[derive(Debug, Clone)]
pub struct Live {
    pub(crate) deploy_id: DeployId,
    pub(crate) polls: u32,
}

/// Public URL of the service is known.
/// Available actions: `verify()`, `skip_verification()`, `accept_unhealthy()`
#[derive(Debug, Clone)]
pub struct Resolved {
    pub(crate) deploy_id: DeployId,
    pub(crate) endpoint: ServiceEndpoint,
}

/// Terminal state: the run is over.
#[derive(Debug, Clone)]
pub struct Verified {
    pub(crate) deploy_id: DeployId,
    pub(crate) endpoint: ServiceEndpoint,
    pub(crate) health: HealthOutcome,
}

/// How health verification ended for a finished deploy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthOutcome {
    Healthy(Healthy),
    /// Never healthy, but health was configured as advisory.
    Advisory(Unhealthy),
    /// Verification was not requested.
    Skipped,
}

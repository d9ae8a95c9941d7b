// ABOUTME: Generic deploy struct parameterized by state.
// ABOUTME: Context shared by every state plus state-specific accessors.

use crate::types::{DeployId, ImageRef, ServiceEndpoint, ServiceId};

use super::state::{HealthOutcome, Live, Resolved, Triggered, Verified};

/// A deploy in progress, parameterized by its current state.
///
/// The state type carries state-specific data (the deploy id, the resolved
/// endpoint, the health outcome) so that, for example, a health check cannot
/// be attempted before the platform has reported the deploy as live.
#[derive(Debug)]
pub struct Deployment<S> {
    pub(crate) service_id: ServiceId,
    pub(crate) destination: Option<String>,
    pub(crate) image: Option<ImageRef>,
    pub(crate) state: S,
}

impl<S> Deployment<S> {
    pub fn service_id(&self) -> &ServiceId {
        &self.service_id
    }

    /// Destination name, when the run targets one.
    pub fn destination(&self) -> Option<&str> {
        self.destination.as_deref()
    }

    /// Image sent with the trigger, if known.
    pub fn image(&self) -> Option<&ImageRef> {
        self.image.as_ref()
    }

    pub(crate) fn with_state<T>(self, state: T) -> Deployment<T> {
        Deployment {
            service_id: self.service_id,
            destination: self.destination,
            image: self.image,
            state,
        }
    }
}

impl Deployment<Triggered> {
    pub fn deploy_id(&self) -> &DeployId {
        &self.state.deploy_id
    }
}

impl Deployment<Live> {
    pub fn deploy_id(&self) -> &DeployId {
        &self.state.deploy_id
    }

    /// Status queries it took to observe `live`.
    pub fn polls(&self) -> u32 {
        self.state.polls
    }
}

impl Deployment<Resolved> {
    pub fn deploy_id(&self) -> &DeployId {
        &self.state.deploy_id
    }

    pub fn endpoint(&self) -> &ServiceEndpoint {
        &self.state.endpoint
    }
}

impl Deployment<Verified> {
    pub fn deploy_id(&self) -> &DeployId {
        &self.state.deploy_id
    }

    pub fn endpoint(&self) -> &ServiceEndpoint {
        &self.state.endpoint
    }

    pub fn health(&self) -> &HealthOutcome {
        &self.state.health
    }
}

// ABOUTME: Deploy lifecycle using the type state pattern.
// ABOUTME: Triggered -> Live -> Resolved -> Verified; health can only be checked on a live deploy.

mod deployment;
mod state;
mod transitions;

pub use deployment::Deployment;
pub use state::{HealthOutcome, Live, Resolved, Triggered, Verified};
pub use transitions::TransitionResult;

// ABOUTME: Command module aggregator for the vigil CLI.
// ABOUTME: Re-exports deploy, watch, health and status command handlers.

mod connection;
mod deploy;
mod health;
mod status;
mod watch;

pub use deploy::deploy;
pub use health::{HealthOptions, health};
pub use status::status;
pub use watch::watch;

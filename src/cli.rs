// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines global output flags and all subcommands with their arguments.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "vigil")]
#[command(about = "Trigger, watch and health-check deploys on a hosted service platform")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print the final result (for CI)
    #[arg(short, long, global = true, conflicts_with = "json")]
    pub quiet: bool,

    /// Print JSON lines instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Path to the config file (default: discover vigil.yml, then RENDER_* variables)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Target destination (defined in config)
    #[arg(short, long, global = true)]
    pub destination: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new vigil.yml configuration file
    Init {
        /// Platform service id (e.g. srv-abc123)
        #[arg(long)]
        service_id: Option<String>,

        /// Image to deploy (e.g. ghcr.io/org/app:v1)
        #[arg(long)]
        image: Option<String>,

        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Trigger a deploy, wait for it to go live, then verify health
    Deploy {
        /// Image to deploy (overrides the config)
        #[arg(long)]
        image: Option<String>,

        /// Skip the post-deploy health check
        #[arg(long)]
        no_health: bool,
    },

    /// Wait for an existing deploy to go live, then verify health
    Watch {
        /// Deploy id returned by the platform
        deploy_id: String,

        /// Skip the post-deploy health check
        #[arg(long)]
        no_health: bool,
    },

    /// Probe the service's health endpoint
    Health {
        /// Base URL of the service (default: ask the platform)
        #[arg(long)]
        url: Option<String>,

        /// Number of probes before giving up
        #[arg(long)]
        attempts: Option<u32>,

        /// Seconds between failed probes
        #[arg(long)]
        interval: Option<u64>,
    },

    /// Show the current status of a deploy
    Status {
        /// Deploy id returned by the platform
        deploy_id: String,
    },
}

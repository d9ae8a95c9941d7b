// ABOUTME: Entry point for the vigil CLI application.
// ABOUTME: Sets up logging and signal-driven cancellation, dispatches commands, maps errors to exit codes.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use std::env;
use std::path::PathBuf;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;
use vigil::config::{self, Config};
use vigil::error::{Error, Result};
use vigil::output::{Output, OutputMode};
use vigil::types::{ImageRef, ServiceEndpoint};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let mode = if cli.json {
        OutputMode::Json
    } else if cli.quiet {
        OutputMode::Quiet
    } else {
        OutputMode::Normal
    };

    let cancel = CancellationToken::new();
    let cancel_on_signal = cancel.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        tracing::info!("shutdown signal received, cancelling");
        cancel_on_signal.cancel();
    });

    if let Err(e) = run(cli, mode, cancel).await {
        Output::new(mode).error(&e.to_string());
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli, mode: OutputMode, cancel: CancellationToken) -> Result<()> {
    let output = Output::new(mode);

    match cli.command {
        Commands::Init {
            service_id,
            image,
            force,
        } => {
            let cwd = env::current_dir()?;
            config::init_config(&cwd, service_id.as_deref(), image.as_deref(), force)?;
            output.success(&format!("Created {}", config::CONFIG_FILENAME));
            Ok(())
        }
        Commands::Deploy { image, no_health } => {
            let config = load_config(cli.config, cli.destination)?;
            let image = image.as_deref().map(parse_image).transpose()?;
            commands::deploy(config, image, no_health, output, cancel).await
        }
        Commands::Watch {
            deploy_id,
            no_health,
        } => {
            let config = load_config(cli.config, cli.destination)?;
            commands::watch(config, deploy_id, no_health, output, cancel).await
        }
        Commands::Health {
            url,
            attempts,
            interval,
        } => {
            let config = load_config(cli.config, cli.destination)?;
            let url = url
                .as_deref()
                .map(ServiceEndpoint::parse)
                .transpose()
                .map_err(|e| Error::InvalidConfig(format!("--url: {e}")))?;
            let options = commands::HealthOptions {
                url,
                attempts,
                interval: interval.map(std::time::Duration::from_secs),
            };
            commands::health(config, options, output, cancel).await
        }
        Commands::Status { deploy_id } => {
            let config = load_config(cli.config, cli.destination)?;
            commands::status(config, deploy_id, output, cancel).await
        }
    }
}

fn load_config(path: Option<PathBuf>, destination: Option<String>) -> Result<Config> {
    let cwd = env::current_dir()?;
    let config = Config::locate(&cwd, path.as_deref())?;

    match destination {
        Some(dest) => config.for_destination(&dest),
        None => Ok(config),
    }
}

fn parse_image(raw: &str) -> Result<ImageRef> {
    ImageRef::parse(raw).map_err(|e| Error::InvalidConfig(format!("--image: {e}")))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}

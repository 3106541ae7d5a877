use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use dcs_deck::{config::Config, device::ConsoleSink, scenario::Scenario, App};

#[derive(Parser, Debug)]
#[command(name = "dcs-deck")]
#[command(about = "Stream Deck key and dial backend driven by DCS World simulator state")]
#[command(version)]
struct Cli {
    /// Scenario file to replay
    #[arg(long, value_name = "PATH")]
    scenario: PathBuf,

    /// Milliseconds between ticks (overrides the config file)
    #[arg(long, value_name = "MS")]
    interval_ms: Option<u64>,

    /// Validate the scenario and exit
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = Config::load()?;
    if let Some(interval_ms) = cli.interval_ms {
        config.polling.interval_ms = interval_ms;
    }

    // Initialize logging on stderr; stdout carries the device events
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if cli.check {
        return check_scenario(&cli.scenario);
    }

    let scenario = Scenario::load(&cli.scenario)
        .with_context(|| format!("Failed to load scenario {:?}", cli.scenario))?;

    info!("Starting dcs-deck");

    let mut app = App::new(config, scenario, ConsoleSink::stdout());

    // Set up signal handlers for graceful shutdown
    let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate())?;

    let result = tokio::select! {
        result = app.run() => {
            result
        }
        _ = signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down...");
            Ok(())
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down...");
            Ok(())
        }
    };

    // Always run shutdown
    app.shutdown().await;
    result
}

fn check_scenario(path: &Path) -> Result<()> {
    match Scenario::load(path) {
        Ok(scenario) => {
            println!("✓ Scenario valid: {:?}", path);
            println!("  Contexts: {}", scenario.contexts.len());
            println!("  Steps: {}", scenario.steps.len());
            println!("  Events: {}", scenario.event_count());
            Ok(())
        }
        Err(e) => {
            println!("✗ Invalid scenario: {}", e);
            std::process::exit(1);
        }
    }
}

mod config;
mod error;
mod filter;
mod luma;
mod message;
mod runner;
mod scheduler;
mod telegram;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::luma::LumaClient;
use crate::runner::CheckinNotifier;
use crate::scheduler::Scheduler;
use crate::telegram::TelegramClient;

#[derive(Parser)]
#[command(name = "notifier")]
#[command(about = "Forwards fresh event check-ins to a Telegram chat")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single poll cycle and exit
    Run,
    /// Poll on a fixed interval until interrupted
    Watch,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "notifier=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    // Load configuration; a missing secret is the only non-zero exit.
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    let source = LumaClient::new(&config);
    let sink = TelegramClient::new(&config);
    let notifier = CheckinNotifier::new(source, sink, config.clone());

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            let summary = notifier.run_tick(config.steady_window()).await;
            tracing::info!(
                "Run complete: {} guests, {} new check-ins, {} notified, {} failed sends",
                summary.guests_seen,
                summary.selected,
                summary.notified,
                summary.send_failures
            );
        }
        Commands::Watch => {
            let scheduler = Scheduler::new(notifier, config);
            let handle = tokio::spawn(async move { scheduler.run().await });

            tracing::info!("Notifier running. Press Ctrl+C to stop.");
            signal::ctrl_c().await?;
            tracing::info!("Shutdown signal received, stopping...");

            handle.abort();
        }
    }

    Ok(())
}

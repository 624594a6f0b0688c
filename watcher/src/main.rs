use anyhow::Result;
use clap::Parser;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stock_watcher::{
    AvailabilityPoller, CycleOutcome, HttpCatalogClient, TelegramNotifier, WatchConfig,
    WatchScheduler,
};

#[derive(Parser)]
#[command(name = "stock-watcher")]
#[command(about = "Watch the McDonald's F1 car on Rappi and alert a Telegram chat when it is in stock")]
struct Cli {
    /// Run a single availability check and exit.
    ///
    /// Handy for verifying that the Rappi token and Telegram settings work.
    #[arg(long)]
    once: bool,

    /// Exit as soon as the car has been found instead of idling until Ctrl+C.
    #[arg(long)]
    exit_on_found: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stock_watcher=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = WatchConfig::from_env().inspect_err(|e| tracing::error!("{}", e))?;

    let catalog = HttpCatalogClient::new(&config).inspect_err(|e| tracing::error!("{}", e))?;
    let notifier = TelegramNotifier::new(&config).inspect_err(|e| tracing::error!("{}", e))?;

    tracing::info!("F1 stock watcher started");
    tracing::info!("Checking every {} minutes", config.interval_minutes);
    tracing::info!("Notifying chat {}", notifier.chat_id());

    let mut poller = AvailabilityPoller::new(catalog, notifier, config.target.clone());

    if cli.once {
        let outcome = poller.poll_once().await;
        match &outcome {
            CycleOutcome::Found(topping) => {
                tracing::info!("\"{}\" is in stock", topping.description)
            }
            CycleOutcome::Unavailable => tracing::info!("Not in stock yet"),
            CycleOutcome::Recovered(e) => tracing::warn!("Check failed: {}", e),
            CycleOutcome::Skipped => {}
        }
        if !outcome.is_terminal() {
            tracing::info!("Run without --once to keep watching");
        }
        return Ok(());
    }

    let mut handle = WatchScheduler::new(poller, config.poll_interval()).spawn();

    let stopped = tokio::select! {
        result = handle.stopped() => Some(result),
        _ = signal::ctrl_c() => None,
    };

    let Some(result) = stopped else {
        tracing::info!("Shutdown signal received, stopping...");
        handle.abort();
        return Ok(());
    };

    match result {
        Ok(summary) => tracing::info!(
            "\"{}\" found after {} checks, no further checks will run (scheduler {:?})",
            summary.found.description,
            summary.cycles,
            handle.state()
        ),
        Err(e) => tracing::error!("Scheduler task error: {:?}", e),
    }

    if !cli.exit_on_found {
        tracing::info!("Watcher idle. Press Ctrl+C to exit.");
        signal::ctrl_c().await?;
    }

    tracing::info!("Stock watcher stopped");
    Ok(())
}

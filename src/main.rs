//! aurorawatch - aurora and geomagnetic activity monitor.
//!
//! CLI entry point.

use aurorawatch::clock::SystemClock;
use aurorawatch::config::{Config, Settings};
use aurorawatch::feeds::{KIndexFeed, OvationFeed};
use aurorawatch::monitor::Monitor;
use aurorawatch::notify::{ConsoleOutput, PushoverNotifier};
use aurorawatch::thresholds::ThresholdTable;
use aurorawatch::types::Feed;
use clap::Parser;
use std::process::ExitCode;
use tokio::sync::watch;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();

    // Set up logging
    let filter = if config.verbose {
        EnvFilter::new("aurorawatch=debug,info")
    } else {
        EnvFilter::new("aurorawatch=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    // All configuration failures are fatal here, before any fetch.
    let settings = match Settings::from_config(&config) {
        Ok(s) => s,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // Flip the shutdown channel on SIGINT/SIGTERM so both monitors stop at
    // their next sleep point and the process exits with code 0.
    tokio::spawn(async move {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};
            let mut sigterm =
                signal(SignalKind::terminate()).expect("failed to register SIGTERM handler");
            let mut sigint =
                signal(SignalKind::interrupt()).expect("failed to register SIGINT handler");

            tokio::select! {
                _ = sigterm.recv() => {},
                _ = sigint.recv() => {},
            }
        }

        #[cfg(not(unix))]
        {
            let _ = tokio::signal::ctrl_c().await;
        }

        info!("signal received, shutting down");
        let _ = shutdown_tx.send(true);
    });

    if let Err(e) = run(settings, shutdown_rx).await {
        error!("{}", e);
        return ExitCode::FAILURE;
    }

    info!("shutdown complete");
    ExitCode::SUCCESS
}

/// Build both monitors and run them cooperatively until shutdown.
async fn run(
    settings: Settings,
    shutdown: watch::Receiver<bool>,
) -> aurorawatch::types::Result<()> {
    let console = ConsoleOutput::new(settings.quiet);

    let mut aurora = Monitor::new(
        ThresholdTable::new(Feed::Aurora, settings.language),
        OvationFeed::new(settings.location, &settings.http)?,
        PushoverNotifier::new(settings.credentials.clone(), &settings.http)?,
        SystemClock,
    )
    .with_schedule(settings.schedule)
    .with_intervals(settings.aurora_intervals)
    .with_policy(settings.policy)
    .with_console(console);

    let mut kindex = Monitor::new(
        ThresholdTable::new(Feed::KIndex, settings.language),
        KIndexFeed::new(&settings.http)?,
        PushoverNotifier::new(settings.credentials.clone(), &settings.http)?,
        SystemClock,
    )
    .with_schedule(settings.schedule)
    .with_intervals(settings.kindex_intervals)
    .with_policy(settings.policy)
    .with_console(console);

    info!(
        latitude = settings.location.latitude,
        longitude = settings.location.longitude,
        language = %settings.language,
        "starting monitors (Ctrl+C to stop)"
    );

    // The two feeds share no mutable state; run them as cooperative tasks
    // with independent intervals.
    tokio::join!(aurora.run(shutdown.clone()), kindex.run(shutdown));

    Ok(())
}

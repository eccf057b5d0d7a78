use std::path::PathBuf;

use clap::Parser;
use tokio::time::Duration;
use tracing::{info, warn};

use helio_daemon::config::FeedConfig;
use helio_daemon::feed::{LiveFeed, Snapshot, Subscription};
use helio_daemon::status::SpaceWeatherLevel;

#[derive(Parser)]
#[command(name = "helio-feed")]
#[command(about = "HelioDev live feed - broadcasts dashboard snapshots")]
struct Cli {
    /// Path to a TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Fixed RNG seed (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Exit after this many seconds; runs until interrupted if omitted
    #[arg(long)]
    duration_secs: Option<u64>,

    /// Emit each snapshot as a JSON line instead of a log record
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let mut config = match cli.config.as_deref() {
        Some(path) => FeedConfig::load(path),
        None => FeedConfig::default(),
    };
    if cli.seed.is_some() {
        config.rng_seed = cli.seed;
    }

    info!(
        refresh_secs = config.refresh_secs,
        append_secs = config.append_secs,
        capacity = config.capacity,
        "Starting live feed"
    );

    let feed = LiveFeed::spawn(config);
    let subscription = feed
        .subscribe()
        .await
        .ok_or_else(|| anyhow::anyhow!("feed task exited before first subscription"))?;

    match cli.duration_secs {
        Some(secs) => {
            let _ =
                tokio::time::timeout(Duration::from_secs(secs), stream(subscription, cli.json))
                    .await;
        }
        None => stream(subscription, cli.json).await,
    }
    Ok(())
}

async fn stream(mut subscription: Subscription, json: bool) {
    while let Some(snapshot) = subscription.next().await {
        if json {
            match serde_json::to_string(&snapshot) {
                Ok(line) => println!("{line}"),
                Err(e) => warn!(error = %e, "Could not serialize snapshot"),
            }
        } else {
            log_snapshot(&snapshot);
        }
    }
}

fn log_snapshot(snapshot: &Snapshot) {
    let status = SpaceWeatherLevel::for_sample(&snapshot.current);
    info!(
        commits = snapshot.current.commits,
        developers = snapshot.current.developers,
        solar_flux = snapshot.current.solar_flux,
        geomagnetic = snapshot.current.geomagnetic,
        coefficient = snapshot.trends.coefficient,
        commits_pct = snapshot.trends.commits_pct,
        solar_pct = snapshot.trends.solar_pct,
        retained = snapshot.historical.len(),
        status = status.message(),
        "Snapshot"
    );
}

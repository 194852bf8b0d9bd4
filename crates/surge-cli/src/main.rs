use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use surge_core::{ChannelStatus, Config};
use surge_source::FileSource;
use surge_store::ChannelStore;
use tokio::sync::Mutex;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(name = "surge")]
#[command(author, version, about = "Lightning channel balances in your terminal")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Fetch the channel list once and print it
    List {
        /// Path to an `lncli listchannels` JSON dump
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Refresh the channel list on an interval
    Watch {
        /// Path to an `lncli listchannels` JSON dump
        #[arg(short, long)]
        file: PathBuf,
        /// Seconds between refreshes (defaults to the config value)
        #[arg(short, long)]
        interval: Option<u64>,
    },
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::new(filter))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let config = Config::load()?;

    match cli.command {
        Commands::List { file } => {
            let mut store = new_store(file, &config);
            store.refresh().await?;
            print_channels(&store);
        }
        Commands::Watch { file, interval } => {
            let secs = interval.unwrap_or(config.poll_interval_secs);
            watch(new_store(file, &config), Duration::from_secs(secs)).await?;
        }
    }

    Ok(())
}

fn new_store(file: PathBuf, config: &Config) -> ChannelStore {
    ChannelStore::with_thresholds(Box::new(FileSource::new(file)), config.thresholds)
}

/// Refresh and reprint until ctrl-c.
async fn watch(store: ChannelStore, interval: Duration) -> Result<()> {
    let store = Arc::new(Mutex::new(store));
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let mut store = store.lock().await;
                match store.refresh().await {
                    Ok(summary) => {
                        print_channels(&store);
                        println!(
                            "({} new, {} updated, {} removed, {} rejected)\n",
                            summary.inserted, summary.updated, summary.removed, summary.rejected
                        );
                    }
                    Err(err) => eprintln!("refresh failed: {err}"),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("shutting down");
                break;
            }
        }
    }

    Ok(())
}

fn print_channels(store: &ChannelStore) {
    println!(
        "  {:>12}  {:>12}  {:>8}  {:^17}  {:>12}",
        "CAN RECEIVE", "CAN SEND", "UPTIME %", "PEER", "CAPACITY"
    );

    for channel in store.collection().sorted_channels() {
        println!(
            "{} {:>12}  {:>12}  {:>8.1}  {:^17}  {:>12}",
            status_dot(channel.status()),
            channel.remote_balance,
            channel.local_balance,
            channel.uptime_percent,
            ellipse_inside(&channel.remote_pubkey),
            channel.capacity
        );
    }

    println!();
    println!("total inbound:  {} sats", store.total_inbound());
    println!("total outbound: {} sats", store.total_outbound());
}

const fn status_dot(status: ChannelStatus) -> char {
    match status {
        ChannelStatus::Inactive => '○',
        ChannelStatus::Bad => '✗',
        ChannelStatus::Warn => '!',
        ChannelStatus::Good => '●',
    }
}

/// Shorten a pubkey to its ends, e.g. `0270685...caaab7b`.
fn ellipse_inside(s: &str) -> String {
    if s.len() <= 17 {
        s.to_string()
    } else {
        format!("{}...{}", &s[..7], &s[s.len() - 7..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ellipse_keeps_short_strings() {
        assert_eq!(ellipse_inside("02abc"), "02abc");
    }

    #[test]
    fn ellipse_shortens_pubkeys() {
        let pubkey = "0270685ca81a8e4d4d01beec5781f4cc924684072ae52c507f8ebe9daf0caaab7b";
        assert_eq!(ellipse_inside(pubkey), "0270685...caaab7b");
    }
}

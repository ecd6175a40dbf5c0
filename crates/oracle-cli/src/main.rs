use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use feels_oracle_adapter::{PriceOracleAdapter, SystemClock};
use tokio::time;

use feels_oracle_cli::{create_example_config, OracleConfig, Query};

#[derive(Parser, Debug)]
#[command(name = "feels-oracle")]
#[command(about = "Pull-style AMM oracle view over push-style price feeds")]
struct Args {
    /// Path to oracle configuration file
    #[arg(short, long, default_value = "oracle.toml")]
    config: String,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write an example configuration file
    InitConfig {
        #[arg(default_value = "oracle.toml")]
        path: String,
    },

    /// Print the pool snapshot
    Slot0,

    /// Print one ring observation
    Observation {
        #[arg(short, long, default_value = "65534")]
        index: u16,
    },

    /// Print cumulatives for the given ages in seconds
    Observe {
        #[arg(short, long, value_delimiter = ',', default_value = "0")]
        ages: Vec<u32>,
    },

    /// Print the consumer-side mean tick and sqrt price over a window
    Twap {
        #[arg(short, long, default_value = "1800")]
        window: u32,
    },

    /// Poll the snapshot on an interval
    Watch {
        /// Seconds between polls; defaults to the configured interval
        #[arg(short, long)]
        interval: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if args.verbose { "debug" } else { "info" }),
    )
    .init();

    let query = match args.command {
        Command::InitConfig { path } => {
            create_example_config(&path)
                .with_context(|| format!("Failed to create example config at {path}"))?;
            log::info!("Wrote example configuration to {}", path);
            return Ok(());
        }
        Command::Watch { interval } => {
            return watch(&args.config, interval).await;
        }
        Command::Slot0 => Query::Slot0,
        Command::Observation { index } => Query::Observation { index },
        Command::Observe { ages } => Query::Observe { ages },
        Command::Twap { window } => Query::Twap { window },
    };

    let config = OracleConfig::load(&args.config)
        .with_context(|| format!("Failed to load configuration from {}", args.config))?;
    let adapter = config.build_adapter(SystemClock)?;

    let rendered = query.run(&adapter).context("Oracle query failed")?;
    println!("{rendered}");
    Ok(())
}

async fn watch(config_path: &str, interval: Option<u64>) -> anyhow::Result<()> {
    let config = OracleConfig::load(config_path)
        .with_context(|| format!("Failed to load configuration from {config_path}"))?;
    let adapter = config.build_adapter(SystemClock)?;
    let interval = interval.unwrap_or(config.watch_interval).max(1);

    log::info!("Watching {} every {}s", config.snapshot_path, interval);

    let mut interval_timer = time::interval(Duration::from_secs(interval));
    let mut iteration = 0u64;

    loop {
        interval_timer.tick().await;
        iteration += 1;

        match adapter.snapshot() {
            Ok(slot0) => {
                log::info!(
                    "Iteration {}: tick={} sqrt_price_x64={}",
                    iteration,
                    slot0.tick,
                    slot0.sqrt_price_x64
                );
            }
            Err(e) if e.is_feed_error() => {
                log::warn!("Feed unavailable in watch iteration {}: {}", iteration, e);
            }
            Err(e) => {
                log::error!("Error in watch iteration {}: {}", iteration, e);
            }
        }
    }
}

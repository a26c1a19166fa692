use anyhow::{Context, Result, bail};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use fencewatch::api::CarStatusClient;
use fencewatch::config::{FileConfig, Mode, PollConfig};
use fencewatch::monitor::{Monitor, shutdown_channel};
use fencewatch::notify::{FanoutNotifier, LogNotifier, WebhookNotifier};

/// Watch a vehicle fleet and alert when a vehicle leaves its geofence
///
/// Examples:
///   # Full fleet at the production cadence
///   fencewatch --api-url https://fleet.example.com
///
///   # Quick verification against the test vehicle
///   fencewatch -m test --api-url http://localhost:8000
///
///   # Config file plus a log file
///   fencewatch --config fleet.toml --log-file fencewatch.log
#[derive(Parser, Debug)]
#[command(name = "fencewatch")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (optional, auto-searches fencewatch.toml if not provided)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Monitoring mode: full fleet at the normal cadence, or the test
    /// fleet at a short interval
    #[arg(short = 'm', long, default_value = "normal")]
    mode: Mode,

    /// Polling interval in seconds (overrides the mode's default)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    interval: Option<u64>,

    /// Fleet API base URL (overrides [api].base_url from the config file)
    #[arg(long)]
    api_url: Option<String>,

    /// Append logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    let file_config = if let Some(ref config_path) = args.config {
        if config_path.exists() {
            Some(FileConfig::from_path(config_path)?)
        } else {
            bail!("Config file not found: {:?}", config_path);
        }
    } else {
        FileConfig::load()
    };
    let config = file_config.unwrap_or_default();

    let api = config.api.unwrap_or_default();
    let base_url = args.api_url.or(api.base_url).context(
        "No API base URL configured; pass --api-url or set [api].base_url in fencewatch.toml",
    )?;

    let fleet_config = config.fleet.unwrap_or_default();
    let fleet = fleet_config.for_mode(args.mode).to_vec();
    if fleet.is_empty() {
        bail!("No vehicles configured for {:?} mode", args.mode);
    }

    let poll = config.poll.unwrap_or_default();
    let interval = resolve_interval(args.interval, &poll, args.mode)?;

    let client = CarStatusClient::new(&base_url, Duration::from_secs(api.timeout_secs))
        .context("Failed to build API client")?;

    let mut notifier = FanoutNotifier::new();
    notifier.push(Box::new(LogNotifier));
    if let Some(webhook) = config.webhook {
        let delivery = WebhookNotifier::new(
            webhook.url,
            webhook.min_severity,
            Duration::from_secs(webhook.timeout_secs),
        )
        .context("Failed to build webhook client")?;
        notifier.push(Box::new(delivery));
    }

    info!(
        mode = ?args.mode,
        vehicles = fleet.len(),
        interval_secs = interval.as_secs(),
        api = %base_url,
        "starting geofence monitor"
    );

    // The handle is never triggered from here; the process runs until it
    // is terminated externally.
    let (_handle, shutdown) = shutdown_channel();
    Monitor::new(client, notifier).run(&fleet, interval, shutdown);

    Ok(())
}

/// Resolve the polling interval, preferring the CLI override.
///
/// The CLI flag is range-checked by clap, so a zero can only arrive via
/// the config file; a zero interval would poll the API back to back.
fn resolve_interval(cli_secs: Option<u64>, poll: &PollConfig, mode: Mode) -> Result<Duration> {
    let secs = cli_secs.unwrap_or_else(|| poll.interval_secs(mode));
    if secs == 0 {
        bail!("Polling interval must be at least 1 second; check [poll] in the config file");
    }
    Ok(Duration::from_secs(secs))
}

fn init_logging(args: &Args) -> Result<()> {
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    if let Some(ref log_file) = args.log_file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_file)
            .with_context(|| format!("Failed to open log file {:?}", log_file))?;
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(file).with_ansi(false))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    Ok(())
}

//! BinSense — host simulation entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                   │
//! │  SeededEntropy   SystemClock   LogEventSink   JsonConfig │
//! │  (EntropyPort)   (TimePort)    (EventSink)    (Config)   │
//! │                                                          │
//! │  ─────────────── Port Trait Boundary ──────────────────  │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │           MonitorService (pure logic)              │  │
//! │  │  Fill · Connection · Notifier · NotificationLog    │  │
//! │  └────────────────────────────────────────────────────┘  │
//! │                                                          │
//! │  Monitor (mutex + Sampler thread)                        │
//! └──────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use binsense::Monitor;
use binsense::adapters::config_file::JsonConfigFile;
use binsense::adapters::entropy::SeededEntropy;
use binsense::adapters::log_sink::LogEventSink;
use binsense::adapters::time::SystemClock;
use binsense::app::ports::{ConfigError, ConfigPort};
use binsense::config::MonitorConfig;

/// How often the main thread checks the level for `--reset-at`.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Parser, Debug)]
#[command(name = "binsense")]
#[command(about = "Simulated smart-container fill-level monitor")]
struct Args {
    /// Path to a JSON config file (defaults are used when it is missing)
    #[arg(short, long, default_value = "binsense.json")]
    config: PathBuf,

    /// Seed for a reproducible run (OS entropy when omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// How long to run before stopping, in seconds
    #[arg(short, long, default_value = "30")]
    duration_secs: u64,

    /// Reject manual resets below the configured floor
    #[arg(long)]
    enforce_floor: bool,

    /// Issue a manual reset whenever the level reaches this percentage
    #[arg(long)]
    reset_at: Option<f64>,
}

fn load_config(path: PathBuf) -> Result<MonitorConfig> {
    let store = JsonConfigFile::new(path);
    match store.load() {
        Ok(cfg) => Ok(cfg),
        Err(ConfigError::NotFound) => {
            info!("No config at {}, using defaults", store.path().display());
            Ok(MonitorConfig::default())
        }
        Err(e) => Err(anyhow::anyhow!("{}: {}", store.path().display(), e)),
    }
}

fn main() -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();
    info!("BinSense v{}", env!("CARGO_PKG_VERSION"));

    let mut config = load_config(args.config)?;
    if args.enforce_floor {
        config.enforce_reset_floor = true;
    }

    let entropy = match args.seed {
        Some(seed) => SeededEntropy::from_seed(seed),
        None => SeededEntropy::from_os().context("initialising random source")?,
    };

    let monitor = Monitor::new(config, entropy, LogEventSink::new(), SystemClock::new())
        .context("building monitor")?;
    monitor.start().context("starting sampler")?;

    let deadline = Instant::now() + Duration::from_secs(args.duration_secs);
    while Instant::now() < deadline {
        thread::sleep(POLL_INTERVAL);
        let Some(limit) = args.reset_at else {
            continue;
        };
        if monitor.get_fill_snapshot().percentage >= limit {
            if let Err(e) = monitor.manual_reset() {
                warn!("Manual reset failed: {}", e);
            }
        }
    }

    monitor.stop();
    println!("{}", serde_json::to_string_pretty(&monitor.telemetry())?);
    Ok(())
}

//! CLI entry point for the airport congestion tool.
//!
//! Provides subcommands for one-shot forecasts, trend queries over the
//! historical baseline, history export, and a long-running refresh loop.

use airport_congestion::{
    analyzers::{analyze_trend_for_hour, trend_summary},
    config::{Calibration, Settings},
    forecast::{CongestionForecastEntry, ForecastEngine, TravelWindows},
    history::{HistoricalStore, HistoricalTrendPoint},
    output::{append_records, print_json},
    random::{self, RandomSource},
    refresh::RefreshService,
    signals::SignalSources,
};
use anyhow::{Result, bail};
use chrono::{Datelike, Local, Timelike};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::ffi::OsStr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "airport_congestion")]
#[command(about = "Forecast airport congestion from live signals and historical trends", long_about = None)]
struct Cli {
    /// Seed for reproducible randomness
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// JSON file overriding the calibration constants
    #[arg(long, global = true, value_name = "FILE")]
    calibration: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch live signals and print the 12-hour forecast with travel windows
    Forecast {
        /// Optional: CSV file to append forecast entries to
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Predict congestion for an hour and day of week from the history
    Trend {
        /// Hour of day (0-23); defaults to the current hour
        #[arg(long)]
        hour: Option<u32>,

        /// Day of week (0 = Sunday); defaults to today
        #[arg(long)]
        day: Option<u32>,
    },
    /// Summarize busiest/quietest hours, delay and reliability
    Summary,
    /// Export recent historical points
    History {
        /// Number of trailing days to include
        #[arg(short, long, default_value_t = 30)]
        days: i64,

        /// Optional: CSV file to append points to (prints JSON otherwise)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Refresh the dashboard periodically
    Serve {
        /// Seconds between refreshes
        #[arg(short, long, default_value_t = 300)]
        interval: u64,

        /// Seconds before the first refresh
        #[arg(short, long, default_value_t = 1)]
        warmup: u64,

        /// Optional: file to write each snapshot to as JSON
        #[arg(short, long)]
        snapshot: Option<String>,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ForecastReport {
    forecast: Vec<CongestionForecastEntry>,
    travel_windows: TravelWindows,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/airport_congestion.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("airport_congestion.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let calibration = Calibration::load_or_default(cli.calibration.as_deref())?;
    let settings = Settings::from_env();

    match cli.command {
        Commands::Forecast { output } => {
            let engine = ForecastEngine::new(
                SignalSources::from_settings(&settings)?,
                calibration,
                random::from_seed(cli.seed),
            );
            let forecast = engine.generate_congestion_forecast().await;

            if let Some(path) = output {
                let rows = append_records(&path, &forecast)?;
                info!(path = %path, rows, "Forecast appended");
            }

            print_json(&ForecastReport {
                travel_windows: TravelWindows::from_forecast(&forecast),
                forecast,
            })?;
        }
        Commands::Trend { hour, day } => {
            let now = Local::now();
            let hour = hour.unwrap_or(now.hour());
            let day = day.unwrap_or(now.weekday().num_days_from_sunday());
            if hour > 23 || day > 6 {
                bail!("hour must be 0-23 and day 0-6 (got hour {hour}, day {day})");
            }

            let store = baseline(&calibration, &mut *random::from_seed(cli.seed));
            let result =
                analyze_trend_for_hour(&store, hour, day, now.date_naive(), &calibration.trend);
            print_json(&result)?;
        }
        Commands::Summary => {
            let store = baseline(&calibration, &mut *random::from_seed(cli.seed));
            print_json(&trend_summary(&store))?;
        }
        Commands::History { days, output } => {
            let store = baseline(&calibration, &mut *random::from_seed(cli.seed));
            let points: Vec<HistoricalTrendPoint> = store
                .recent(days, Local::now().date_naive())
                .into_iter()
                .cloned()
                .collect();

            match output {
                Some(path) => {
                    let rows = append_records(&path, &points)?;
                    info!(path = %path, rows, days, "History exported");
                }
                None => print_json(&points)?,
            }
        }
        Commands::Serve {
            interval,
            warmup,
            snapshot,
        } => {
            if interval == 0 {
                bail!("interval must be at least one second");
            }

            let mut rng = random::from_seed(cli.seed);
            let store = Arc::new(RwLock::new(baseline(&calibration, &mut *rng)));
            let engine = ForecastEngine::new(
                SignalSources::from_settings(&settings)?,
                calibration,
                rng,
            );

            let mut service = RefreshService::new(engine, store, settings.learn_from_live);
            if let Some(path) = snapshot {
                service = service.with_snapshot_path(path);
            }

            info!(
                interval,
                warmup,
                learn_from_live = settings.learn_from_live,
                "Serving dashboard refreshes. Press Ctrl+C to stop."
            );

            tokio::select! {
                _ = Arc::new(service).run(
                    Duration::from_secs(warmup),
                    Duration::from_secs(interval),
                ) => {}
                _ = tokio::signal::ctrl_c() => {
                    info!("Shutting down");
                }
            }
        }
    }

    Ok(())
}

/// Builds the synthetic 90-day baseline ending yesterday.
fn baseline(calibration: &Calibration, rng: &mut dyn RandomSource) -> HistoricalStore {
    HistoricalStore::generate(Local::now().date_naive(), &calibration.history, rng)
}

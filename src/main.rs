//! climate-risk - historical weather risk for a planned day
//!
//! Usage:
//! ```bash
//! # Weighted risk score for a beach day from a saved archive response
//! climate-risk score --archive zurich-07-14.json --activity "Beach Day"
//!
//! # Share of past years breaching absolute limits
//! climate-risk thresholds --archive zurich-07-14.json \
//!     --max-temp 30 --min-temp 5 --max-precipitation 10 --max-wind 20
//!
//! # Archive request for the same day over the configured number of years
//! climate-risk window --date 2026-07-14 --lat 47.37 --lon 8.55
//!
//! # CSV report
//! climate-risk export --archive zurich-07-14.json --city "Zurich" --date 2026-07-14
//! ```

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::{Datelike, Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use serde_json::json;

use climate_risk::stats::TemperatureSpread;
use climate_risk::weather::{self, ArchiveWindow};
use climate_risk::{
    AnalysisRequest, ClimateRiskConfig, ClimateRiskEngine, ClimateRiskError, RiskOutcome,
    Thresholds, YearlyRecord, export, logging,
};

#[derive(Parser)]
#[command(
    name = "climate-risk",
    version,
    about = "Historical weather risk for a planned day",
    long_about = "Scores how likely a calendar day is to be spoiled by the weather, \
                  using decades of daily history for one location."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Configuration file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Activity-weighted risk score from a daily archive
    Score {
        /// Saved archive API response (JSON)
        #[arg(long)]
        archive: PathBuf,
        /// Planned activity, e.g. "Beach Day"
        #[arg(long)]
        activity: String,
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// Share of historical years breaching absolute limits
    Thresholds {
        /// Yearly records (JSON array)
        #[arg(long, conflicts_with = "archive", required_unless_present = "archive")]
        records: Option<PathBuf>,
        /// Saved archive API response, aggregated per year
        #[arg(long)]
        archive: Option<PathBuf>,
        /// Maximum average temperature in Celsius
        #[arg(long, allow_negative_numbers = true)]
        max_temp: f64,
        /// Minimum average temperature in Celsius
        #[arg(long, allow_negative_numbers = true)]
        min_temp: f64,
        /// Maximum precipitation in mm
        #[arg(long)]
        max_precipitation: f64,
        /// Maximum wind speed in mph
        #[arg(long)]
        max_wind: f64,
    },
    /// Evaluate a mode-tagged request file
    Analyze {
        #[arg(long)]
        request: PathBuf,
    },
    /// Write the daily archive as a CSV report
    Export {
        #[arg(long)]
        archive: PathBuf,
        /// Output file; defaults to stdout, or the report name when city and date are given
        #[arg(long)]
        output: Option<PathBuf>,
        #[arg(long, requires = "date")]
        city: Option<String>,
        #[arg(long, requires = "city")]
        date: Option<String>,
    },
    /// Archive window and request URL for a target day
    Window {
        #[arg(long)]
        date: NaiveDate,
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
        /// Defaults to the current local year
        #[arg(long)]
        current_year: Option<i32>,
    },
    /// List known activity profiles
    Profiles,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if let Some(error) = e.downcast_ref::<ClimateRiskError>() {
                eprintln!("{}", error.user_message());
            }
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = ClimateRiskConfig::load_from_path(cli.config)?;
    logging::init(&config.logging, cli.verbose)?;

    let engine = ClimateRiskEngine::new(config.profile_registry());

    match cli.command {
        Command::Score {
            archive,
            activity,
            format,
        } => {
            let series = weather::load_archive(&archive)?;
            let outcome = engine.percentile_weighted(&series, &activity);
            match format {
                OutputFormat::Json => print_json(&outcome),
                OutputFormat::Text => {
                    print_report(&activity, &outcome);
                    Ok(())
                }
            }
        }
        Command::Thresholds {
            records,
            archive,
            max_temp,
            min_temp,
            max_precipitation,
            max_wind,
        } => {
            let records = match (records, archive) {
                (Some(path), _) => read_json::<Vec<YearlyRecord>>(&path)?,
                (None, Some(path)) => YearlyRecord::from_series(&weather::load_archive(&path)?),
                (None, None) => {
                    return Err(ClimateRiskError::validation(
                        "either --records or --archive is required",
                    )
                    .into());
                }
            };
            let thresholds = Thresholds {
                max_temp,
                min_temp,
                max_precipitation,
                max_wind,
            };
            print_json(&engine.threshold_count(&records, &thresholds))
        }
        Command::Analyze { request } => {
            let request: AnalysisRequest = read_json(&request)?;
            print_json(&engine.evaluate(&request))
        }
        Command::Export {
            archive,
            output,
            city,
            date,
        } => {
            let series = weather::load_archive(&archive)?;
            let target = output.or_else(|| {
                city.zip(date)
                    .map(|(city, date)| PathBuf::from(export::export_filename(&city, &date)))
            });
            match target {
                Some(path) => {
                    let file = File::create(&path)
                        .with_context(|| format!("Failed to create {}", path.display()))?;
                    export::write_csv(&series, BufWriter::new(file))?;
                    tracing::info!(path = %path.display(), rows = series.len(), "report written");
                    Ok(())
                }
                None => Ok(export::write_csv(&series, io::stdout().lock())?),
            }
        }
        Command::Window {
            date,
            lat,
            lon,
            current_year,
        } => {
            let current_year = current_year.unwrap_or_else(|| Local::now().year());
            let window = ArchiveWindow::for_day(date, current_year, config.archive.years)?;
            let url = window.request_url(&config.archive.base_url, lat, lon)?;
            print_json(&json!({
                "start_date": window.start,
                "end_date": window.end,
                "url": url,
            }))
        }
        Command::Profiles => {
            let registry = engine.profiles();
            let profiles: Vec<_> = registry
                .names()
                .into_iter()
                .filter_map(|name| registry.get(name))
                .collect();
            print_json(&json!({
                "default_weights": registry.default_weights(),
                "profiles": profiles,
            }))
        }
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let body = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&body)
        .map_err(ClimateRiskError::from)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}

fn print_report(activity: &str, outcome: &RiskOutcome) {
    let Some(result) = outcome.result() else {
        println!("{}", outcome.summary());
        return;
    };

    println!("{activity}: risk score {} ({})", result.risk_score, result.band());
    println!("  {}", result.summary);
    println!(
        "  Chance of rain: {:.0}%  Chance of extreme heat: {:.0}%",
        result.insights.chance_of_rain, result.insights.chance_of_extreme_heat
    );
    if let Some(spread) = TemperatureSpread::from_sample(&result.historical_temps) {
        println!("  Historical range: {}", spread.format_range());
        println!("  Average daily maximum: {:.1}°C", spread.mean);
    }
}

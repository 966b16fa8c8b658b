use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::client::PfdsClient;
use crate::config::FetcherConfig;
use crate::constants::{DEFAULT_TIMEOUT_SECS, PFDS_URL};
use crate::formatters::{format_storm_event, format_storm_event_json};
use crate::models::{Ari, Location, Series, Statistic, StormDuration, StormQuery, Units};

/// Look up a location-specific storm event from NOAA's precipitation
/// frequency data server.
#[derive(Parser)]
#[command(author, version, about, long_about, propagate_version = true)]
pub struct Cli {
    /// Data server endpoint.
    #[arg(long, env = "FREEBOARD_PFDS_URL", default_value = PFDS_URL, global = true)]
    pub pfds_url: String,

    /// Request timeout in seconds.
    #[arg(
        long,
        env = "FREEBOARD_TIMEOUT_SECS",
        default_value_t = DEFAULT_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..),
        global = true
    )]
    pub timeout_secs: u64,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn fetcher_config(&self) -> FetcherConfig {
        FetcherConfig {
            base_url: self.pfds_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Look up one design storm event.
    Lookup(LookupArgs),

    /// Serve storm event lookups as an MCP tool over stdio.
    Serve,
}

#[derive(Args)]
pub struct LookupArgs {
    /// Latitude in decimal degrees.
    #[arg(allow_negative_numbers = true)]
    pub lat: f64,

    /// Longitude in decimal degrees, negative for the western hemisphere.
    #[arg(allow_negative_numbers = true)]
    pub lon: f64,

    /// Average recurrence interval.
    #[arg(short = 'r', long, value_enum, ignore_case = true, default_value_t = Ari::default())]
    pub ari: Ari,

    /// Storm duration.
    #[arg(short, long, value_enum, ignore_case = true, default_value_t = StormDuration::default())]
    pub duration: StormDuration,

    /// Point estimate or confidence bound.
    #[arg(short, long, value_enum, ignore_case = true, default_value_t = Statistic::default())]
    pub statistic: Statistic,

    /// Precipitation units.
    #[arg(short, long, value_enum, ignore_case = true, default_value_t = Units::default())]
    pub units: Units,

    /// Precipitation series.
    #[arg(long, value_enum, ignore_case = true, default_value_t = Series::default())]
    pub series: Series,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Also save the report to this file.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl LookupArgs {
    pub fn query(&self) -> StormQuery {
        StormQuery {
            ari: self.ari,
            duration: self.duration,
            statistic: self.statistic,
            units: self.units,
            series: self.series,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Runs a lookup, writes the report to `output` if asked, and returns it.
pub async fn lookup(args: &LookupArgs, config: FetcherConfig) -> Result<String> {
    let location = Location::new(args.lat, args.lon)?;
    if !location.in_conus() {
        tracing::warn!(
            "{} is outside the contiguous US, the data server may not cover it",
            location
        );
    }

    let client = PfdsClient::new(config)?;
    let result = client
        .fetch(&location, &args.query())
        .await
        .with_context(|| format!("failed to look up storm event at {location}"))?;

    let report = match args.format {
        OutputFormat::Text => format_storm_event(&result),
        OutputFormat::Json => format_storm_event_json(&result)?,
    };

    if let Some(path) = &args.output {
        tokio::fs::write(path, &report)
            .await
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!("Saved storm event to {}", path.display());
    }

    Ok(report)
}

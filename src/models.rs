use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::constants::{CONUS_EAST, CONUS_NORTH, CONUS_SOUTH, CONUS_WEST};
use crate::error::{FreeboardError, Result};

// ============================================================================
// Location
// ============================================================================

/// A validated geographic coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Location {
    latitude: f64,
    longitude: f64,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(FreeboardError::InvalidLocation(format!(
                "latitude {latitude} must be between -90 and 90 degrees"
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(FreeboardError::InvalidLocation(format!(
                "longitude {longitude} must be between -180 and 180 degrees"
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Whether the point falls inside the contiguous-US bounding box.
    pub fn in_conus(&self) -> bool {
        (CONUS_SOUTH..=CONUS_NORTH).contains(&self.latitude)
            && (CONUS_WEST..=CONUS_EAST).contains(&self.longitude)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ns = if self.latitude < 0.0 { 'S' } else { 'N' };
        let ew = if self.longitude < 0.0 { 'W' } else { 'E' };
        write!(
            f,
            "{}\u{00b0}{} / {}\u{00b0}{}",
            self.latitude.abs(),
            ns,
            self.longitude.abs(),
            ew
        )
    }
}

// ============================================================================
// Query parameters
// ============================================================================

/// Average recurrence interval, one column of the frequency table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema, ValueEnum)]
pub enum Ari {
    #[value(name = "1-yr")]
    #[serde(rename = "1-yr")]
    Year1,
    #[value(name = "2-yr")]
    #[serde(rename = "2-yr")]
    Year2,
    #[value(name = "5-yr")]
    #[serde(rename = "5-yr")]
    Year5,
    #[value(name = "10-yr")]
    #[serde(rename = "10-yr")]
    Year10,
    #[default]
    #[value(name = "25-yr")]
    #[serde(rename = "25-yr")]
    Year25,
    #[value(name = "50-yr")]
    #[serde(rename = "50-yr")]
    Year50,
    #[value(name = "100-yr")]
    #[serde(rename = "100-yr")]
    Year100,
    #[value(name = "200-yr")]
    #[serde(rename = "200-yr")]
    Year200,
    #[value(name = "500-yr")]
    #[serde(rename = "500-yr")]
    Year500,
    #[value(name = "1000-yr")]
    #[serde(rename = "1000-yr")]
    Year1000,
}

impl Ari {
    pub fn column(self) -> usize {
        self as usize
    }

    pub fn years(self) -> u32 {
        match self {
            Self::Year1 => 1,
            Self::Year2 => 2,
            Self::Year5 => 5,
            Self::Year10 => 10,
            Self::Year25 => 25,
            Self::Year50 => 50,
            Self::Year100 => 100,
            Self::Year200 => 200,
            Self::Year500 => 500,
            Self::Year1000 => 1000,
        }
    }
}

/// Storm duration, one row of the frequency table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema, ValueEnum)]
pub enum StormDuration {
    #[value(name = "5-min")]
    #[serde(rename = "5-min")]
    Min5,
    #[value(name = "10-min")]
    #[serde(rename = "10-min")]
    Min10,
    #[value(name = "15-min")]
    #[serde(rename = "15-min")]
    Min15,
    #[value(name = "30-min")]
    #[serde(rename = "30-min")]
    Min30,
    #[value(name = "60-min", alias = "1-hr")]
    #[serde(rename = "60-min", alias = "1-hr")]
    Min60,
    #[value(name = "2-hr")]
    #[serde(rename = "2-hr")]
    Hr2,
    #[value(name = "3-hr")]
    #[serde(rename = "3-hr")]
    Hr3,
    #[value(name = "6-hr")]
    #[serde(rename = "6-hr")]
    Hr6,
    #[value(name = "12-hr", alias = "0.5-day")]
    #[serde(rename = "12-hr", alias = "0.5-day")]
    Hr12,
    #[default]
    #[value(name = "24-hr", alias = "1-day")]
    #[serde(rename = "24-hr", alias = "1-day")]
    Hr24,
    #[value(name = "2-day")]
    #[serde(rename = "2-day")]
    Day2,
    #[value(name = "3-day")]
    #[serde(rename = "3-day")]
    Day3,
    #[value(name = "4-day")]
    #[serde(rename = "4-day")]
    Day4,
    #[value(name = "7-day")]
    #[serde(rename = "7-day")]
    Day7,
    #[value(name = "10-day")]
    #[serde(rename = "10-day")]
    Day10,
    #[value(name = "20-day")]
    #[serde(rename = "20-day")]
    Day20,
    #[value(name = "30-day")]
    #[serde(rename = "30-day")]
    Day30,
    #[value(name = "45-day")]
    #[serde(rename = "45-day")]
    Day45,
    #[value(name = "60-day")]
    #[serde(rename = "60-day")]
    Day60,
}

impl StormDuration {
    pub fn row(self) -> usize {
        self as usize
    }
}

/// Which estimate to read from the frequency table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Statistic {
    /// Point estimate
    #[default]
    #[value(alias = "mean")]
    #[serde(alias = "mean")]
    Estimate,
    /// Upper bound of the 90% confidence interval
    Upper,
    /// Lower bound of the 90% confidence interval
    Lower,
}

impl Statistic {
    /// Name of the matrix holding this statistic in the server response.
    pub fn table_name(self) -> &'static str {
        match self {
            Self::Estimate => "quantiles",
            Self::Upper => "upper",
            Self::Lower => "lower",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema, ValueEnum)]
pub enum Units {
    #[default]
    #[value(name = "inch", alias = "in")]
    #[serde(rename = "inch", alias = "in")]
    Inch,
    #[value(name = "mm", alias = "millimeter")]
    #[serde(rename = "mm", alias = "millimeter")]
    Millimeter,
}

impl Units {
    /// Unit system name understood by the data server.
    pub fn system(self) -> &'static str {
        match self {
            Self::Inch => "english",
            Self::Millimeter => "metric",
        }
    }
}

/// Precipitation series the frequency estimates are derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Series {
    /// Partial duration series
    #[default]
    Pds,
    /// Annual maximum series
    Ams,
}

impl Series {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pds => "pds",
            Self::Ams => "ams",
        }
    }
}

fn choice_name<T: ValueEnum>(value: &T) -> String {
    value
        .to_possible_value()
        .map(|v| v.get_name().to_string())
        .unwrap_or_default()
}

fn parse_choice<T: ValueEnum>(kind: &str, input: &str) -> Result<T> {
    T::from_str(input.trim(), true).map_err(|_| {
        let choices: Vec<String> = T::value_variants().iter().map(choice_name).collect();
        FreeboardError::InvalidParameter(format!(
            "unknown {kind} '{input}', expected one of: {}",
            choices.join(", ")
        ))
    })
}

macro_rules! impl_choice {
    ($ty:ty, $kind:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&choice_name(self))
            }
        }

        impl FromStr for $ty {
            type Err = FreeboardError;

            fn from_str(s: &str) -> Result<Self> {
                parse_choice($kind, s)
            }
        }
    };
}

impl_choice!(Ari, "recurrence interval");
impl_choice!(StormDuration, "duration");
impl_choice!(Statistic, "statistic");
impl_choice!(Units, "units");
impl_choice!(Series, "series");

/// Everything needed to pick one depth out of the data server's tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StormQuery {
    pub ari: Ari,
    pub duration: StormDuration,
    pub statistic: Statistic,
    pub units: Units,
    pub series: Series,
}

// ============================================================================
// Results
// ============================================================================

/// A design storm depth for one location and query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrecipitationResult {
    pub location: Location,
    #[serde(flatten)]
    pub query: StormQuery,
    pub depth: f64,
}

// ============================================================================
// MCP Tool Request Models
// ============================================================================

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct GetStormEventRequest {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees, negative for the western hemisphere
    pub longitude: f64,
    /// Average recurrence interval, "25-yr" when omitted
    #[serde(default)]
    pub ari: Option<Ari>,
    /// Storm duration, "24-hr" when omitted
    #[serde(default)]
    pub duration: Option<StormDuration>,
    /// Point estimate or confidence bound, "estimate" when omitted
    #[serde(default)]
    pub statistic: Option<Statistic>,
    /// Precipitation units, "inch" when omitted
    #[serde(default)]
    pub units: Option<Units>,
    /// Precipitation series, "pds" when omitted
    #[serde(default)]
    pub series: Option<Series>,
}

impl GetStormEventRequest {
    /// Validates the request before any network access.
    pub fn validate(&self) -> Result<(Location, StormQuery)> {
        let location = Location::new(self.latitude, self.longitude)?;
        let query = StormQuery {
            ari: self.ari.unwrap_or_default(),
            duration: self.duration.unwrap_or_default(),
            statistic: self.statistic.unwrap_or_default(),
            units: self.units.unwrap_or_default(),
            series: self.series.unwrap_or_default(),
        };
        Ok((location, query))
    }
}

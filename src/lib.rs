//! Look up design storm depths from NOAA's Precipitation Frequency Data Server.
//!
//! Secondary containment berms under SPCC regulations need an allowance for
//! precipitation. The depth of a location-specific storm event, commonly the
//! 25-year / 24-hour storm, is a good basis for that freeboard.

pub mod cli;
pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod formatters;
pub mod models;
pub mod parser;
pub mod service;

pub use client::PfdsClient;
pub use config::FetcherConfig;
pub use error::FreeboardError;
pub use models::{
    Ari, Location, PrecipitationResult, Series, Statistic, StormDuration, StormQuery, Units,
};

use reqwest::Client;

use crate::config::FetcherConfig;
use crate::constants::USER_AGENT;
use crate::error::{FreeboardError, Result};
use crate::models::{Location, PrecipitationResult, Series, StormQuery, Units};
use crate::parser::{parse_response, FrequencyTable, ParsedResponse};

/// Client for NOAA's Precipitation Frequency Data Server
#[derive(Debug, Clone)]
pub struct PfdsClient {
    client: Client,
    base_url: String,
}

impl PfdsClient {
    pub fn new(config: FetcherConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches the design storm depth for one location and query.
    pub async fn fetch(
        &self,
        location: &Location,
        query: &StormQuery,
    ) -> Result<PrecipitationResult> {
        let table = self.fetch_table(location, query.units, query.series).await?;
        let depth = table.depth(query.statistic, query.duration, query.ari)?;

        tracing::info!(
            "{} / {} {} at {}: {} {}",
            query.ari,
            query.duration,
            query.statistic,
            location,
            depth,
            query.units
        );

        Ok(PrecipitationResult {
            location: *location,
            query: *query,
            depth,
        })
    }

    /// Fetches every frequency table the server has for a location.
    pub async fn fetch_table(
        &self,
        location: &Location,
        units: Units,
        series: Series,
    ) -> Result<FrequencyTable> {
        let body = self.make_request(location, units, series).await?;

        match parse_response(&body)? {
            ParsedResponse::Values(table) => Ok(table),
            ParsedResponse::NoCoverage => Err(FreeboardError::OutOfCoverage {
                latitude: location.latitude(),
                longitude: location.longitude(),
            }),
        }
    }

    /// Makes the HTTP GET request and returns the raw response body
    async fn make_request(
        &self,
        location: &Location,
        units: Units,
        series: Series,
    ) -> Result<String> {
        let params = [
            ("lat", location.latitude().to_string()),
            ("lon", location.longitude().to_string()),
            // Precipitation frequency covers rain and snow; "rf" would be rainfall only.
            ("type", "pf".to_string()),
            ("data", "depth".to_string()),
            ("units", units.system().to_string()),
            ("series", series.as_str().to_string()),
        ];

        tracing::debug!("Requesting {} with {:?}", self.base_url, params);

        let response = self
            .client
            .get(&self.base_url)
            .query(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FreeboardError::Status(response.status()));
        }

        Ok(response.text().await?)
    }
}

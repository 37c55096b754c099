//! Client for Ergast-compatible motorsport results APIs.

pub mod types;

use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;

use crate::{config::AppConfig, errors::FetchError};

pub use types::{Race, RaceResult, headshot_url};
use types::ApiResponse;

/// Source of schedule and results data.
///
/// Each call issues a single request; there are no retries and no timeout
/// beyond what the underlying client applies. Calls do not coordinate with
/// each other, so two overlapping result requests complete in whatever order
/// the network delivers them.
#[async_trait]
pub trait RaceRepository: Send + Sync {
    /// Races of the configured season, in round order as returned by the API.
    async fn fetch_season_schedule(&self) -> Result<Vec<Race>, FetchError>;

    /// Finishing order for a single round.
    async fn fetch_race_results(&self, round: u32) -> Result<Vec<RaceResult>, FetchError>;
}

pub struct ErgastClient {
    http: Client,
    base_url: String,
    season: String,
    headshot_template: String,
}

impl ErgastClient {
    pub fn new(
        base_url: impl Into<String>,
        season: impl Into<String>,
        headshot_template: impl Into<String>,
    ) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            season: season.into(),
            headshot_template: headshot_template.into(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.api_base_url.clone(),
            config.season.clone(),
            config.headshot_url_template.clone(),
        )
    }

    pub fn schedule_url(&self) -> String {
        format!("{}/{}.json", self.base_url, self.season)
    }

    pub fn results_url(&self, round: u32) -> String {
        format!("{}/{}/{}/results.json", self.base_url, self.season, round)
    }

    async fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        debug!("GET {}", url);
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Network {
                url: url.to_string(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::UnexpectedStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| FetchError::Network {
            url: url.to_string(),
            source: e,
        })?;
        debug!("{} returned {} bytes", url, body.len());
        Ok(body.to_vec())
    }
}

#[async_trait]
impl RaceRepository for ErgastClient {
    async fn fetch_season_schedule(&self) -> Result<Vec<Race>, FetchError> {
        let url = self.schedule_url();
        let body = self.get(&url).await?;
        let races = parse_schedule(&url, &body)?;
        info!("Loaded {} races for season {}", races.len(), self.season);
        Ok(races)
    }

    async fn fetch_race_results(&self, round: u32) -> Result<Vec<RaceResult>, FetchError> {
        let url = self.results_url(round);
        let body = self.get(&url).await?;
        let results = parse_results(&url, round, &body, &self.headshot_template)?;
        info!("Loaded {} results for round {}", results.len(), round);
        Ok(results)
    }
}

fn parse_response(url: &str, body: &[u8]) -> Result<ApiResponse, FetchError> {
    serde_json::from_slice(body).map_err(|e| FetchError::Parse {
        url: url.to_string(),
        source: e,
    })
}

/// Extracts the race list from a schedule payload, keeping the API order.
pub fn parse_schedule(url: &str, body: &[u8]) -> Result<Vec<Race>, FetchError> {
    parse_response(url, body)?
        .mr_data
        .race_table
        .races
        .into_iter()
        .map(Race::try_from)
        .collect()
}

/// Extracts the results of the single race in a results payload.
///
/// One malformed entry fails the whole list.
pub fn parse_results(
    url: &str,
    round: u32,
    body: &[u8],
    headshot_template: &str,
) -> Result<Vec<RaceResult>, FetchError> {
    let race = parse_response(url, body)?
        .mr_data
        .race_table
        .races
        .into_iter()
        .next()
        .ok_or(FetchError::MissingRace { round })?;

    race.results
        .into_iter()
        .map(|raw| raw.into_result(headshot_template))
        .collect()
}

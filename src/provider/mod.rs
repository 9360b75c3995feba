use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ORIGIN, REFERER, USER_AGENT};
use reqwest::Client;
use thiserror::Error;

use crate::models::{CoachRecord, ResultSet, StatsResponse};

pub const DEFAULT_BASE_URL: &str = "https://stats.nba.com/stats";

/// Position of the coaching-staff table in a commonteamroster response.
/// Tables are positional; `CommonTeamRoster` (players) comes first.
const COACHES_TABLE_INDEX: usize = 1;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request to {endpoint} failed: {source}")]
    Request {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{endpoint} returned HTTP {status}")]
    Status {
        endpoint: &'static str,
        status: reqwest::StatusCode,
    },
    #[error("could not decode {endpoint} response: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("result set {name} (index {index}) missing from response")]
    MissingResultSet { index: usize, name: String },
    #[error("expected result set {expected} at index {index}, found {found}")]
    UnexpectedResultSet {
        index: usize,
        expected: String,
        found: String,
    },
    #[error("result set {result_set} has no column {column}")]
    MissingColumn { result_set: String, column: String },
    #[error("result set {name} has no rows")]
    EmptyResultSet { name: String },
    #[error("invalid value for {column}: {value}")]
    InvalidValue { column: String, value: String },
}

/// Client for the stats.nba.com endpoints the gateway depends on.
#[derive(Debug, Clone)]
pub struct StatsClient {
    client: Client,
    base_url: String,
    season: String,
}

impl StatsClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration, season: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .default_headers(default_headers())
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            season: season.into(),
        })
    }

    async fn get(&self, endpoint: &'static str, query: &[(&str, &str)]) -> Result<StatsResponse, ProviderError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        tracing::debug!("GET {} {:?}", url, query);

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|source| ProviderError::Request { endpoint, source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status { endpoint, status });
        }

        response
            .json::<StatsResponse>()
            .await
            .map_err(|source| ProviderError::Decode { endpoint, source })
    }

    /// boxscoresummaryv2 - `GameSummary` table
    pub async fn box_score_summary(&self, game_id: &str) -> Result<ResultSet, ProviderError> {
        self.get("boxscoresummaryv2", &[("GameID", game_id)])
            .await?
            .into_result_set(0, "GameSummary")
    }

    /// playbyplayv2 - `PlayByPlay` table covering every period
    pub async fn play_by_play(&self, game_id: &str) -> Result<ResultSet, ProviderError> {
        self.get(
            "playbyplayv2",
            &[("GameID", game_id), ("StartPeriod", "0"), ("EndPeriod", "14")],
        )
        .await?
        .into_result_set(0, "PlayByPlay")
    }

    /// commonteamroster - coaching staff table only
    pub async fn team_coaches(&self, team_id: i64) -> Result<Vec<CoachRecord>, ProviderError> {
        let team_id = team_id.to_string();
        let coaches = self
            .get(
                "commonteamroster",
                &[("TeamID", team_id.as_str()), ("Season", self.season.as_str()), ("LeagueID", "00")],
            )
            .await?
            .into_result_set(COACHES_TABLE_INDEX, "Coaches")?;

        Ok(coaches.records())
    }

    /// teaminfocommon - `TeamInfoCommon` table
    pub async fn team_info(&self, team_id: i64) -> Result<ResultSet, ProviderError> {
        let team_id = team_id.to_string();
        self.get(
            "teaminfocommon",
            &[
                ("TeamID", team_id.as_str()),
                ("Season", self.season.as_str()),
                ("SeasonType", "Regular Season"),
                ("LeagueID", "00"),
            ],
        )
        .await?
        .into_result_set(0, "TeamInfoCommon")
    }
}

// stats.nba.com drops requests that don't look like they come from nba.com
fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_static(
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36",
        ),
    );
    headers.insert(ACCEPT, HeaderValue::from_static("application/json, text/plain, */*"));
    headers.insert(REFERER, HeaderValue::from_static("https://www.nba.com/"));
    headers.insert(ORIGIN, HeaderValue::from_static("https://www.nba.com"));
    headers.insert("x-nba-stats-origin", HeaderValue::from_static("stats"));
    headers.insert("x-nba-stats-token", HeaderValue::from_static("true"));
    headers
}

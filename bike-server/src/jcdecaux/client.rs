//! HTTP client for the JCDecaux self-service bike API.

use crate::domain::Station;
use crate::planner::{PlanError, StationProvider};

use super::error::FeedError;
use super::types::StationRecord;

/// Default base URL for the JCDecaux VLS API.
const DEFAULT_BASE_URL: &str = "https://api.jcdecaux.com/vls/v1";

/// Configuration for the station feed client.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// API key, passed as the `apiKey` query parameter
    pub api_key: String,
    /// Contract city (e.g. "dublin")
    pub contract: String,
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl FeedConfig {
    /// Create a new config for the given API key and contract city.
    pub fn new(api_key: impl Into<String>, contract: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            contract: contract.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

/// Client for the JCDecaux station feed.
#[derive(Debug, Clone)]
pub struct JcdecauxClient {
    http: reqwest::Client,
    api_key: String,
    contract: String,
    base_url: String,
}

impl JcdecauxClient {
    /// Create a new feed client.
    pub fn new(config: FeedConfig) -> Result<Self, FeedError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            api_key: config.api_key,
            contract: config.contract,
            base_url: config.base_url,
        })
    }

    /// Fetch the full live station list for the configured contract.
    ///
    /// Every record is converted to a domain [`Station`]; a single bad
    /// record fails the whole snapshot rather than silently dropping data.
    pub async fn fetch_all(&self) -> Result<Vec<Station>, FeedError> {
        let url = format!("{}/stations", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("apiKey", self.api_key.as_str()),
                ("contract", self.contract.as_str()),
            ])
            .send()
            .await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(FeedError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FeedError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let records: Vec<StationRecord> =
            serde_json::from_str(&body).map_err(|e| FeedError::Json {
                message: e.to_string(),
            })?;

        records
            .into_iter()
            .map(StationRecord::into_station)
            .collect()
    }
}

impl StationProvider for JcdecauxClient {
    async fn stations(&self) -> Result<Vec<Station>, PlanError> {
        self.fetch_all().await.map_err(|e| PlanError::StationFeed {
            message: e.to_string(),
        })
    }
}

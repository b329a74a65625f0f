//! HTTP client for the OpenWeather One Call API.

use serde::{Deserialize, Serialize};

use crate::domain::Coordinate;

use super::error::WeatherError;

/// Default base URL for the One Call API.
const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/3.0";

/// A weather observation at a place and time.
///
/// `temp` is degrees Celsius (the client requests metric units).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherObservation {
    pub temp: f64,
    pub icon: String,
    pub description: Option<String>,
}

/// Configuration for the weather client.
#[derive(Debug, Clone)]
pub struct WeatherConfig {
    /// API key, passed as the `appid` query parameter
    pub api_key: String,
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl WeatherConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
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

/// One Call current-conditions response (the parts we read).
#[derive(Debug, Deserialize)]
struct OneCallResponse {
    current: WeatherBlock,
}

/// Timemachine response: one data point per requested timestamp.
#[derive(Debug, Deserialize)]
struct TimeMachineResponse {
    data: Vec<WeatherBlock>,
}

#[derive(Debug, Deserialize)]
struct WeatherBlock {
    temp: f64,
    #[serde(default)]
    weather: Vec<ConditionBlock>,
}

#[derive(Debug, Deserialize)]
struct ConditionBlock {
    icon: String,
    description: String,
}

impl WeatherBlock {
    fn into_observation(mut self) -> Result<WeatherObservation, WeatherError> {
        if self.weather.is_empty() {
            return Err(WeatherError::Missing {
                what: "weather conditions",
            });
        }
        let condition = self.weather.swap_remove(0);

        Ok(WeatherObservation {
            temp: self.temp,
            icon: condition.icon,
            description: Some(condition.description),
        })
    }
}

/// Client for the weather feed.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl WeatherClient {
    /// Create a new weather client.
    pub fn new(config: WeatherConfig) -> Result<Self, WeatherError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            api_key: config.api_key,
            base_url: config.base_url,
        })
    }

    /// Current conditions at a coordinate.
    pub async fn current(&self, at: Coordinate) -> Result<WeatherObservation, WeatherError> {
        let url = format!("{}/onecall", self.base_url);

        let body = self
            .get_checked(&url, &[
                ("lat", at.lat.to_string()),
                ("lon", at.lon.to_string()),
                ("appid", self.api_key.clone()),
                ("exclude", "minutely,hourly,daily,alerts".to_string()),
                ("units", "metric".to_string()),
            ])
            .await?;

        let response: OneCallResponse =
            serde_json::from_str(&body).map_err(|e| WeatherError::Json {
                message: e.to_string(),
            })?;

        response.current.into_observation()
    }

    /// Conditions at a coordinate at the given unix timestamp.
    ///
    /// The upstream "timemachine" endpoint serves both historical data and
    /// near-term forecasts.
    pub async fn at_time(
        &self,
        at: Coordinate,
        timestamp: i64,
    ) -> Result<WeatherObservation, WeatherError> {
        let url = format!("{}/onecall/timemachine", self.base_url);

        let body = self
            .get_checked(&url, &[
                ("lat", at.lat.to_string()),
                ("lon", at.lon.to_string()),
                ("dt", timestamp.to_string()),
                ("appid", self.api_key.clone()),
                ("units", "metric".to_string()),
            ])
            .await?;

        let response: TimeMachineResponse =
            serde_json::from_str(&body).map_err(|e| WeatherError::Json {
                message: e.to_string(),
            })?;

        response
            .data
            .into_iter()
            .next()
            .ok_or(WeatherError::Missing {
                what: "timemachine data point",
            })?
            .into_observation()
    }

    /// GET with status checking, returning the response body.
    async fn get_checked(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<String, WeatherError> {
        let response = self.http.get(url).query(query).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(WeatherError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WeatherError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = WeatherConfig::new("test-api-key");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn config_with_base_url() {
        let config = WeatherConfig::new("test-api-key").with_base_url("http://localhost:8080");
        assert_eq!(config.base_url, "http://localhost:8080");
    }

    #[test]
    fn parse_current_response() {
        let json = r#"{
            "lat": 53.3476, "lon": -6.2637, "timezone": "Europe/Dublin",
            "current": {
                "dt": 1743017799, "temp": 11.4, "humidity": 81,
                "weather": [{"id": 804, "main": "Clouds",
                             "description": "overcast clouds", "icon": "04d"}]
            }
        }"#;

        let response: OneCallResponse = serde_json::from_str(json).unwrap();
        let obs = response.current.into_observation().unwrap();

        assert_eq!(obs.temp, 11.4);
        assert_eq!(obs.icon, "04d");
        assert_eq!(obs.description.as_deref(), Some("overcast clouds"));
    }

    #[test]
    fn parse_timemachine_response() {
        let json = r#"{
            "lat": 53.3476, "lon": -6.2637, "timezone": "Europe/Dublin",
            "data": [{
                "dt": 1744108800, "temp": 9.2,
                "weather": [{"id": 500, "main": "Rain",
                             "description": "light rain", "icon": "10d"}]
            }]
        }"#;

        let response: TimeMachineResponse = serde_json::from_str(json).unwrap();
        let obs = response.data.into_iter().next().unwrap().into_observation().unwrap();

        assert_eq!(obs.temp, 9.2);
        assert_eq!(obs.icon, "10d");
    }

    #[test]
    fn missing_conditions_is_an_error() {
        let block = WeatherBlock {
            temp: 10.0,
            weather: Vec::new(),
        };

        let err = block.into_observation().unwrap_err();
        assert!(matches!(err, WeatherError::Missing { .. }));
    }

    #[test]
    fn empty_timemachine_data_is_an_error() {
        let json = r#"{"lat": 53.3, "lon": -6.2, "data": []}"#;
        let response: TimeMachineResponse = serde_json::from_str(json).unwrap();
        assert!(response.data.is_empty());
    }
}

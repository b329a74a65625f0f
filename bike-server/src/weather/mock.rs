//! Mock weather provider for testing without API access.

use crate::domain::Coordinate;
use crate::planner::{PlanError, WeatherProvider};

use super::WeatherObservation;

/// In-memory weather provider serving a fixed observation.
///
/// Current-conditions and timestamped lookups can fail independently,
/// which lets tests exercise both the degrade-and-continue enrichment
/// path and the fatal predictive-feature path.
#[derive(Debug, Clone)]
pub struct MockWeather {
    temp: f64,
    fail_current: bool,
    fail_at_time: bool,
}

impl MockWeather {
    /// A provider reporting the given temperature everywhere, always.
    pub fn with_temp(temp: f64) -> Self {
        Self {
            temp,
            fail_current: false,
            fail_at_time: false,
        }
    }

    /// Make current-conditions lookups fail.
    pub fn failing_current(mut self) -> Self {
        self.fail_current = true;
        self
    }

    /// Make timestamped lookups fail.
    pub fn failing_at_time(mut self) -> Self {
        self.fail_at_time = true;
        self
    }

    fn observation(&self) -> WeatherObservation {
        WeatherObservation {
            temp: self.temp,
            icon: "04d".to_string(),
            description: Some("overcast clouds".to_string()),
        }
    }
}

impl WeatherProvider for MockWeather {
    async fn current(&self, _at: Coordinate) -> Result<WeatherObservation, PlanError> {
        if self.fail_current {
            return Err(PlanError::Weather {
                message: "mock weather unavailable".to_string(),
            });
        }
        Ok(self.observation())
    }

    async fn at_time(
        &self,
        _at: Coordinate,
        _timestamp: i64,
    ) -> Result<WeatherObservation, PlanError> {
        if self.fail_at_time {
            return Err(PlanError::Weather {
                message: "mock weather unavailable".to_string(),
            });
        }
        Ok(self.observation())
    }
}

//! Mock station feed for testing without API access.

use chrono::{TimeZone, Utc};

use crate::domain::{Availability, Coordinate, Station, StationId, StationStatus};
use crate::planner::{PlanError, StationProvider};

/// In-memory station feed serving a fixed snapshot.
///
/// With `failing()`, every fetch reports the feed as unavailable, which
/// lets tests exercise the planner's fatal-upstream path.
#[derive(Debug, Clone, Default)]
pub struct MockStationFeed {
    stations: Vec<Station>,
    fail: bool,
}

impl MockStationFeed {
    /// Serve the given snapshot.
    pub fn new(stations: Vec<Station>) -> Self {
        Self {
            stations,
            fail: false,
        }
    }

    /// A feed whose every fetch fails.
    pub fn failing() -> Self {
        Self {
            stations: Vec::new(),
            fail: true,
        }
    }

    /// Build a station with the given id, position, and availability.
    ///
    /// Convenience for tests; name and address are derived from the id.
    pub fn station(id: u32, lat: f64, lon: f64, bikes: u32, stands: u32) -> Station {
        Station {
            id: StationId(id),
            name: format!("STATION {id}"),
            address: format!("Station {id}"),
            position: Coordinate::new(lat, lon),
            availability: Availability {
                status: StationStatus::Open,
                available_bikes: bikes,
                available_bike_stands: stands,
                last_update: Utc.with_ymd_and_hms(2025, 3, 26, 19, 0, 0).unwrap(),
            },
        }
    }
}

impl StationProvider for MockStationFeed {
    async fn stations(&self) -> Result<Vec<Station>, PlanError> {
        if self.fail {
            return Err(PlanError::StationFeed {
                message: "mock feed unavailable".to_string(),
            });
        }
        Ok(self.stations.clone())
    }
}

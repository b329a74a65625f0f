//! Bike-share station types.

use std::fmt;

use chrono::{DateTime, Utc};

use super::Coordinate;

/// Error returned when parsing an unknown station status string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown station status: {value}")]
pub struct InvalidStatus {
    pub value: String,
}

/// Operator-assigned station number.
///
/// Stable across snapshots; the upstream feed calls this field `number`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StationId(pub u32);

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether a station is in service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StationStatus {
    Open,
    Closed,
}

impl StationStatus {
    /// Parse the upstream feed's status string (`"OPEN"` / `"CLOSED"`).
    pub fn parse(s: &str) -> Result<Self, InvalidStatus> {
        match s {
            "OPEN" => Ok(StationStatus::Open),
            "CLOSED" => Ok(StationStatus::Closed),
            other => Err(InvalidStatus {
                value: other.to_string(),
            }),
        }
    }

    /// The upstream representation of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            StationStatus::Open => "OPEN",
            StationStatus::Closed => "CLOSED",
        }
    }
}

/// Live availability fields from the station feed.
///
/// A pass-through view of the upstream feed at call time: never cached,
/// never authoritative beyond the request that fetched it.
#[derive(Debug, Clone, PartialEq)]
pub struct Availability {
    pub status: StationStatus,
    pub available_bikes: u32,
    pub available_bike_stands: u32,
    pub last_update: DateTime<Utc>,
}

/// A physical bike-share dock location.
///
/// Identity and position are fixed; `availability` is the mutable live
/// state re-fetched on every planning request.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub id: StationId,
    pub name: String,
    pub address: String,
    pub position: Coordinate,
    pub availability: Availability,
}

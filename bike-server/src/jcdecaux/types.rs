//! Wire types for the station feed.

use chrono::DateTime;
use serde::Deserialize;

use crate::domain::{Availability, Coordinate, Station, StationId, StationStatus};

use super::error::FeedError;

/// Station position as sent by the feed.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Position {
    pub lat: f64,
    pub lng: f64,
}

/// A single station record from the feed.
///
/// The feed sends `last_update` as epoch milliseconds and `status` as an
/// uppercase string.
#[derive(Debug, Clone, Deserialize)]
pub struct StationRecord {
    pub number: u32,
    pub name: String,
    pub address: String,
    pub position: Position,
    pub status: String,
    pub available_bikes: u32,
    pub available_bike_stands: u32,
    pub last_update: i64,
}

impl StationRecord {
    /// Convert a wire record to a domain [`Station`].
    pub fn into_station(self) -> Result<Station, FeedError> {
        let status = StationStatus::parse(&self.status).map_err(|e| FeedError::BadRecord {
            station: self.number,
            message: e.to_string(),
        })?;

        let last_update =
            DateTime::from_timestamp_millis(self.last_update).ok_or(FeedError::BadRecord {
                station: self.number,
                message: format!("last_update out of range: {}", self.last_update),
            })?;

        Ok(Station {
            id: StationId(self.number),
            name: self.name,
            address: self.address,
            position: Coordinate::new(self.position.lat, self.position.lng),
            availability: Availability {
                status,
                available_bikes: self.available_bikes,
                available_bike_stands: self.available_bike_stands,
                last_update,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike};

    use super::*;

    const SAMPLE: &str = r#"{
        "number": 42,
        "contract_name": "dublin",
        "name": "SMITHFIELD NORTH",
        "address": "Smithfield North",
        "position": {"lat": 53.349562, "lng": -6.278198},
        "banking": true,
        "bonus": false,
        "bike_stands": 30,
        "available_bike_stands": 18,
        "available_bikes": 12,
        "status": "OPEN",
        "last_update": 1743017799000
    }"#;

    #[test]
    fn parse_and_convert_record() {
        let record: StationRecord = serde_json::from_str(SAMPLE).unwrap();
        let station = record.into_station().unwrap();

        assert_eq!(station.id, StationId(42));
        assert_eq!(station.name, "SMITHFIELD NORTH");
        assert_eq!(station.position.lat, 53.349562);
        assert_eq!(station.availability.status, StationStatus::Open);
        assert_eq!(station.availability.available_bikes, 12);
        assert_eq!(station.availability.available_bike_stands, 18);

        // 1743017799000 ms = 2025-03-26 19:36:39 UTC
        let ts = station.availability.last_update;
        assert_eq!(ts.year(), 2025);
        assert_eq!(ts.month(), 3);
        assert_eq!(ts.day(), 26);
        assert_eq!(ts.hour(), 19);
        assert_eq!(ts.minute(), 36);
        assert_eq!(ts.second(), 39);
    }

    #[test]
    fn unknown_status_is_a_bad_record() {
        let mut record: StationRecord = serde_json::from_str(SAMPLE).unwrap();
        record.status = "DRAINED".to_string();

        let err = record.into_station().unwrap_err();
        match err {
            FeedError::BadRecord { station, message } => {
                assert_eq!(station, 42);
                assert!(message.contains("DRAINED"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn extra_fields_are_ignored() {
        // The feed carries fields we never use (banking, bonus, bike_stands);
        // deserialization must not reject them.
        let record: StationRecord = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(record.number, 42);
    }
}

//! Named station filter predicates.
//!
//! The station listing endpoint supports filtering by id, name, address,
//! and position. Each criterion is a named predicate; a query becomes an
//! explicit list of predicates, all of which must match.

use super::{Coordinate, Station, StationId};

/// Tolerance in degrees for near-exact position matching (~11 m).
const POSITION_TOLERANCE_DEG: f64 = 1e-4;

/// A single filter criterion over stations.
///
/// Each variant is independently testable; a request composes zero or
/// more of them.
#[derive(Debug, Clone, PartialEq)]
pub enum StationFilter {
    /// Exact station id match.
    Id(StationId),

    /// Case-insensitive substring match on the station name.
    NameContains(String),

    /// Case-insensitive substring match on the station address.
    AddressContains(String),

    /// Latitude within [`POSITION_TOLERANCE_DEG`] of the given value.
    LatitudeNear(f64),

    /// Longitude within [`POSITION_TOLERANCE_DEG`] of the given value.
    LongitudeNear(f64),

    /// Within `max_km` great-circle kilometres of a reference point.
    Within { centre: Coordinate, max_km: f64 },
}

impl StationFilter {
    /// Whether a station satisfies this criterion.
    pub fn matches(&self, station: &Station) -> bool {
        match self {
            StationFilter::Id(id) => station.id == *id,
            StationFilter::NameContains(needle) => station
                .name
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            StationFilter::AddressContains(needle) => station
                .address
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            StationFilter::LatitudeNear(lat) => {
                (station.position.lat - lat).abs() <= POSITION_TOLERANCE_DEG
            }
            StationFilter::LongitudeNear(lon) => {
                (station.position.lon - lon).abs() <= POSITION_TOLERANCE_DEG
            }
            StationFilter::Within { centre, max_km } => {
                station.position.distance_km(centre) <= *max_km
            }
        }
    }
}

/// Apply all filters conjunctively, returning a new collection.
///
/// The input is never mutated; relative order of surviving stations is
/// preserved.
pub fn apply_filters(filters: &[StationFilter], stations: &[Station]) -> Vec<Station> {
    stations
        .iter()
        .filter(|s| filters.iter().all(|f| f.matches(s)))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::{Availability, StationStatus};

    fn station(id: u32, name: &str, address: &str, lat: f64, lon: f64) -> Station {
        Station {
            id: StationId(id),
            name: name.to_string(),
            address: address.to_string(),
            position: Coordinate::new(lat, lon),
            availability: Availability {
                status: StationStatus::Open,
                available_bikes: 5,
                available_bike_stands: 5,
                last_update: Utc::now(),
            },
        }
    }

    fn sample() -> Vec<Station> {
        vec![
            station(1, "CLARENDON ROW", "Clarendon Row", 53.340927, -6.262501),
            station(9, "EXCHEQUER STREET", "Exchequer Street", 53.343034, -6.263578),
            station(52, "YORK STREET EAST", "York Street East", 53.338755, -6.262003),
        ]
    }

    #[test]
    fn id_filter() {
        let f = StationFilter::Id(StationId(9));
        let out = apply_filters(&[f], &sample());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, StationId(9));
    }

    #[test]
    fn name_filter_is_case_insensitive() {
        let f = StationFilter::NameContains("york".to_string());
        let out = apply_filters(&[f], &sample());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, StationId(52));
    }

    #[test]
    fn address_filter() {
        let f = StationFilter::AddressContains("street".to_string());
        let out = apply_filters(&[f], &sample());
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn position_filters_use_tolerance() {
        let stations = sample();
        let lat = StationFilter::LatitudeNear(53.340900);
        assert!(lat.matches(&stations[0]));
        assert!(!lat.matches(&stations[1]));

        let lon = StationFilter::LongitudeNear(-6.262501);
        assert!(lon.matches(&stations[0]));
    }

    #[test]
    fn proximity_filter() {
        let f = StationFilter::Within {
            centre: Coordinate::new(53.3409, -6.2625),
            max_km: 0.25,
        };
        let out = apply_filters(&[f], &sample());
        // Exchequer Street is ~250m away; York Street East is within range.
        assert!(out.iter().any(|s| s.id == StationId(1)));
        assert!(!out.is_empty());
    }

    #[test]
    fn filters_compose_conjunctively() {
        let filters = vec![
            StationFilter::AddressContains("street".to_string()),
            StationFilter::NameContains("york".to_string()),
        ];
        let out = apply_filters(&filters, &sample());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, StationId(52));
    }

    #[test]
    fn empty_filter_list_keeps_everything() {
        let out = apply_filters(&[], &sample());
        assert_eq!(out.len(), 3);
    }
}

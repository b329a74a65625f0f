//! Candidate filtering and nearest-station selection.
//!
//! Pure helpers: they build new collections rather than mutating inputs,
//! and selection is deterministic for a fixed input order.

use crate::domain::{Coordinate, Station};

/// A station paired with its distance from a query point.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub station: Station,
    pub distance_km: f64,
}

/// Stations within `max_km` of `from`, each paired with its distance.
///
/// Returns a new collection; relative feed order is preserved.
pub fn nearby(stations: &[Station], from: Coordinate, max_km: f64) -> Vec<Candidate> {
    stations
        .iter()
        .filter_map(|station| {
            let distance_km = from.distance_km(&station.position);
            (distance_km <= max_km).then(|| Candidate {
                station: station.clone(),
                distance_km,
            })
        })
        .collect()
}

/// The item minimising `distance`, or `None` if `items` is empty.
///
/// Ties keep the first-encountered item. For candidates that is upstream
/// feed order: deterministic for a fixed snapshot, but not semantically
/// meaningful.
pub fn nearest_by<T>(items: &[T], distance: impl Fn(&T) -> f64) -> Option<&T> {
    let mut best: Option<(&T, f64)> = None;

    for item in items {
        let d = distance(item);
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((item, d)),
        }
    }

    best.map(|(item, _)| item)
}

/// The candidate nearest to its query point.
pub fn nearest(candidates: &[Candidate]) -> Option<&Candidate> {
    nearest_by(candidates, |c| c.distance_km)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jcdecaux::mock::MockStationFeed;

    fn station(id: u32, lat: f64, lon: f64) -> Station {
        MockStationFeed::station(id, lat, lon, 5, 5)
    }

    #[test]
    fn nearby_filters_by_distance() {
        let origin = Coordinate::new(53.3476, -6.2637);
        let stations = vec![
            station(1, 53.3489, -6.2612), // a few hundred metres
            station(2, 53.3960, -6.2637), // ~5.4 km north
            station(3, 53.3476, -6.2637), // at the origin
        ];

        let candidates = nearby(&stations, origin, 0.5);

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].station.id.0, 1);
        assert_eq!(candidates[1].station.id.0, 3);
        assert_eq!(candidates[1].distance_km, 0.0);
    }

    #[test]
    fn nearby_empty_when_nothing_is_walkable() {
        let origin = Coordinate::new(53.3476, -6.2637);
        let stations = vec![station(1, 53.3960, -6.2637)];

        assert!(nearby(&stations, origin, 0.5).is_empty());
    }

    #[test]
    fn nearby_does_not_mutate_input() {
        let origin = Coordinate::new(53.3476, -6.2637);
        let stations = vec![station(1, 53.3489, -6.2612), station(2, 53.3960, -6.2637)];
        let before = stations.clone();

        let _ = nearby(&stations, origin, 0.5);

        assert_eq!(stations, before);
    }

    #[test]
    fn nearest_picks_minimum_distance() {
        let origin = Coordinate::new(53.3476, -6.2637);
        let stations = vec![
            station(1, 53.3489, -6.2612),
            station(2, 53.3478, -6.2635), // closest
            station(3, 53.3495, -6.2660),
        ];
        let candidates = nearby(&stations, origin, 0.5);

        let best = nearest(&candidates).unwrap();
        assert_eq!(best.station.id.0, 2);
    }

    #[test]
    fn nearest_of_empty_is_none() {
        assert!(nearest(&[]).is_none());
    }

    #[test]
    fn equidistant_tie_keeps_first_in_input_order() {
        let items = [(7u32, 0.25), (8, 0.25), (9, 0.30)];
        let best = nearest_by(&items, |&(_, d)| d).unwrap();
        assert_eq!(best.0, 7);

        // Reversed order flips the winner: the tie-break is order, not id.
        let reversed = [(9u32, 0.30), (8, 0.25), (7, 0.25)];
        let best = nearest_by(&reversed, |&(_, d)| d).unwrap();
        assert_eq!(best.0, 8);
    }
}

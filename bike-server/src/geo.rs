//! Great-circle distance between coordinates.
//!
//! Station proximity is measured with the Haversine formula, which is
//! accurate to well under walking-distance tolerances for city-scale
//! separations.

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance in kilometres between two points given in
/// decimal degrees (WGS84).
///
/// Pure and deterministic. Inputs are not range-checked; non-finite
/// input produces NaN.
///
/// # Examples
///
/// ```
/// use bike_server::geo::haversine_km;
///
/// let d = haversine_km(53.3476, -6.2637, 53.3476, -6.2637);
/// assert_eq!(d, 0.0);
/// ```
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();

    let a = (dlat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn lat() -> impl Strategy<Value = f64> {
        -90.0..90.0f64
    }

    fn lon() -> impl Strategy<Value = f64> {
        -180.0..180.0f64
    }

    proptest! {
        /// Distance is symmetric in its endpoints.
        #[test]
        fn symmetry(lat1 in lat(), lon1 in lon(), lat2 in lat(), lon2 in lon()) {
            let ab = haversine_km(lat1, lon1, lat2, lon2);
            let ba = haversine_km(lat2, lon2, lat1, lon1);
            prop_assert!((ab - ba).abs() < 1e-9);
        }

        /// Distance from a point to itself is zero.
        #[test]
        fn self_distance_is_zero(lat in lat(), lon in lon()) {
            prop_assert!(haversine_km(lat, lon, lat, lon).abs() < 1e-9);
        }

        /// Distances are non-negative and bounded by half the circumference.
        #[test]
        fn bounded(lat1 in lat(), lon1 in lon(), lat2 in lat(), lon2 in lon()) {
            let d = haversine_km(lat1, lon1, lat2, lon2);
            prop_assert!(d >= 0.0);
            prop_assert!(d <= std::f64::consts::PI * EARTH_RADIUS_KM + 1e-6);
        }
    }
}

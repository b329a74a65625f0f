//! Configuration for the journey planner.

use crate::domain::Coordinate;

/// Configuration parameters for journey planning.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Maximum walking distance to a station (km).
    /// Stations further than this from a query point are never candidates.
    pub walkable_km: f64,

    /// Minimum live bike count for a start station in real-time mode.
    pub min_bikes: u32,

    /// Minimum live stand count for a destination station in real-time mode.
    pub min_stands: u32,

    /// Reference location for the predictive mode's single temperature
    /// lookup (the model's ambient-temperature feature).
    pub reference_point: Coordinate,
}

impl PlannerConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        walkable_km: f64,
        min_bikes: u32,
        min_stands: u32,
        reference_point: Coordinate,
    ) -> Self {
        Self {
            walkable_km,
            min_bikes,
            min_stands,
            reference_point,
        }
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            walkable_km: 0.5,
            min_bikes: 2,
            min_stands: 2,
            // Dublin city centre
            reference_point: Coordinate::new(53.3476, -6.2637),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlannerConfig::default();

        assert_eq!(config.walkable_km, 0.5);
        assert_eq!(config.min_bikes, 2);
        assert_eq!(config.min_stands, 2);
        assert_eq!(config.reference_point, Coordinate::new(53.3476, -6.2637));
    }

    #[test]
    fn custom_config() {
        let config = PlannerConfig::new(1.0, 1, 3, Coordinate::new(48.8566, 2.3522));

        assert_eq!(config.walkable_km, 1.0);
        assert_eq!(config.min_bikes, 1);
        assert_eq!(config.min_stands, 3);
        assert_eq!(config.reference_point.lat, 48.8566);
    }
}

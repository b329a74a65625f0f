//! Journey-planning decision engine.
//!
//! Answers: "where should I pick up a bike near my start point, and where
//! should I drop it off near my destination?" Combines the live station
//! snapshot, proximity filtering, and either live availability fields
//! (real-time mode) or model predictions (predictive mode).

mod config;
mod plan;
mod select;

use crate::domain::{Coordinate, Station};
use crate::weather::WeatherObservation;

pub use config::PlannerConfig;
pub use plan::{
    JourneyPlan, JourneyPlanner, PlanError, PlanMode, PlanRequest, SelectedStation,
};

/// Source of live station snapshots.
///
/// This abstraction allows the planner to be tested with mock data.
/// Implementations fetch the full current station list at call time;
/// failure is fatal to the planning request.
pub trait StationProvider {
    /// Fetch all stations with live availability fields populated.
    async fn stations(&self) -> Result<Vec<Station>, PlanError>;
}

/// Source of weather observations.
///
/// Current conditions feed best-effort enrichment; timestamped lookups
/// supply the predictive mode's temperature feature.
pub trait WeatherProvider {
    /// Current conditions at a coordinate.
    async fn current(&self, at: Coordinate) -> Result<WeatherObservation, PlanError>;

    /// Conditions at a coordinate at the given unix timestamp.
    async fn at_time(
        &self,
        at: Coordinate,
        timestamp: i64,
    ) -> Result<WeatherObservation, PlanError>;
}

//! The journey-planning state machine.
//!
//! Per request: snapshot the station feed, proximity-filter both ends,
//! branch on mode, select the nearest surviving candidate per side,
//! enrich with weather context, and assemble the result. Requests are
//! independent, read-only, and idempotent for a fixed upstream snapshot.

use tracing::{debug, warn};

use crate::domain::{Coordinate, Station};
use crate::predict::{AvailabilityPredictor, PredictError, Target};
use crate::weather::WeatherObservation;

use super::config::PlannerConfig;
use super::select::{Candidate, nearby, nearest, nearest_by};
use super::{StationProvider, WeatherProvider};

/// Error from journey planning.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PlanError {
    /// Station feed failed; fatal to the whole request
    #[error("station feed unavailable: {message}")]
    StationFeed { message: String },

    /// Weather lookup failed where it was required
    #[error("weather lookup failed: {message}")]
    Weather { message: String },

    /// Model inference failed
    #[error("prediction failed: {0}")]
    Predict(#[from] PredictError),

    /// No candidate start station survived filtering
    #[error("no bike station with enough bikes near the start location")]
    NoStartStation,

    /// No candidate destination station survived filtering
    #[error("no bike station with enough stands near the destination")]
    NoDestinationStation,
}

/// How availability is judged, decided once at request entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanMode {
    /// Trust the live snapshot's availability fields.
    RealTime,

    /// Trust model predictions for the given future unix timestamp;
    /// live fields are meaningless for a future time.
    Predictive { timestamp: i64 },
}

impl PlanMode {
    /// Predictive if a timestamp was supplied, real-time otherwise.
    pub fn from_timestamp(timestamp: Option<i64>) -> Self {
        match timestamp {
            Some(timestamp) => PlanMode::Predictive { timestamp },
            None => PlanMode::RealTime,
        }
    }
}

/// A journey-planning request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanRequest {
    pub start: Coordinate,
    pub destination: Coordinate,
    pub mode: PlanMode,
}

/// A station selected for one side of a journey.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedStation {
    pub station: Station,

    /// Great-circle distance from the query point, in km.
    pub distance_km: f64,

    /// Predicted availability count (predictive mode only). Bikes for the
    /// start side, stands for the destination side.
    pub predicted_availability: Option<u32>,

    /// Weather context at the station, when enrichment succeeded.
    pub weather: Option<WeatherObservation>,
}

/// The planner's answer: one station per side.
#[derive(Debug, Clone, PartialEq)]
pub struct JourneyPlan {
    pub start: SelectedStation,
    pub destination: SelectedStation,
}

/// The journey-planning decision engine.
///
/// Borrows its collaborators; per-request state lives on the stack of
/// [`JourneyPlanner::plan`].
pub struct JourneyPlanner<'a, S, W> {
    stations: &'a S,
    weather: &'a W,
    predictor: &'a AvailabilityPredictor,
    config: &'a PlannerConfig,
}

impl<'a, S: StationProvider, W: WeatherProvider> JourneyPlanner<'a, S, W> {
    /// Create a new planner.
    pub fn new(
        stations: &'a S,
        weather: &'a W,
        predictor: &'a AvailabilityPredictor,
        config: &'a PlannerConfig,
    ) -> Self {
        Self {
            stations,
            weather,
            predictor,
            config,
        }
    }

    /// Plan a journey.
    ///
    /// Fails with [`PlanError::NoStartStation`] /
    /// [`PlanError::NoDestinationStation`] when a side has no usable
    /// candidate; these are expected outcomes, not system faults.
    pub async fn plan(&self, request: &PlanRequest) -> Result<JourneyPlan, PlanError> {
        let stations = self.stations.stations().await?;

        // Proximity-filter both ends before any per-candidate work, so
        // predictive inference cost is linear in nearby stations only.
        let start_candidates = nearby(&stations, request.start, self.config.walkable_km);
        let dest_candidates = nearby(&stations, request.destination, self.config.walkable_km);
        debug!(
            total = stations.len(),
            start = start_candidates.len(),
            dest = dest_candidates.len(),
            mode = ?request.mode,
            "proximity filter done"
        );

        match request.mode {
            PlanMode::RealTime => self.plan_realtime(start_candidates, dest_candidates).await,
            PlanMode::Predictive { timestamp } => {
                self.plan_predictive(timestamp, start_candidates, dest_candidates)
                    .await
            }
        }
    }

    /// Real-time branch: filter on the live availability fields.
    async fn plan_realtime(
        &self,
        start_candidates: Vec<Candidate>,
        dest_candidates: Vec<Candidate>,
    ) -> Result<JourneyPlan, PlanError> {
        let with_bikes: Vec<Candidate> = start_candidates
            .into_iter()
            .filter(|c| c.station.availability.available_bikes >= self.config.min_bikes)
            .collect();
        let with_stands: Vec<Candidate> = dest_candidates
            .into_iter()
            .filter(|c| c.station.availability.available_bike_stands >= self.config.min_stands)
            .collect();

        let start = nearest(&with_bikes)
            .cloned()
            .ok_or(PlanError::NoStartStation)?;
        let destination = nearest(&with_stands)
            .cloned()
            .ok_or(PlanError::NoDestinationStation)?;

        // Weather is annotation only here: failures degrade to no context.
        let (start_weather, dest_weather) = futures::join!(
            self.weather.current(start.station.position),
            self.weather.current(destination.station.position),
        );

        Ok(JourneyPlan {
            start: selected(start, None, discard_failure(start_weather, "start")),
            destination: selected(destination, None, discard_failure(dest_weather, "destination")),
        })
    }

    /// Predictive branch: drop candidates the model scores at zero.
    async fn plan_predictive(
        &self,
        timestamp: i64,
        start_candidates: Vec<Candidate>,
        dest_candidates: Vec<Candidate>,
    ) -> Result<JourneyPlan, PlanError> {
        // The temperature feature comes from a single reference-location
        // lookup; it is required by the model, so failure here is fatal.
        let reference = self
            .weather
            .at_time(self.config.reference_point, timestamp)
            .await?;
        let temp = reference.temp;

        let start_pool = self.score(&start_candidates, timestamp, temp, Target::Bike)?;
        let dest_pool = self.score(&dest_candidates, timestamp, temp, Target::Stand)?;
        debug!(
            start_scored = start_pool.len(),
            dest_scored = dest_pool.len(),
            temp,
            "predictive filter done"
        );

        let (start, predicted_bikes) = nearest_by(&start_pool, |(c, _)| c.distance_km)
            .cloned()
            .ok_or(PlanError::NoStartStation)?;
        let (destination, predicted_stands) = nearest_by(&dest_pool, |(c, _)| c.distance_km)
            .cloned()
            .ok_or(PlanError::NoDestinationStation)?;

        // Enrichment at each station's own coordinate; best-effort.
        let (start_weather, dest_weather) = futures::join!(
            self.weather.at_time(start.station.position, timestamp),
            self.weather.at_time(destination.station.position, timestamp),
        );

        Ok(JourneyPlan {
            start: selected(
                start,
                Some(predicted_bikes),
                discard_failure(start_weather, "start"),
            ),
            destination: selected(
                destination,
                Some(predicted_stands),
                discard_failure(dest_weather, "destination"),
            ),
        })
    }

    /// Score each candidate with the model, keeping only those predicted
    /// to have at least one whole bike or stand.
    fn score(
        &self,
        candidates: &[Candidate],
        timestamp: i64,
        temp: f64,
        target: Target,
    ) -> Result<Vec<(Candidate, u32)>, PlanError> {
        let mut scored = Vec::with_capacity(candidates.len());

        for candidate in candidates {
            let predicted = self
                .predictor
                .predict(candidate.station.id, timestamp, temp, target)?;
            let count = predicted.floor() as u32;

            if count == 0 {
                debug!(
                    station = %candidate.station.id,
                    target = target.as_str(),
                    predicted,
                    "dropping candidate with no predicted availability"
                );
                continue;
            }

            scored.push((candidate.clone(), count));
        }

        Ok(scored)
    }
}

/// Assemble a [`SelectedStation`] from its parts.
fn selected(
    candidate: Candidate,
    predicted_availability: Option<u32>,
    weather: Option<WeatherObservation>,
) -> SelectedStation {
    SelectedStation {
        station: candidate.station,
        distance_km: candidate.distance_km,
        predicted_availability,
        weather,
    }
}

/// Log and swallow an enrichment failure.
fn discard_failure(
    result: Result<WeatherObservation, PlanError>,
    side: &str,
) -> Option<WeatherObservation> {
    match result {
        Ok(observation) => Some(observation),
        Err(e) => {
            warn!(error = %e, side, "weather enrichment failed; omitting annotation");
            None
        }
    }
}

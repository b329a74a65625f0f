//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::CachedWeatherClient;
use crate::jcdecaux::JcdecauxClient;
use crate::planner::PlannerConfig;
use crate::predict::AvailabilityPredictor;

/// Shared application state.
///
/// Contains all the services needed to handle requests. Everything here
/// is immutable after startup and shared read-only across requests.
#[derive(Clone)]
pub struct AppState {
    /// Live station feed client
    pub feed: Arc<JcdecauxClient>,

    /// Cached weather client
    pub weather: Arc<CachedWeatherClient>,

    /// Loaded prediction models
    pub predictor: Arc<AvailabilityPredictor>,

    /// Journey planner configuration
    pub config: Arc<PlannerConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        feed: JcdecauxClient,
        weather: CachedWeatherClient,
        predictor: AvailabilityPredictor,
        config: PlannerConfig,
    ) -> Self {
        Self {
            feed: Arc::new(feed),
            weather: Arc::new(weather),
            predictor: Arc::new(predictor),
            config: Arc::new(config),
        }
    }
}

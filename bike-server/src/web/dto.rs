//! Data transfer objects for web requests and responses.
//!
//! Response shapes mirror the upstream project's public API: stations
//! carry a nested `details` block with the live availability fields, and
//! planned stations an optional `prediction` block.

use serde::{Deserialize, Serialize};

use crate::domain::Station;
use crate::planner::SelectedStation;
use crate::predict::Target;

/// Query parameters for `/api/plan-journey`.
///
/// Coordinates arrive as strings and are parsed explicitly so that a bad
/// value yields a clean 400 rather than a framework rejection.
#[derive(Debug, Deserialize)]
pub struct PlanJourneyParams {
    pub start_lat: String,
    pub start_lon: String,
    pub dest_lat: String,
    pub dest_lon: String,

    /// Unix timestamp for future journeys; absent means real-time mode.
    pub timestamp: Option<String>,
}

/// Query parameters for `/api/plan-journey/future`.
#[derive(Debug, Deserialize)]
pub struct FutureParams {
    pub station_id: String,
    pub timestamp: String,
}

/// Query parameters for `/api/stations`.
#[derive(Debug, Deserialize)]
pub struct StationQueryParams {
    pub id: Option<String>,
    pub name: Option<String>,
    pub address: Option<String>,
    pub position_lat: Option<String>,
    pub position_lng: Option<String>,
    pub maxdist: Option<String>,
}

/// Query parameters for `/api/weather`.
#[derive(Debug, Deserialize)]
pub struct WeatherParams {
    pub lat: Option<String>,
    pub lon: Option<String>,
}

/// Live availability fields of a station.
#[derive(Debug, Serialize)]
pub struct StationDetails {
    pub status: String,
    pub last_update: String,
    pub available_bikes: u32,
    pub available_bike_stands: u32,
}

/// A station in API responses.
#[derive(Debug, Serialize)]
pub struct StationView {
    pub id: u32,
    pub name: String,
    pub address: String,
    pub lat: f64,
    pub lon: f64,
    pub details: StationDetails,
}

impl StationView {
    pub fn from_station(station: &Station) -> Self {
        Self {
            id: station.id.0,
            name: station.name.clone(),
            address: station.address.clone(),
            lat: station.position.lat,
            lon: station.position.lon,
            details: StationDetails {
                status: station.availability.status.as_str().to_string(),
                last_update: station
                    .availability
                    .last_update
                    .format("%Y-%m-%d %H:%M:%S")
                    .to_string(),
                available_bikes: station.availability.available_bikes,
                available_bike_stands: station.availability.available_bike_stands,
            },
        }
    }
}

/// Prediction and weather context attached to a planned station.
#[derive(Debug, Serialize)]
pub struct PredictionView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predicted_bike_availability: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub predicted_stand_availability: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub temp: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl PredictionView {
    fn is_empty(&self) -> bool {
        self.predicted_bike_availability.is_none()
            && self.predicted_stand_availability.is_none()
            && self.temp.is_none()
    }
}

/// A selected station in a journey plan response.
#[derive(Debug, Serialize)]
pub struct PlannedStationView {
    #[serde(flatten)]
    pub station: StationView,

    pub distance_km: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub prediction: Option<PredictionView>,
}

impl PlannedStationView {
    /// Shape a planner selection for the response.
    ///
    /// `target` says which predicted field the side carries: bikes for
    /// the start side, stands for the destination side.
    pub fn from_selected(selected: &SelectedStation, target: Target) -> Self {
        let (predicted_bikes, predicted_stands) = match target {
            Target::Bike => (selected.predicted_availability, None),
            Target::Stand => (None, selected.predicted_availability),
        };

        let prediction = PredictionView {
            predicted_bike_availability: predicted_bikes,
            predicted_stand_availability: predicted_stands,
            temp: selected.weather.as_ref().map(|w| w.temp),
            icon: selected.weather.as_ref().map(|w| w.icon.clone()),
            description: selected
                .weather
                .as_ref()
                .and_then(|w| w.description.clone()),
        };

        Self {
            station: StationView::from_station(&selected.station),
            distance_km: selected.distance_km,
            prediction: (!prediction.is_empty()).then_some(prediction),
        }
    }
}

/// Response for `/api/plan-journey`.
#[derive(Debug, Serialize)]
pub struct PlanJourneyResponse {
    pub start_station: PlannedStationView,
    pub destination_station: PlannedStationView,
}

/// Response for `/api/plan-journey/future`.
#[derive(Debug, Serialize)]
pub struct FutureResponse {
    pub station_id: u32,
    pub timestamp: i64,
    pub sufficient: bool,
}

/// Response for `/api/stations`.
#[derive(Debug, Serialize)]
pub struct StationsResponse {
    pub data: Vec<StationView>,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

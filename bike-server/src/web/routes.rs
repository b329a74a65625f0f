//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use tracing::error;

use crate::domain::{Coordinate, StationFilter, StationId, apply_filters};
use crate::planner::{JourneyPlanner, PlanError, PlanMode, PlanRequest, WeatherProvider};
use crate::predict::{PredictError, Target};
use crate::weather::WeatherObservation;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/stations", get(list_stations))
        .route("/api/weather", get(current_weather))
        .route("/api/plan-journey", get(plan_journey))
        .route("/api/plan-journey/future", get(plan_future))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Parse a required floating-point query value.
fn parse_f64(name: &str, value: &str) -> Result<f64, AppError> {
    value.trim().parse::<f64>().map_err(|_| AppError::BadRequest {
        message: format!("Invalid {name}: {value}"),
    })
}

/// Parse a required integer query value.
fn parse_i64(name: &str, value: &str) -> Result<i64, AppError> {
    value.trim().parse::<i64>().map_err(|_| AppError::BadRequest {
        message: format!("Invalid {name}: {value}"),
    })
}

/// Plan a journey between two coordinates.
async fn plan_journey(
    State(state): State<AppState>,
    Query(params): Query<PlanJourneyParams>,
) -> Result<Json<PlanJourneyResponse>, AppError> {
    let start = Coordinate::new(
        parse_f64("start_lat", &params.start_lat)?,
        parse_f64("start_lon", &params.start_lon)?,
    );
    let destination = Coordinate::new(
        parse_f64("dest_lat", &params.dest_lat)?,
        parse_f64("dest_lon", &params.dest_lon)?,
    );

    // The mode is decided once here; everything downstream dispatches on it.
    let mode = match &params.timestamp {
        Some(ts) => PlanMode::from_timestamp(Some(parse_i64("timestamp", ts)?)),
        None => PlanMode::RealTime,
    };

    let request = PlanRequest {
        start,
        destination,
        mode,
    };

    let planner = JourneyPlanner::new(
        state.feed.as_ref(),
        state.weather.as_ref(),
        state.predictor.as_ref(),
        state.config.as_ref(),
    );
    let plan = planner.plan(&request).await.map_err(AppError::from)?;

    Ok(Json(PlanJourneyResponse {
        start_station: PlannedStationView::from_selected(&plan.start, Target::Bike),
        destination_station: PlannedStationView::from_selected(&plan.destination, Target::Stand),
    }))
}

/// Single-station sufficiency verdict for a future timestamp.
async fn plan_future(
    State(state): State<AppState>,
    Query(params): Query<FutureParams>,
) -> Result<Json<FutureResponse>, AppError> {
    let station_id = params
        .station_id
        .trim()
        .parse::<u32>()
        .map_err(|_| AppError::BadRequest {
            message: format!("Invalid station_id: {}", params.station_id),
        })?;
    let timestamp = parse_i64("timestamp", &params.timestamp)?;

    let sufficient = state
        .predictor
        .sufficient(StationId(station_id), timestamp)
        .map_err(AppError::from)?;

    Ok(Json(FutureResponse {
        station_id,
        timestamp,
        sufficient,
    }))
}

/// Build the filter list for a station query.
///
/// Proximity filtering takes precedence when a full (lat, lng, maxdist)
/// triple is supplied; otherwise each present parameter contributes one
/// named predicate.
fn filters_from_params(params: &StationQueryParams) -> Result<Vec<StationFilter>, AppError> {
    let mut filters = Vec::new();

    if let (Some(lat), Some(lng), Some(maxdist)) =
        (&params.position_lat, &params.position_lng, &params.maxdist)
    {
        filters.push(StationFilter::Within {
            centre: Coordinate::new(
                parse_f64("position_lat", lat)?,
                parse_f64("position_lng", lng)?,
            ),
            max_km: parse_f64("maxdist", maxdist)?,
        });
        return Ok(filters);
    }

    if let Some(id) = &params.id {
        let id = id.trim().parse::<u32>().map_err(|_| AppError::BadRequest {
            message: format!("Invalid id: {id}"),
        })?;
        filters.push(StationFilter::Id(StationId(id)));
    }
    if let Some(name) = &params.name {
        filters.push(StationFilter::NameContains(name.clone()));
    }
    if let Some(address) = &params.address {
        filters.push(StationFilter::AddressContains(address.clone()));
    }
    if let Some(lat) = &params.position_lat {
        filters.push(StationFilter::LatitudeNear(parse_f64("position_lat", lat)?));
    }
    if let Some(lng) = &params.position_lng {
        filters.push(StationFilter::LongitudeNear(parse_f64(
            "position_lng",
            lng,
        )?));
    }

    Ok(filters)
}

/// List live stations, optionally filtered.
async fn list_stations(
    State(state): State<AppState>,
    Query(params): Query<StationQueryParams>,
) -> Result<Json<StationsResponse>, AppError> {
    let filters = filters_from_params(&params)?;

    let stations = state.feed.fetch_all().await.map_err(|e| AppError::Internal {
        message: e.to_string(),
    })?;

    let matched = apply_filters(&filters, &stations);
    if matched.is_empty() {
        return Err(AppError::NotFound {
            message: "no stations match the given filters".to_string(),
        });
    }

    Ok(Json(StationsResponse {
        data: matched.iter().map(StationView::from_station).collect(),
    }))
}

/// Dublin city centre, the default weather lookup location.
const DEFAULT_WEATHER_POINT: Coordinate = Coordinate {
    lat: 53.3476,
    lon: -6.2637,
};

/// Current weather at a coordinate.
async fn current_weather(
    State(state): State<AppState>,
    Query(params): Query<WeatherParams>,
) -> Result<Json<WeatherObservation>, AppError> {
    let at = match (&params.lat, &params.lon) {
        (Some(lat), Some(lon)) => {
            Coordinate::new(parse_f64("lat", lat)?, parse_f64("lon", lon)?)
        }
        (None, None) => DEFAULT_WEATHER_POINT,
        _ => {
            return Err(AppError::BadRequest {
                message: "lat and lon must be supplied together".to_string(),
            });
        }
    };

    let observation = state.weather.current(at).await.map_err(|e| AppError::Internal {
        message: e.to_string(),
    })?;

    Ok(Json(observation))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<PlanError> for AppError {
    fn from(e: PlanError) -> Self {
        match e {
            // Expected outcomes: user-visible 400s.
            PlanError::NoStartStation | PlanError::NoDestinationStation => AppError::BadRequest {
                message: e.to_string(),
            },
            // Upstream/model faults: 500 with a generic body.
            PlanError::StationFeed { .. } | PlanError::Weather { .. } | PlanError::Predict(_) => {
                AppError::Internal {
                    message: e.to_string(),
                }
            }
        }
    }
}

impl From<PredictError> for AppError {
    fn from(e: PredictError) -> Self {
        match e {
            PredictError::BadTimestamp(_) => AppError::BadRequest {
                message: e.to_string(),
            },
            _ => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => {
                // Log the detail; the response body stays generic.
                error!(%message, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { error: body })).into_response()
    }
}

use std::net::SocketAddr;
use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

use bike_server::cache::{CachedWeatherClient, WeatherCacheConfig};
use bike_server::jcdecaux::{FeedConfig, JcdecauxClient};
use bike_server::planner::PlannerConfig;
use bike_server::predict::AvailabilityPredictor;
use bike_server::weather::{WeatherClient, WeatherConfig};
use bike_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Get credentials from environment
    let jcdecaux_key = std::env::var("JCDECAUX_API_KEY").unwrap_or_else(|_| {
        eprintln!("Warning: JCDECAUX_API_KEY not set. Station feed calls will fail.");
        String::new()
    });
    let contract = std::env::var("JCDECAUX_CONTRACT").unwrap_or_else(|_| "dublin".to_string());
    let openweather_key = std::env::var("OPENWEATHER_API_KEY").unwrap_or_else(|_| {
        eprintln!("Warning: OPENWEATHER_API_KEY not set. Weather calls will fail.");
        String::new()
    });
    let model_dir =
        PathBuf::from(std::env::var("MODEL_DIR").unwrap_or_else(|_| "models".to_string()));

    // Load the trained model artifacts (fail fast if unavailable)
    println!("Loading model artifacts from {}...", model_dir.display());
    let predictor =
        AvailabilityPredictor::load(&model_dir).expect("Failed to load model artifacts");

    // Create upstream clients
    let feed = JcdecauxClient::new(FeedConfig::new(jcdecaux_key, contract))
        .expect("Failed to create station feed client");
    let weather_client = WeatherClient::new(WeatherConfig::new(openweather_key))
        .expect("Failed to create weather client");
    let weather = CachedWeatherClient::new(weather_client, &WeatherCacheConfig::default());

    // Build app state
    let state = AppState::new(feed, weather, predictor, PlannerConfig::default());

    // Create router
    let app = create_router(state);

    // Bind and serve
    let addr = SocketAddr::from(([0, 0, 0, 0], 8000));
    println!("Bike Journey Planner listening on http://{addr}");
    println!();
    println!("API Endpoints:");
    println!("  GET /health                  - Health check");
    println!("  GET /api/stations            - List (and filter) live stations");
    println!("  GET /api/weather             - Current weather at a coordinate");
    println!("  GET /api/plan-journey        - Plan a journey (live or predictive)");
    println!("  GET /api/plan-journey/future - Will a station have enough bikes?");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

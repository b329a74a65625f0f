//! Weather feed client.
//!
//! Provides current conditions (for real-time enrichment) and weather at
//! an arbitrary timestamp (the temperature feature for predictive
//! planning, and forecast enrichment).

mod client;
mod error;
pub mod mock;

pub use client::{WeatherClient, WeatherConfig, WeatherObservation};
pub use error::WeatherError;

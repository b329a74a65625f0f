//! Core domain types: stations, coordinates, and station filters.

mod coordinate;
mod filter;
mod station;

pub use coordinate::Coordinate;
pub use filter::{StationFilter, apply_filters};
pub use station::{Availability, InvalidStatus, Station, StationId, StationStatus};

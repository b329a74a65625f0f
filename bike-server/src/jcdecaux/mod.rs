//! JCDecaux bike-share station feed client.
//!
//! Fetches the full live station list for a contract city. The feed is
//! the source of truth for live availability: planners re-fetch it on
//! every request rather than caching it.

mod client;
mod error;
pub mod mock;
mod types;

pub use client::{FeedConfig, JcdecauxClient};
pub use error::FeedError;
pub use types::{Position, StationRecord};

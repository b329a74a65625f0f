//! Caching layer for weather responses.
//!
//! Timestamped (timemachine) lookups describe weather that never changes
//! once observed, so they cache with a long TTL. Current conditions get a
//! short TTL to stay fresh.
//!
//! Coordinate bucketing (3 decimal places, ~110 m) bounds cache
//! cardinality: every station inside a bucket shares one entry.
//!
//! The station feed is deliberately not cached here: planning requests
//! must see the live snapshot at call time.

use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::domain::Coordinate;
use crate::planner::{PlanError, WeatherProvider};
use crate::weather::{WeatherClient, WeatherError, WeatherObservation};

/// Cache key for current conditions: coordinate bucket.
type CurrentKey = (i64, i64);

/// Cache key for timestamped lookups: coordinate bucket plus unix timestamp.
type AtTimeKey = (i64, i64, i64);

/// Round a coordinate to its cache bucket.
fn bucket(at: Coordinate) -> (i64, i64) {
    ((at.lat * 1000.0).round() as i64, (at.lon * 1000.0).round() as i64)
}

/// Configuration for the weather cache.
#[derive(Debug, Clone)]
pub struct WeatherCacheConfig {
    /// TTL for current-conditions entries.
    pub current_ttl: Duration,

    /// TTL for timestamped entries.
    pub at_time_ttl: Duration,

    /// Maximum number of entries per cache.
    pub max_capacity: u64,
}

impl Default for WeatherCacheConfig {
    fn default() -> Self {
        Self {
            current_ttl: Duration::from_secs(120),
            at_time_ttl: Duration::from_secs(3600),
            max_capacity: 10_000,
        }
    }
}

/// Weather client with caching.
///
/// Wraps a [`WeatherClient`] and caches responses per coordinate bucket.
pub struct CachedWeatherClient {
    client: WeatherClient,
    current: MokaCache<CurrentKey, WeatherObservation>,
    at_time: MokaCache<AtTimeKey, WeatherObservation>,
}

impl CachedWeatherClient {
    /// Create a new cached client.
    pub fn new(client: WeatherClient, config: &WeatherCacheConfig) -> Self {
        let current = MokaCache::builder()
            .time_to_live(config.current_ttl)
            .max_capacity(config.max_capacity)
            .build();

        let at_time = MokaCache::builder()
            .time_to_live(config.at_time_ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self {
            client,
            current,
            at_time,
        }
    }

    /// Current conditions at a coordinate, using the cache if fresh.
    pub async fn current(&self, at: Coordinate) -> Result<WeatherObservation, WeatherError> {
        let key = bucket(at);

        if let Some(hit) = self.current.get(&key).await {
            return Ok(hit);
        }

        let observation = self.client.current(at).await?;
        self.current.insert(key, observation.clone()).await;
        Ok(observation)
    }

    /// Conditions at a coordinate and timestamp, using the cache if present.
    pub async fn at_time(
        &self,
        at: Coordinate,
        timestamp: i64,
    ) -> Result<WeatherObservation, WeatherError> {
        let (lat_b, lon_b) = bucket(at);
        let key = (lat_b, lon_b, timestamp);

        if let Some(hit) = self.at_time.get(&key).await {
            return Ok(hit);
        }

        let observation = self.client.at_time(at, timestamp).await?;
        self.at_time.insert(key, observation.clone()).await;
        Ok(observation)
    }

    /// Number of cached entries across both caches (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.current.entry_count() + self.at_time.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.current.invalidate_all();
        self.at_time.invalidate_all();
    }
}

impl WeatherProvider for CachedWeatherClient {
    async fn current(&self, at: Coordinate) -> Result<WeatherObservation, PlanError> {
        CachedWeatherClient::current(self, at)
            .await
            .map_err(|e| PlanError::Weather {
                message: e.to_string(),
            })
    }

    async fn at_time(
        &self,
        at: Coordinate,
        timestamp: i64,
    ) -> Result<WeatherObservation, PlanError> {
        CachedWeatherClient::at_time(self, at, timestamp)
            .await
            .map_err(|e| PlanError::Weather {
                message: e.to_string(),
            })
    }
}

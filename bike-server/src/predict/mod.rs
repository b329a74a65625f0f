//! Availability prediction.
//!
//! Wraps the pre-trained models exported by the training pipeline:
//! one count model per target (bikes, stands) with its mean-encoding
//! table, plus a sufficiency classifier. Artifacts load once at startup;
//! the loaded predictor is immutable and shared read-only across
//! requests.

mod error;
mod features;
mod model;

use std::path::Path;
use std::str::FromStr;

use serde::de::DeserializeOwned;

use crate::domain::StationId;

pub use error::PredictError;
pub use features::TimeFeatures;
pub use model::{CountModel, MeanEncoding, SufficiencyModel};

/// Which availability count a prediction is for.
///
/// The bike and stand models are separate artifacts and are never
/// cross-invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Bike,
    Stand,
}

impl Target {
    pub fn as_str(&self) -> &'static str {
        match self {
            Target::Bike => "bike",
            Target::Stand => "stand",
        }
    }
}

impl FromStr for Target {
    type Err = PredictError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bike" => Ok(Target::Bike),
            "stand" => Ok(Target::Stand),
            other => Err(PredictError::InvalidTarget(other.to_string())),
        }
    }
}

/// Artifact file names under the model directory.
const BIKE_COUNT_FILE: &str = "bike_count.json";
const STAND_COUNT_FILE: &str = "stand_count.json";
const BIKE_ENCODING_FILE: &str = "bike_encoding.json";
const STAND_ENCODING_FILE: &str = "stand_encoding.json";
const SUFFICIENCY_FILE: &str = "sufficiency.json";

/// The loaded prediction models.
///
/// Constructed once at startup (loading failure is a startup error, not a
/// per-request error) and injected into the planner. Safe for concurrent
/// read-only use.
#[derive(Debug, Clone)]
pub struct AvailabilityPredictor {
    bikes: CountModel,
    stands: CountModel,
    bike_encoding: MeanEncoding,
    stand_encoding: MeanEncoding,
    sufficiency: SufficiencyModel,
}

impl AvailabilityPredictor {
    /// Assemble a predictor from already-loaded parts.
    pub fn new(
        bikes: CountModel,
        stands: CountModel,
        bike_encoding: MeanEncoding,
        stand_encoding: MeanEncoding,
        sufficiency: SufficiencyModel,
    ) -> Self {
        Self {
            bikes,
            stands,
            bike_encoding,
            stand_encoding,
            sufficiency,
        }
    }

    /// Load all artifacts from a directory.
    ///
    /// Fails if any artifact is missing or corrupt. Idempotent: loading
    /// the same directory twice yields equivalent predictors.
    pub fn load(dir: &Path) -> Result<Self, PredictError> {
        Ok(Self {
            bikes: read_artifact(&dir.join(BIKE_COUNT_FILE))?,
            stands: read_artifact(&dir.join(STAND_COUNT_FILE))?,
            bike_encoding: read_artifact(&dir.join(BIKE_ENCODING_FILE))?,
            stand_encoding: read_artifact(&dir.join(STAND_ENCODING_FILE))?,
            sufficiency: read_artifact(&dir.join(SUFFICIENCY_FILE))?,
        })
    }

    /// Predicted availability count for a station at a future time.
    ///
    /// `ambient_temp` is degrees Celsius at the query time. The result is
    /// finite and non-negative for every station id, seen or unseen.
    pub fn predict(
        &self,
        station: StationId,
        timestamp: i64,
        ambient_temp: f64,
        target: Target,
    ) -> Result<f64, PredictError> {
        let features = TimeFeatures::from_unix(timestamp)?;

        let (model, encoding) = match target {
            Target::Bike => (&self.bikes, &self.bike_encoding),
            Target::Stand => (&self.stands, &self.stand_encoding),
        };

        Ok(model.predict(encoding.value(station), &features, ambient_temp))
    }

    /// Sufficient/insufficient verdict for bike availability at a station
    /// at a future time.
    pub fn sufficient(&self, station: StationId, timestamp: i64) -> Result<bool, PredictError> {
        let features = TimeFeatures::from_unix(timestamp)?;
        Ok(self
            .sufficiency
            .verdict(self.bike_encoding.value(station), &features))
    }
}

/// Read and parse a single JSON artifact.
fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<T, PredictError> {
    let json = std::fs::read_to_string(path).map_err(|e| PredictError::Load {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    serde_json::from_str(&json).map_err(|e| PredictError::Corrupt {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

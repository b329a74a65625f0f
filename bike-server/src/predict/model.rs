//! Serialized model artifacts and their inference.
//!
//! The out-of-scope training pipeline exports linear models over one-hot
//! temporal features plus a mean-encoded station term, as JSON. Inference
//! here is a handful of multiply-adds; the heavy lifting happened at
//! training time.

use std::collections::HashMap;

use serde::Deserialize;

use crate::domain::StationId;

use super::features::TimeFeatures;

/// Mean encoding: station id mapped to a historical average of the
/// target variable.
///
/// Unseen station ids (new stations) fall back to the global mean, so
/// every station always receives a finite encoding. This fallback is part
/// of the predictor contract, not an edge case.
#[derive(Debug, Clone, Deserialize)]
pub struct MeanEncoding {
    pub global_mean: f64,
    pub by_station: HashMap<u32, f64>,
}

impl MeanEncoding {
    /// Create an encoding from a global mean and per-station values.
    pub fn new(global_mean: f64, by_station: HashMap<u32, f64>) -> Self {
        Self {
            global_mean,
            by_station,
        }
    }

    /// The encoded value for a station, falling back to the global mean.
    pub fn value(&self, station: StationId) -> f64 {
        self.by_station
            .get(&station.0)
            .copied()
            .unwrap_or(self.global_mean)
    }
}

/// Linear model predicting an availability count.
///
/// predicted = intercept + station_weight * encoding
///           + day_weights[dow] + hour_weights[hour]
///           + holiday_weight * is_holiday + temp_weight * temp,
/// clamped at zero. One artifact exists per target (bikes, stands).
#[derive(Debug, Clone, Deserialize)]
pub struct CountModel {
    pub intercept: f64,
    pub station_weight: f64,
    pub temp_weight: f64,
    pub holiday_weight: f64,
    pub day_weights: [f64; 7],
    pub hour_weights: [f64; 24],
}

impl CountModel {
    /// Predicted count for the given encoded station value, temporal
    /// features, and ambient temperature. Always finite and non-negative
    /// for finite inputs.
    pub fn predict(&self, encoding: f64, features: &TimeFeatures, temp: f64) -> f64 {
        let holiday = if features.is_holiday { 1.0 } else { 0.0 };

        let raw = self.intercept
            + self.station_weight * encoding
            + self.day_weights[features.day_of_week as usize]
            + self.hour_weights[features.hour as usize]
            + self.holiday_weight * holiday
            + self.temp_weight * temp;

        raw.max(0.0)
    }
}

/// Logistic model producing a sufficient/insufficient verdict.
///
/// No temperature term: the classifier variant was trained without
/// weather features.
#[derive(Debug, Clone, Deserialize)]
pub struct SufficiencyModel {
    pub intercept: f64,
    pub station_weight: f64,
    pub holiday_weight: f64,
    pub day_weights: [f64; 7],
    pub hour_weights: [f64; 24],
}

impl SufficiencyModel {
    /// Whether availability is predicted sufficient.
    ///
    /// sigmoid(z) >= 0.5 iff z >= 0, so the sigmoid itself is never
    /// evaluated.
    pub fn verdict(&self, encoding: f64, features: &TimeFeatures) -> bool {
        let holiday = if features.is_holiday { 1.0 } else { 0.0 };

        let z = self.intercept
            + self.station_weight * encoding
            + self.day_weights[features.day_of_week as usize]
            + self.hour_weights[features.hour as usize]
            + self.holiday_weight * holiday;

        z >= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features(day_of_week: u32, hour: u32, is_holiday: bool) -> TimeFeatures {
        TimeFeatures {
            day_of_week,
            hour,
            is_holiday,
        }
    }

    fn flat_count_model(intercept: f64) -> CountModel {
        CountModel {
            intercept,
            station_weight: 0.0,
            temp_weight: 0.0,
            holiday_weight: 0.0,
            day_weights: [0.0; 7],
            hour_weights: [0.0; 24],
        }
    }

    #[test]
    fn mean_encoding_lookup_and_fallback() {
        let encoding =
            MeanEncoding::new(7.5, HashMap::from([(1, 12.0), (2, 3.0)]));

        assert_eq!(encoding.value(StationId(1)), 12.0);
        assert_eq!(encoding.value(StationId(2)), 3.0);
        // Unseen station: global mean, never a lookup error.
        assert_eq!(encoding.value(StationId(999)), 7.5);
    }

    #[test]
    fn count_model_sums_terms() {
        let mut model = flat_count_model(2.0);
        model.station_weight = 1.0;
        model.temp_weight = 0.1;
        model.holiday_weight = -1.0;
        model.day_weights[3] = 0.5;
        model.hour_weights[8] = -0.25;

        let p = model.predict(4.0, &features(3, 8, true), 10.0);
        // 2.0 + 4.0 + 0.5 - 0.25 - 1.0 + 1.0
        assert!((p - 6.25).abs() < 1e-12);
    }

    #[test]
    fn count_model_clamps_at_zero() {
        let model = flat_count_model(-5.0);
        let p = model.predict(0.0, &features(0, 0, false), 0.0);
        assert_eq!(p, 0.0);
    }

    #[test]
    fn count_model_is_finite_for_unseen_stations() {
        let encoding = MeanEncoding::new(6.0, HashMap::new());
        let model = flat_count_model(1.0);

        let p = model.predict(encoding.value(StationId(12345)), &features(5, 17, false), 12.0);
        assert!(p.is_finite());
        assert!(p >= 0.0);
    }

    #[test]
    fn sufficiency_verdict_threshold() {
        let mut model = SufficiencyModel {
            intercept: -1.0,
            station_weight: 1.0,
            holiday_weight: 0.0,
            day_weights: [0.0; 7],
            hour_weights: [0.0; 24],
        };

        // z = -1 + encoding
        assert!(!model.verdict(0.5, &features(0, 0, false)));
        assert!(model.verdict(1.0, &features(0, 0, false)));
        assert!(model.verdict(2.0, &features(0, 0, false)));

        model.holiday_weight = -3.0;
        assert!(!model.verdict(2.0, &features(0, 0, true)));
    }

    #[test]
    fn artifacts_deserialize() {
        let json = r#"{
            "global_mean": 8.25,
            "by_station": {"1": 11.5, "33": 4.0}
        }"#;
        let encoding: MeanEncoding = serde_json::from_str(json).unwrap();
        assert_eq!(encoding.value(StationId(33)), 4.0);
        assert_eq!(encoding.value(StationId(2)), 8.25);

        let json = format!(
            r#"{{
                "intercept": 1.5,
                "station_weight": 0.9,
                "temp_weight": 0.05,
                "holiday_weight": -0.4,
                "day_weights": {days},
                "hour_weights": {hours}
            }}"#,
            days = serde_json::to_string(&[0.0; 7]).unwrap(),
            hours = serde_json::to_string(&[0.0; 24]).unwrap(),
        );
        let model: CountModel = serde_json::from_str(&json).unwrap();
        assert_eq!(model.intercept, 1.5);
        assert_eq!(model.day_weights.len(), 7);
        assert_eq!(model.hour_weights.len(), 24);
    }
}

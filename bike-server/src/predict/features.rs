//! Temporal feature extraction.
//!
//! The models were trained on day-of-week, hour-of-day, and a public
//! holiday flag, all derived from the query timestamp in UTC. The
//! training pipeline uses the same reference zone; features here must
//! stay bit-for-bit consistent with it.

use chrono::{DateTime, Datelike, Timelike};

use super::error::PredictError;

/// Irish public holidays for 2025, as (year, month, day).
const HOLIDAYS: &[(i32, u32, u32)] = &[
    (2025, 1, 1),
    (2025, 2, 3),
    (2025, 3, 17),
    (2025, 4, 21),
    (2025, 5, 5),
    (2025, 6, 2),
    (2025, 8, 4),
    (2025, 10, 27),
    (2025, 12, 25),
    (2025, 12, 26),
];

/// Model features derived from a unix timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeFeatures {
    /// 0 = Monday .. 6 = Sunday.
    pub day_of_week: u32,

    /// 0..=23.
    pub hour: u32,

    /// Whether the date is in the fixed public holiday set.
    pub is_holiday: bool,
}

impl TimeFeatures {
    /// Extract features from a unix timestamp (seconds), in UTC.
    pub fn from_unix(timestamp: i64) -> Result<Self, PredictError> {
        let dt = DateTime::from_timestamp(timestamp, 0)
            .ok_or(PredictError::BadTimestamp(timestamp))?;

        let date = (dt.year(), dt.month(), dt.day());
        let is_holiday = HOLIDAYS.iter().any(|&d| d == date);

        Ok(Self {
            day_of_week: dt.weekday().num_days_from_monday(),
            hour: dt.hour(),
            is_holiday,
        })
    }
}

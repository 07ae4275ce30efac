use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::core::primitives::{datetime_to_unix_seconds, decimal_to_f64};

/// Single measurement sample. `date` is a unix timestamp in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub id: String,
    pub date: f64,
    pub value: f64,
}

impl TimeSeriesPoint {
    /// Creates a sample with a fresh random id.
    #[must_use]
    pub fn new(date: f64, value: f64) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), date, value)
    }

    #[must_use]
    pub fn with_id(id: impl Into<String>, date: f64, value: f64) -> Self {
        Self {
            id: id.into(),
            date,
            value,
        }
    }

    #[must_use]
    pub fn from_datetime(time: DateTime<Utc>, value: f64) -> Self {
        Self::new(datetime_to_unix_seconds(time), value)
    }

    /// Builds a sample from a decimal measurement.
    ///
    /// Returns `None` when the decimal cannot be represented as a finite `f64`.
    #[must_use]
    pub fn from_decimal(time: DateTime<Utc>, value: Decimal) -> Option<Self> {
        decimal_to_f64(value).map(|value| Self::from_datetime(time, value))
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.date.is_finite() && self.value.is_finite()
    }
}

/// Named series with immutable, date-ordered caches.
///
/// The name doubles as the series id. `sorted_by_date` is a stable sort of the
/// input, so samples sharing a timestamp keep their original relative order.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    name: String,
    points: Vec<TimeSeriesPoint>,
    sorted_by_date: Vec<TimeSeriesPoint>,
}

impl TimeSeries {
    /// Builds the series and its caches. Samples with a non-finite date or
    /// value are dropped.
    #[must_use]
    pub fn new(name: impl Into<String>, points: Vec<TimeSeriesPoint>) -> Self {
        let name = name.into();
        let original_count = points.len();
        let points: Vec<TimeSeriesPoint> = points
            .into_iter()
            .filter(TimeSeriesPoint::is_finite)
            .collect();
        if points.len() != original_count {
            warn!(
                series = %name,
                dropped = original_count - points.len(),
                "dropping non-finite series samples"
            );
        }

        let mut sorted_by_date = points.clone();
        sorted_by_date.sort_by(|left, right| left.date.total_cmp(&right.date));

        Self {
            name,
            points,
            sorted_by_date,
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Samples in ingestion order.
    #[must_use]
    pub fn points(&self) -> &[TimeSeriesPoint] {
        &self.points
    }

    #[must_use]
    pub fn sorted_by_date(&self) -> &[TimeSeriesPoint] {
        &self.sorted_by_date
    }

    /// Latest sample by date. Among equal dates the last one in ingestion order wins.
    #[must_use]
    pub fn last_by_date(&self) -> Option<&TimeSeriesPoint> {
        self.sorted_by_date.last()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sorted_by_date.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sorted_by_date.is_empty()
    }
}

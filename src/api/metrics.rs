use serde::{Deserialize, Serialize};

use crate::core::TimeSeriesPoint;

/// Summary of one series over the strict visible window.
///
/// Value fields are `None` when no sample of the series is visible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesRangeMetrics {
    pub series_id: String,
    pub average: Option<f64>,
    pub start_value: Option<f64>,
    pub end_value: Option<f64>,
    pub delta: Option<f64>,
}

impl SeriesRangeMetrics {
    #[must_use]
    pub fn empty(series_id: impl Into<String>) -> Self {
        Self {
            series_id: series_id.into(),
            average: None,
            start_value: None,
            end_value: None,
            delta: None,
        }
    }

    /// Computes metrics over `visible`, which must hold only strictly visible
    /// samples in date order.
    #[must_use]
    pub fn from_visible(series_id: impl Into<String>, visible: &[TimeSeriesPoint]) -> Self {
        let series_id = series_id.into();
        let (Some(first), Some(last)) = (visible.first(), visible.last()) else {
            return Self::empty(series_id);
        };

        let sum: f64 = visible.iter().map(|point| point.value).sum();
        let average = sum / visible.len() as f64;

        Self {
            series_id,
            average: Some(average),
            start_value: Some(first.value),
            end_value: Some(last.value),
            delta: Some(last.value - first.value),
        }
    }

    #[must_use]
    pub fn has_values(&self) -> bool {
        self.average.is_some()
    }
}

/// Visible window plus per-series summaries, in series order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisibleRangeMetrics {
    pub start_date: f64,
    pub end_date: f64,
    pub per_series: Vec<SeriesRangeMetrics>,
}

impl VisibleRangeMetrics {
    #[must_use]
    pub fn series(&self, series_id: &str) -> Option<&SeriesRangeMetrics> {
        self.per_series
            .iter()
            .find(|metrics| metrics.series_id == series_id)
    }
}

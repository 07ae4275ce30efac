//! Binary-search helpers over date-sorted samples.
//!
//! Every function assumes `values` is sorted ascending by `date`; unsorted
//! input yields unspecified (but memory-safe) results.

use std::ops::Range;

use crate::core::TimeSeriesPoint;

/// First index whose date is `>= target`, or `values.len()` when none qualify.
#[must_use]
pub fn lower_bound(target: f64, values: &[TimeSeriesPoint]) -> usize {
    values.partition_point(|point| point.date < target)
}

/// First index whose date is `> target`; equivalently the count of samples `<= target`.
#[must_use]
pub fn upper_bound(target: f64, values: &[TimeSeriesPoint]) -> usize {
    values.partition_point(|point| point.date <= target)
}

/// Index range of samples with `start <= date <= end`.
///
/// Returns `None` when `values` is empty or no sample falls in the window.
#[must_use]
pub fn visible_range(start: f64, end: f64, values: &[TimeSeriesPoint]) -> Option<Range<usize>> {
    if values.is_empty() {
        return None;
    }

    let lower = lower_bound(start, values);
    let upper = upper_bound(end, values);
    if lower >= upper {
        return None;
    }
    Some(lower..upper)
}

use std::ops::Range;

use crate::core::TimeSeriesPoint;

/// Visible time window `[start, end]` in unix seconds.
pub type DateWindow = (f64, f64);

/// Builds the visible window starting at `scroll_position` and spanning
/// `visible_length` seconds.
#[must_use]
pub fn visible_date_window(scroll_position: f64, visible_length: f64) -> DateWindow {
    (scroll_position, scroll_position + visible_length)
}

/// Widens a strict index range by one sample on each side, clamped to `len`.
///
/// Renderers draw the extra samples so segments crossing the viewport edge
/// are not cut short.
#[must_use]
pub fn extend_range(strict: Range<usize>, len: usize) -> Range<usize> {
    let start = strict.start.saturating_sub(1);
    let end = strict.end.saturating_add(1).min(len);
    start..end
}

/// First and last sample dates of a date-sorted slice.
#[must_use]
pub fn date_extent(sorted: &[TimeSeriesPoint]) -> Option<DateWindow> {
    match (sorted.first(), sorted.last()) {
        (Some(first), Some(last)) => Some((first.date, last.date)),
        _ => None,
    }
}

//! Min/max bucket downsampling for line rendering.

use std::borrow::Cow;
use std::collections::BTreeSet;

use crate::core::TimeSeriesPoint;

/// Reduces `points` to at most roughly `maxPoints` samples while keeping each
/// bucket's extreme values, so peaks and troughs survive the reduction.
///
/// Input at or under budget, or a budget of 2 or less, is returned borrowed
/// and untouched. Otherwise the output is an index-ordered subsequence that
/// always contains the first and last samples and holds at most
/// `2 * max(1, max_points / 2) + 2` entries. Within a bucket the first
/// occurrence of a tied extreme wins.
#[must_use]
pub fn min_max(points: &[TimeSeriesPoint], max_points: usize) -> Cow<'_, [TimeSeriesPoint]> {
    if points.len() <= max_points || max_points <= 2 {
        return Cow::Borrowed(points);
    }

    let target_buckets = (max_points / 2).max(1);
    let bucket_size = points.len().div_ceil(target_buckets);

    let mut selected = BTreeSet::new();
    selected.insert(0);
    selected.insert(points.len() - 1);

    for (bucket_index, bucket) in points.chunks(bucket_size).enumerate() {
        let offset = bucket_index * bucket_size;
        let (min_index, max_index) = bucket_extrema(bucket);
        selected.insert(offset + min_index);
        selected.insert(offset + max_index);
    }

    Cow::Owned(
        selected
            .into_iter()
            .map(|index| points[index].clone())
            .collect(),
    )
}

fn bucket_extrema(bucket: &[TimeSeriesPoint]) -> (usize, usize) {
    let mut min_index = 0;
    let mut max_index = 0;
    for (index, point) in bucket.iter().enumerate().skip(1) {
        if point.value < bucket[min_index].value {
            min_index = index;
        }
        if point.value > bucket[max_index].value {
            max_index = index;
        }
    }
    (min_index, max_index)
}

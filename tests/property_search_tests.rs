use progress_chart::core::{TimeSeriesPoint, lower_bound, upper_bound, visible_range};
use proptest::prelude::*;

fn sorted_points(mut dates: Vec<f64>) -> Vec<TimeSeriesPoint> {
    dates.sort_by(f64::total_cmp);
    dates
        .into_iter()
        .enumerate()
        .map(|(index, date)| TimeSeriesPoint::with_id(index.to_string(), date, 0.0))
        .collect()
}

// Integer-valued dates make duplicate timestamps likely.
fn dates_strategy() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec((-50i32..50).prop_map(f64::from), 0..64)
}

proptest! {
    #[test]
    fn bounds_match_linear_scan(
        dates in dates_strategy(),
        target in (-60i32..60).prop_map(f64::from)
    ) {
        let values = sorted_points(dates);
        let expected_lower = values
            .iter()
            .position(|point| point.date >= target)
            .unwrap_or(values.len());
        let expected_upper = values
            .iter()
            .position(|point| point.date > target)
            .unwrap_or(values.len());

        let lower = lower_bound(target, &values);
        let upper = upper_bound(target, &values);
        prop_assert_eq!(lower, expected_lower);
        prop_assert_eq!(upper, expected_upper);
        prop_assert!(lower <= upper);
    }

    #[test]
    fn visible_range_is_none_iff_no_sample_in_window(
        dates in dates_strategy(),
        start in (-60i32..60).prop_map(f64::from),
        span in (0i32..40).prop_map(f64::from)
    ) {
        let values = sorted_points(dates);
        let end = start + span;
        let any_inside = values
            .iter()
            .any(|point| start <= point.date && point.date <= end);

        match visible_range(start, end, &values) {
            None => prop_assert!(!any_inside),
            Some(range) => {
                prop_assert!(any_inside);
                prop_assert_eq!(range.start, lower_bound(start, &values));
                prop_assert_eq!(range.end, upper_bound(end, &values));
                for point in &values[range] {
                    prop_assert!(start <= point.date && point.date <= end);
                }
            }
        }
    }
}

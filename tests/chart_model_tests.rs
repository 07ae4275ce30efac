use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use approx::assert_relative_eq;
use progress_chart::api::{ChartModel, ChartModelConfig, VisibleRangeMetrics};
use progress_chart::core::{TimeSeries, TimeSeriesPoint, XAxisStrideUnit};

const DAY: f64 = 86_400.0;

fn daily_weight_series(days: usize) -> TimeSeries {
    let points = (0..days)
        .map(|day| {
            TimeSeriesPoint::with_id(
                format!("w{day}"),
                day as f64 * DAY,
                80.0 - day as f64 * 0.1,
            )
        })
        .collect();
    TimeSeries::new("weight", points)
}

fn sparse_series(name: &str, samples: &[(f64, f64)]) -> TimeSeries {
    let points = samples
        .iter()
        .enumerate()
        .map(|(index, (day, value))| {
            TimeSeriesPoint::with_id(format!("{name}{index}"), day * DAY, *value)
        })
        .collect();
    TimeSeries::new(name, points)
}

fn build_model(series: Vec<TimeSeries>) -> ChartModel {
    ChartModel::with_series(ChartModelConfig::default(), series).expect("model init")
}

#[test]
fn empty_model_has_unit_domain_and_empty_metrics() {
    let mut model = ChartModel::new(ChartModelConfig::default()).expect("model init");
    model.initialize_if_needed();

    assert!(!model.is_initialized());
    assert_eq!(model.scroll_zoom().scroll_position(), 0.0);
    assert_eq!(model.y_domain(), (0.0, 1.0));
    assert_eq!(model.x_domain(), None);
    assert!(model.visible_range_metrics().per_series.is_empty());
}

#[test]
fn empty_series_report_none_metrics() {
    let mut model = build_model(vec![TimeSeries::new("weight", Vec::new())]);

    assert!(!model.is_initialized());
    assert_eq!(model.y_domain(), (0.0, 1.0));
    assert!(model.visible_series_data("weight").is_empty());

    let metrics = model.visible_range_metrics();
    let weight = metrics.series("weight").expect("weight metrics");
    assert_eq!(weight.average, None);
    assert_eq!(weight.start_value, None);
    assert_eq!(weight.end_value, None);
    assert_eq!(weight.delta, None);
}

#[test]
fn initialization_shows_most_recent_window() {
    let model = build_model(vec![daily_weight_series(100)]);

    assert!(model.is_initialized());
    assert_eq!(model.scroll_zoom().scroll_position(), 69.0 * DAY);
    assert_eq!(model.visible_date_window(), (69.0 * DAY, 99.0 * DAY));
    assert_eq!(model.x_domain(), Some((69.0 * DAY, 99.0 * DAY)));
}

#[test]
fn initialization_never_scrolls_before_first_sample() {
    let model = build_model(vec![sparse_series(
        "squat",
        &[(10.0, 100.0), (12.0, 105.0), (15.0, 110.0)],
    )]);
    assert_eq!(model.scroll_zoom().scroll_position(), 10.0 * DAY);
}

#[test]
fn initialization_is_one_time() {
    let mut model = build_model(vec![daily_weight_series(100)]);
    model.set_scroll_position(5.0 * DAY, Duration::ZERO);
    model.initialize_if_needed();
    assert_eq!(model.scroll_zoom().scroll_position(), 5.0 * DAY);
}

#[test]
fn metrics_cover_strict_window_only() {
    let mut model = build_model(vec![daily_weight_series(100)]);
    let metrics = model.visible_range_metrics().clone();
    let weight = metrics.series("weight").expect("weight metrics");

    assert_relative_eq!(weight.start_value.expect("start"), 73.1, epsilon = 1e-9);
    assert_relative_eq!(weight.end_value.expect("end"), 70.1, epsilon = 1e-9);
    assert_relative_eq!(weight.delta.expect("delta"), -3.0, epsilon = 1e-9);
    assert_relative_eq!(weight.average.expect("average"), 71.6, epsilon = 1e-9);
    assert_eq!(metrics.start_date, 69.0 * DAY);
    assert_eq!(metrics.end_date, 99.0 * DAY);
}

#[test]
fn visible_points_extend_one_sample_past_each_edge() {
    let config = ChartModelConfig::default()
        .with_zoom_days(3.0, 180.0)
        .with_initial_visible_days(16.0);
    let mut model = ChartModel::with_series(
        config,
        vec![sparse_series(
            "bench",
            &[(0.0, 60.0), (10.0, 62.5), (20.0, 65.0), (30.0, 67.5), (40.0, 70.0)],
        )],
    )
    .expect("model init");

    model.set_scroll_position(12.0 * DAY, Duration::ZERO);
    model.update_visible_range_caches();

    let ids: Vec<&str> = model
        .visible_series_data("bench")
        .iter()
        .map(|point| point.id.as_str())
        .collect();
    assert_eq!(ids, vec!["bench1", "bench2", "bench3"]);

    let metrics = model.visible_range_metrics();
    let bench = metrics.series("bench").expect("bench metrics");
    assert_eq!(bench.average, Some(65.0));
    assert_eq!(bench.start_value, Some(65.0));
    assert_eq!(bench.end_value, Some(65.0));
    assert_eq!(bench.delta, Some(0.0));
}

#[test]
fn empty_window_falls_back_to_full_dataset_domain() {
    let mut model = build_model(vec![daily_weight_series(100)]);
    model.set_scroll_position(1_000.0 * DAY, Duration::ZERO);
    model.update_visible_range_caches();

    let (low, high) = model.y_data_domain();
    assert_relative_eq!(low, 70.1 - 3.505, epsilon = 1e-9);
    assert_relative_eq!(high, 80.0 + 3.505, epsilon = 1e-9);
    let (tick_low, tick_high) = model.y_domain();
    assert!(tick_low <= low && tick_high >= high);

    assert!(model.visible_series_data("weight").is_empty());
    let metrics = model.visible_range_metrics();
    assert!(!metrics.series("weight").expect("weight metrics").has_values());
}

#[test]
fn y_domain_tracks_visible_values_and_aligns_to_ticks() {
    let model = build_model(vec![daily_weight_series(100)]);

    let (low, high) = model.y_data_domain();
    assert!(low < 70.1 && high > 73.1);
    assert!(high < 80.0);

    let ticks = model.y_tick_values();
    assert_eq!(model.y_domain(), (ticks[0], ticks[ticks.len() - 1]));
}

#[test]
fn y_domain_covers_data_with_large_tick_budget() {
    let config = ChartModelConfig::default().with_max_ticks(5_000);
    let model = ChartModel::with_series(
        config,
        vec![sparse_series("squat", &[(0.0, 0.0), (1.0, 90.0)])],
    )
    .expect("model init");

    let (data_low, data_high) = model.y_data_domain();
    let (low, high) = model.y_domain();
    assert!(low <= data_low);
    assert!(high >= data_high);
}

#[test]
fn y_domain_spans_all_series_in_window() {
    let model = build_model(vec![
        sparse_series("squat", &[(0.0, 100.0), (5.0, 120.0)]),
        sparse_series("deadlift", &[(1.0, 140.0), (6.0, 160.0)]),
    ]);
    let (low, high) = model.y_data_domain();
    assert!(low < 100.0);
    assert!(high > 160.0);
}

#[test]
fn unknown_series_has_no_visible_points() {
    let model = build_model(vec![daily_weight_series(10)]);
    assert!(model.visible_series_data("bodyfat").is_empty());
}

#[test]
fn update_series_rebuilds_caches_and_bumps_version() {
    let mut model = build_model(vec![daily_weight_series(100)]);
    assert_eq!(model.data_version(), 1);
    model.set_scroll_position(0.0, Duration::ZERO);

    model.update_series(vec![sparse_series("squat", &[(200.0, 100.0), (210.0, 110.0)])]);

    assert_eq!(model.data_version(), 2);
    assert_eq!(model.total_point_count(), 2);
    assert!(model.is_initialized());
    assert_eq!(model.scroll_zoom().scroll_position(), 200.0 * DAY);
    assert!(model.visible_series_data("weight").is_empty());
    assert_eq!(model.visible_series_data("squat").len(), 2);
    let metrics = model.visible_range_metrics();
    assert_eq!(metrics.per_series.len(), 1);
    assert_eq!(metrics.series("squat").and_then(|m| m.delta), Some(10.0));
}

#[test]
fn data_version_bumps_even_when_point_count_is_unchanged() {
    let mut model = build_model(vec![sparse_series("squat", &[(0.0, 100.0), (1.0, 105.0)])]);
    let before = model.data_version();

    model.update_series(vec![sparse_series("squat", &[(0.0, 110.0), (1.0, 115.0)])]);
    assert_eq!(model.total_point_count(), 2);
    assert_eq!(model.data_version(), before + 1);

    model.update_series(vec![sparse_series("squat", &[(0.0, 110.0)])]);
    assert_eq!(model.total_point_count(), 1);
    assert_eq!(model.data_version(), before + 2);
}

#[test]
fn all_points_cache_is_sorted_across_series() {
    let model = build_model(vec![
        sparse_series("a", &[(3.0, 1.0), (1.0, 2.0)]),
        sparse_series("b", &[(2.0, 3.0), (0.0, 4.0)]),
    ]);
    let dates: Vec<f64> = model.all_points().iter().map(|point| point.date).collect();
    assert_eq!(dates, vec![0.0, DAY, 2.0 * DAY, 3.0 * DAY]);
}

#[test]
fn dense_windows_are_downsampled_to_budget() {
    let hourly: Vec<TimeSeriesPoint> = (0..24 * 60)
        .map(|hour| {
            TimeSeriesPoint::with_id(
                format!("h{hour}"),
                hour as f64 * 3_600.0,
                (hour as f64 * 0.37).sin() * 10.0,
            )
        })
        .collect();
    let model = build_model(vec![TimeSeries::new("heart_rate", hourly)]);

    let budget = model.point_budget();
    assert_eq!(budget, 300);
    let visible = model.visible_series_data("heart_rate");
    assert!(visible.len() <= budget + 2);
    assert!(visible.len() > 100);
    for pair in visible.windows(2) {
        assert!(pair[0].date < pair[1].date);
    }
}

#[test]
fn point_budget_follows_plot_width() {
    let mut model = build_model(vec![daily_weight_series(10)]);
    assert_eq!(model.point_budget(), 300);

    model.update_plot_width(400.0, Duration::ZERO);
    assert_eq!(model.point_budget(), 800);

    model.update_plot_width(50.0, Duration::ZERO);
    assert_eq!(model.point_budget(), 200);
}

#[test]
fn metrics_listener_receives_each_recompute() {
    let mut model = build_model(vec![daily_weight_series(100)]);
    let received: Rc<RefCell<Vec<VisibleRangeMetrics>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&received);
    model.set_visible_metrics_listener(Box::new(move |metrics| {
        sink.borrow_mut().push(metrics.clone());
    }));

    model.set_scroll_position(10.0 * DAY, Duration::ZERO);
    model.update_visible_range_caches();

    let received = received.borrow();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].start_date, 10.0 * DAY);
    assert_eq!(received[0].end_date, 40.0 * DAY);
}

#[test]
fn x_axis_stride_follows_visible_days() {
    let mut model = build_model(vec![daily_weight_series(400)]);
    assert_eq!(model.x_axis_stride(), XAxisStrideUnit::Day);

    model.handle_magnification_changed(0.5);
    assert_eq!(model.x_axis_stride(), XAxisStrideUnit::Week);

    model.handle_magnification_changed(0.25);
    assert_eq!(model.x_axis_stride(), XAxisStrideUnit::Month);
}

#[test]
fn invalid_config_is_rejected() {
    let config = ChartModelConfig::default().with_zoom_days(30.0, 3.0);
    assert!(ChartModel::new(config).is_err());
}

use std::time::Duration;

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::core::{
    DEFAULT_DOMAIN, DateWindow, NiceScale, TimeSeries, TimeSeriesPoint, XAxisStrideUnit,
    extend_range, min_max, nice_scale, padded_domain_for_values, visible_date_window,
    visible_range,
};
use crate::error::ChartResult;
use crate::interaction::{ScrollZoomState, VisibleRangeListener};

use super::{
    ChartModelConfig, DebounceSlot, SeriesRangeMetrics, TaskHandle, ThrottledDebounce,
    VisibleRangeMetrics,
};

/// Callback receiving freshly computed visible-range metrics.
pub type VisibleMetricsListener = Box<dyn FnMut(&VisibleRangeMetrics)>;

/// Chart state orchestrator.
///
/// Owns the series, the scroll/zoom state and every derived cache. Caches fall
/// in two tiers:
/// - data caches (`all_points`, per-series sorted samples) are rebuilt only by
///   [`ChartModel::update_series`];
/// - visible caches (Y scale, downsampled samples, metrics) are refreshed by
///   [`ChartModel::update_visible_range_caches`], normally through the debounced
///   schedule after scroll or zoom.
///
/// All caches are pure functions of `series` and the scroll/zoom state.
pub struct ChartModel {
    config: ChartModelConfig,
    series: Vec<TimeSeries>,
    all_points: Vec<TimeSeriesPoint>,
    downsampled: IndexMap<String, Vec<TimeSeriesPoint>>,
    metrics: Option<VisibleRangeMetrics>,
    y_data_domain: (f64, f64),
    y_scale: NiceScale,
    data_version: u64,
    initialized: bool,
    scroll_zoom: ScrollZoomState,
    y_axis_update: DebounceSlot,
    auto_scale: ThrottledDebounce,
    metrics_listener: Option<VisibleMetricsListener>,
}

impl std::fmt::Debug for ChartModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChartModel")
            .field("config", &self.config)
            .field("series_count", &self.series.len())
            .field("total_point_count", &self.all_points.len())
            .field("y_domain", &self.y_scale.domain)
            .field("data_version", &self.data_version)
            .field("initialized", &self.initialized)
            .field("scroll_zoom", &self.scroll_zoom)
            .field("y_axis_update", &self.y_axis_update)
            .finish_non_exhaustive()
    }
}

impl ChartModel {
    /// Creates an empty chart. Fails only on invalid configuration.
    pub fn new(config: ChartModelConfig) -> ChartResult<Self> {
        let config = config.validate()?;
        Ok(Self {
            config,
            series: Vec::new(),
            all_points: Vec::new(),
            downsampled: IndexMap::new(),
            metrics: None,
            y_data_domain: DEFAULT_DOMAIN,
            y_scale: nice_scale(DEFAULT_DOMAIN.0, DEFAULT_DOMAIN.1, config.max_ticks),
            data_version: 0,
            initialized: false,
            scroll_zoom: ScrollZoomState::new(config.scroll_zoom),
            y_axis_update: DebounceSlot::new(config.y_axis_debounce()),
            auto_scale: ThrottledDebounce::new(
                config.auto_scale_min_interval(),
                config.y_axis_debounce(),
            ),
            metrics_listener: None,
        })
    }

    pub fn with_series(config: ChartModelConfig, series: Vec<TimeSeries>) -> ChartResult<Self> {
        let mut model = Self::new(config)?;
        model.update_series(series);
        Ok(model)
    }

    #[must_use]
    pub fn config(&self) -> ChartModelConfig {
        self.config
    }

    #[must_use]
    pub fn series(&self) -> &[TimeSeries] {
        &self.series
    }

    /// Every sample across all series, stable-sorted by date.
    #[must_use]
    pub fn all_points(&self) -> &[TimeSeriesPoint] {
        &self.all_points
    }

    #[must_use]
    pub fn total_point_count(&self) -> usize {
        self.all_points.len()
    }

    /// Increments on every series replacement; lets consumers detect data
    /// changes without comparing series.
    ///
    /// This is a replacement counter, not the point count: swapping in series
    /// with the same number of samples still bumps it. Use
    /// [`ChartModel::total_point_count`] for the count.
    #[must_use]
    pub fn data_version(&self) -> u64 {
        self.data_version
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    #[must_use]
    pub fn scroll_zoom(&self) -> &ScrollZoomState {
        &self.scroll_zoom
    }

    pub fn set_visible_range_listener(&mut self, listener: VisibleRangeListener) {
        self.scroll_zoom.set_visible_range_listener(listener);
    }

    pub fn set_visible_metrics_listener(&mut self, listener: VisibleMetricsListener) {
        self.metrics_listener = Some(listener);
    }

    pub fn clear_visible_metrics_listener(&mut self) {
        self.metrics_listener = None;
    }

    /// Replaces all series and rebuilds every cache from scratch.
    pub fn update_series(&mut self, series: Vec<TimeSeries>) {
        let mut all_points: Vec<TimeSeriesPoint> = series
            .iter()
            .flat_map(|series| series.sorted_by_date().iter().cloned())
            .collect();
        all_points.sort_by(|left, right| left.date.total_cmp(&right.date));

        debug!(
            series_count = series.len(),
            point_count = all_points.len(),
            "replace chart series"
        );

        self.series = series;
        self.all_points = all_points;
        self.downsampled.clear();
        self.metrics = None;
        self.data_version += 1;
        self.initialized = false;

        self.initialize_if_needed();
        self.update_visible_range_caches();
    }

    /// One-time placement of the scroll position so the most recent window is
    /// shown, never starting before the first sample. No-op without data.
    pub fn initialize_if_needed(&mut self) {
        if self.initialized {
            return;
        }
        let (Some(first), Some(last)) = (self.all_points.first(), self.all_points.last()) else {
            return;
        };

        let position = (last.date - self.scroll_zoom.visible_domain_length()).max(first.date);
        self.scroll_zoom.place_scroll_position(position);
        self.initialized = true;
        trace!(position, "initialized scroll position");
    }

    /// Current visible window `[scroll_position, scroll_position + visible_length]`.
    #[must_use]
    pub fn visible_date_window(&self) -> DateWindow {
        visible_date_window(
            self.scroll_zoom.scroll_position(),
            self.scroll_zoom.visible_domain_length(),
        )
    }

    /// X domain for the renderer, `None` while there is no data.
    #[must_use]
    pub fn x_domain(&self) -> Option<DateWindow> {
        if self.all_points.is_empty() {
            return None;
        }
        Some(self.visible_date_window())
    }

    #[must_use]
    pub fn x_axis_stride(&self) -> XAxisStrideUnit {
        XAxisStrideUnit::for_visible_days(self.scroll_zoom.visible_days())
    }

    /// Y domain aligned to the outer ticks.
    #[must_use]
    pub fn y_domain(&self) -> (f64, f64) {
        self.y_scale.domain
    }

    /// Padded value range before tick alignment.
    #[must_use]
    pub fn y_data_domain(&self) -> (f64, f64) {
        self.y_data_domain
    }

    #[must_use]
    pub fn y_tick_values(&self) -> &[f64] {
        &self.y_scale.tick_values
    }

    #[must_use]
    pub fn y_scale(&self) -> &NiceScale {
        &self.y_scale
    }

    /// Downsampled samples of `series_id` for the last computed window, or an
    /// empty slice when nothing has been computed for it.
    #[must_use]
    pub fn visible_series_data(&self, series_id: &str) -> &[TimeSeriesPoint] {
        self.downsampled
            .get(series_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    #[must_use]
    pub fn visible_series_map(&self) -> &IndexMap<String, Vec<TimeSeriesPoint>> {
        &self.downsampled
    }

    /// Cached metrics, computing and caching them first if necessary.
    pub fn visible_range_metrics(&mut self) -> &VisibleRangeMetrics {
        let metrics = match self.metrics.take() {
            Some(metrics) => metrics,
            None => self.compute_visible_metrics(),
        };
        self.metrics.insert(metrics)
    }

    #[must_use]
    pub fn cached_visible_range_metrics(&self) -> Option<&VisibleRangeMetrics> {
        self.metrics.as_ref()
    }

    /// Schedules a debounced recompute, superseding any pending one.
    pub fn schedule_y_axis_update(&mut self, now: Duration) -> TaskHandle {
        let handle = self.y_axis_update.schedule(now);
        trace!(generation = handle.generation(), "scheduled y-axis update");
        handle
    }

    /// Cancels the pending debounced recompute, if any.
    pub fn cancel_y_axis_update(&mut self) -> bool {
        self.y_axis_update.cancel_pending().is_some()
    }

    #[must_use]
    pub fn pending_y_axis_update(&self) -> Option<TaskHandle> {
        self.y_axis_update.pending()
    }

    /// Adaptive Y-scale request: recomputes immediately when the minimum
    /// interval has elapsed and always leaves a trailing debounced recompute.
    ///
    /// Returns `true` when the immediate recompute ran.
    pub fn request_auto_y_scale(&mut self, now: Duration) -> bool {
        let request = self.auto_scale.request(now);
        trace!(
            immediate = request.immediate,
            generation = request.trailing.generation(),
            "auto y-scale requested"
        );
        if request.immediate {
            self.update_visible_range_caches();
        }
        request.immediate
    }

    /// Earliest time at which a scheduled recompute comes due.
    #[must_use]
    pub fn next_scheduled_update(&self) -> Option<Duration> {
        match (
            self.y_axis_update.due_at(),
            self.auto_scale.trailing().due_at(),
        ) {
            (Some(left), Some(right)) => Some(left.min(right)),
            (left, right) => left.or(right),
        }
    }

    /// Runs due scheduled recomputes against the state as it stands now.
    ///
    /// Returns `true` when a recompute ran. Both schedules coming due at once
    /// still recompute only once.
    pub fn poll_scheduled_updates(&mut self, now: Duration) -> bool {
        let debounced = self.y_axis_update.take_due(now).is_some();
        let trailing = self.auto_scale.take_due(now).is_some();
        if !(debounced || trailing) {
            return false;
        }
        self.update_visible_range_caches();
        true
    }

    /// Moves the visible window and schedules a recompute when it changed.
    pub fn set_scroll_position(&mut self, position: f64, now: Duration) -> bool {
        if !self.scroll_zoom.set_scroll_position(position) {
            return false;
        }
        self.schedule_y_axis_update(now);
        true
    }

    pub fn scroll_by(&mut self, delta_seconds: f64, now: Duration) -> bool {
        let position = self.scroll_zoom.scroll_position() + delta_seconds;
        self.set_scroll_position(position, now)
    }

    /// Live pinch update. Visible immediately through the window accessors;
    /// the heavy recompute waits for the gesture to end.
    pub fn handle_magnification_changed(&mut self, factor: f64) {
        self.scroll_zoom.handle_magnification_changed(factor);
    }

    pub fn handle_magnification_ended(&mut self, now: Duration) -> bool {
        if !self.scroll_zoom.handle_magnification_ended() {
            return false;
        }
        self.schedule_y_axis_update(now);
        true
    }

    /// Records the plot width; a changed width alters the point budget and
    /// schedules a recompute.
    pub fn update_plot_width(&mut self, width: f64, now: Duration) -> bool {
        if !self.scroll_zoom.update_plot_width(width) {
            return false;
        }
        self.schedule_y_axis_update(now);
        true
    }

    /// Per-series downsampling budget for the current plot width.
    #[must_use]
    pub fn point_budget(&self) -> usize {
        self.config.point_budget(self.scroll_zoom.plot_width())
    }

    /// Recomputes Y scale, downsampled samples and metrics for the current
    /// window, then notifies the metrics listener.
    pub fn update_visible_range_caches(&mut self) {
        let window = self.visible_date_window();
        let (start, end) = window;

        self.y_data_domain = self.compute_y_data_domain(window);
        self.y_scale = nice_scale(
            self.y_data_domain.0,
            self.y_data_domain.1,
            self.config.max_ticks,
        );

        let budget = self.point_budget();
        let mut downsampled = IndexMap::with_capacity(self.series.len());
        let mut per_series = Vec::with_capacity(self.series.len());

        for series in &self.series {
            let sorted = series.sorted_by_date();
            let Some(strict) = visible_range(start, end, sorted) else {
                downsampled.insert(series.id().to_owned(), Vec::new());
                per_series.push(SeriesRangeMetrics::empty(series.id()));
                continue;
            };

            let extended = extend_range(strict.clone(), sorted.len());
            let points = min_max(&sorted[extended], budget).into_owned();
            downsampled.insert(series.id().to_owned(), points);
            per_series.push(SeriesRangeMetrics::from_visible(
                series.id(),
                &sorted[strict],
            ));
        }

        trace!(
            start,
            end,
            y_min = self.y_scale.domain.0,
            y_max = self.y_scale.domain.1,
            budget,
            "visible range caches updated"
        );

        self.downsampled = downsampled;
        let metrics: &VisibleRangeMetrics = self.metrics.insert(VisibleRangeMetrics {
            start_date: start,
            end_date: end,
            per_series,
        });
        if let Some(listener) = self.metrics_listener.as_mut() {
            listener(metrics);
        }
    }

    fn compute_y_data_domain(&self, (start, end): DateWindow) -> (f64, f64) {
        let padding = self.config.y_axis_padding;
        match visible_range(start, end, &self.all_points) {
            Some(strict) => padded_domain_for_values(
                self.all_points[strict].iter().map(|point| point.value),
                padding,
            ),
            None => padded_domain_for_values(
                self.all_points.iter().map(|point| point.value),
                padding,
            ),
        }
    }

    fn compute_visible_metrics(&self) -> VisibleRangeMetrics {
        let (start, end) = self.visible_date_window();
        let per_series = self
            .series
            .iter()
            .map(|series| {
                let sorted = series.sorted_by_date();
                match visible_range(start, end, sorted) {
                    Some(strict) => SeriesRangeMetrics::from_visible(series.id(), &sorted[strict]),
                    None => SeriesRangeMetrics::empty(series.id()),
                }
            })
            .collect();

        VisibleRangeMetrics {
            start_date: start,
            end_date: end,
            per_series,
        }
    }
}

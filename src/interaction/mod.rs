use serde::{Deserialize, Serialize};
use tracing::trace;

const PLOT_WIDTH_EPSILON_PX: f64 = 0.5;

/// Zoom bounds and time units for the scroll/zoom state machine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollZoomConfig {
    pub min_zoom_days: f64,
    pub max_zoom_days: f64,
    pub seconds_per_day: f64,
    /// Visible days on first display, clamped into the zoom bounds.
    pub initial_visible_days: f64,
}

impl Default for ScrollZoomConfig {
    fn default() -> Self {
        Self {
            min_zoom_days: 3.0,
            max_zoom_days: 180.0,
            seconds_per_day: 86_400.0,
            initial_visible_days: 30.0,
        }
    }
}

impl ScrollZoomConfig {
    #[must_use]
    pub fn clamp_days(self, days: f64) -> f64 {
        if days.is_nan() {
            return self.min_zoom_days;
        }
        days.max(self.min_zoom_days).min(self.max_zoom_days)
    }
}

/// Callback fired whenever the visible window moves or a zoom is committed.
pub type VisibleRangeListener = Box<dyn FnMut()>;

/// Scroll position and pinch-zoom state for one chart.
///
/// `current_zoom_days` is the live delta of an in-flight magnification gesture;
/// `total_zoom_days` only changes when the gesture ends.
pub struct ScrollZoomState {
    config: ScrollZoomConfig,
    scroll_position: f64,
    current_zoom_days: f64,
    total_zoom_days: f64,
    plot_width: Option<f64>,
    listener: Option<VisibleRangeListener>,
}

impl std::fmt::Debug for ScrollZoomState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollZoomState")
            .field("config", &self.config)
            .field("scroll_position", &self.scroll_position)
            .field("current_zoom_days", &self.current_zoom_days)
            .field("total_zoom_days", &self.total_zoom_days)
            .field("plot_width", &self.plot_width)
            .field("has_listener", &self.listener.is_some())
            .finish()
    }
}

impl ScrollZoomState {
    #[must_use]
    pub fn new(config: ScrollZoomConfig) -> Self {
        Self {
            config,
            scroll_position: 0.0,
            current_zoom_days: 0.0,
            total_zoom_days: config.clamp_days(config.initial_visible_days),
            plot_width: None,
            listener: None,
        }
    }

    #[must_use]
    pub fn config(&self) -> ScrollZoomConfig {
        self.config
    }

    #[must_use]
    pub fn scroll_position(&self) -> f64 {
        self.scroll_position
    }

    #[must_use]
    pub fn current_zoom_days(&self) -> f64 {
        self.current_zoom_days
    }

    #[must_use]
    pub fn total_zoom_days(&self) -> f64 {
        self.total_zoom_days
    }

    #[must_use]
    pub fn plot_width(&self) -> Option<f64> {
        self.plot_width
    }

    /// Days currently on screen, including any in-flight gesture.
    #[must_use]
    pub fn visible_days(&self) -> f64 {
        self.config
            .clamp_days(self.total_zoom_days + self.current_zoom_days)
    }

    /// Visible window length in seconds.
    #[must_use]
    pub fn visible_domain_length(&self) -> f64 {
        self.visible_days() * self.config.seconds_per_day
    }

    #[must_use]
    pub fn is_magnifying(&self) -> bool {
        self.current_zoom_days != 0.0
    }

    pub fn set_visible_range_listener(&mut self, listener: VisibleRangeListener) {
        self.listener = Some(listener);
    }

    pub fn clear_visible_range_listener(&mut self) {
        self.listener = None;
    }

    /// Moves the left edge of the visible window. Returns `true` and notifies
    /// the listener when the position actually changed.
    pub fn set_scroll_position(&mut self, position: f64) -> bool {
        if !position.is_finite() || position == self.scroll_position {
            return false;
        }
        self.scroll_position = position;
        trace!(position, "scroll position changed");
        self.notify_visible_range_changed();
        true
    }

    /// Places the scroll position without notifying (used by initial layout).
    pub(crate) fn place_scroll_position(&mut self, position: f64) {
        if position.is_finite() {
            self.scroll_position = position;
        }
    }

    /// Tracks a live pinch gesture. `factor > 1` zooms in, `factor < 1` zooms out.
    ///
    /// Non-finite or non-positive factors are ignored. Does not notify.
    pub fn handle_magnification_changed(&mut self, factor: f64) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        self.current_zoom_days = self.total_zoom_days / factor - self.total_zoom_days;
    }

    /// Commits the in-flight gesture. Returns `true` and notifies when the
    /// committed zoom changed.
    pub fn handle_magnification_ended(&mut self) -> bool {
        let committed = self
            .config
            .clamp_days(self.total_zoom_days + self.current_zoom_days);
        self.current_zoom_days = 0.0;

        if committed == self.total_zoom_days {
            return false;
        }
        self.total_zoom_days = committed;
        trace!(total_zoom_days = committed, "zoom committed");
        self.notify_visible_range_changed();
        true
    }

    /// Records the plot width in pixels. Returns `true` when the stored width changed.
    ///
    /// Non-finite or non-positive widths and sub-half-pixel changes are ignored.
    pub fn update_plot_width(&mut self, width: f64) -> bool {
        if !width.is_finite() || width <= 0.0 {
            return false;
        }
        if self
            .plot_width
            .is_some_and(|current| (current - width).abs() < PLOT_WIDTH_EPSILON_PX)
        {
            return false;
        }
        self.plot_width = Some(width);
        trace!(width, "plot width changed");
        true
    }

    pub fn notify_visible_range_changed(&mut self) {
        if let Some(listener) = self.listener.as_mut() {
            listener();
        }
    }
}

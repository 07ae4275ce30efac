use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{MAX_TICKS, YAxisPaddingConfig};
use crate::error::{ChartError, ChartResult};
use crate::interaction::ScrollZoomConfig;

use super::validation::{validate_padding_config, validate_scroll_zoom_config};

/// Per-chart configuration.
///
/// Every field has a default, so partial JSON documents deserialize cleanly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartModelConfig {
    pub scroll_zoom: ScrollZoomConfig,
    pub y_axis_padding: YAxisPaddingConfig,
    /// Upper bound on Y-axis tick count handed to the nice-scale calculator.
    pub max_ticks: usize,
    /// Floor of the per-series render budget once the plot width is known.
    pub min_visible_points: usize,
    /// Per-series render budget while the plot width is unknown.
    pub fallback_visible_points: usize,
    /// Render budget per pixel of plot width.
    pub points_per_pixel: f64,
    pub y_axis_debounce_ms: u64,
    /// Minimum spacing between immediate adaptive Y-scale updates.
    pub auto_scale_min_interval_ms: u64,
}

impl Default for ChartModelConfig {
    fn default() -> Self {
        Self {
            scroll_zoom: ScrollZoomConfig::default(),
            y_axis_padding: YAxisPaddingConfig::default(),
            max_ticks: 6,
            min_visible_points: 200,
            fallback_visible_points: 300,
            points_per_pixel: 2.0,
            y_axis_debounce_ms: 50,
            auto_scale_min_interval_ms: 100,
        }
    }
}

impl ChartModelConfig {
    #[must_use]
    pub fn with_zoom_days(mut self, min_zoom_days: f64, max_zoom_days: f64) -> Self {
        self.scroll_zoom.min_zoom_days = min_zoom_days;
        self.scroll_zoom.max_zoom_days = max_zoom_days;
        self
    }

    #[must_use]
    pub fn with_initial_visible_days(mut self, days: f64) -> Self {
        self.scroll_zoom.initial_visible_days = days;
        self
    }

    #[must_use]
    pub fn with_seconds_per_day(mut self, seconds_per_day: f64) -> Self {
        self.scroll_zoom.seconds_per_day = seconds_per_day;
        self
    }

    #[must_use]
    pub fn with_y_axis_padding(mut self, padding: YAxisPaddingConfig) -> Self {
        self.y_axis_padding = padding;
        self
    }

    #[must_use]
    pub fn with_max_ticks(mut self, max_ticks: usize) -> Self {
        self.max_ticks = max_ticks;
        self
    }

    /// Sets the render budget floor and the budget used before the plot width is known.
    #[must_use]
    pub fn with_visible_points(mut self, min_visible: usize, fallback_visible: usize) -> Self {
        self.min_visible_points = min_visible;
        self.fallback_visible_points = fallback_visible;
        self
    }

    #[must_use]
    pub fn with_points_per_pixel(mut self, points_per_pixel: f64) -> Self {
        self.points_per_pixel = points_per_pixel;
        self
    }

    #[must_use]
    pub fn with_y_axis_debounce(mut self, delay: Duration) -> Self {
        self.y_axis_debounce_ms = duration_to_millis(delay);
        self
    }

    #[must_use]
    pub fn with_auto_scale_min_interval(mut self, interval: Duration) -> Self {
        self.auto_scale_min_interval_ms = duration_to_millis(interval);
        self
    }

    #[must_use]
    pub fn y_axis_debounce(&self) -> Duration {
        Duration::from_millis(self.y_axis_debounce_ms)
    }

    #[must_use]
    pub fn auto_scale_min_interval(&self) -> Duration {
        Duration::from_millis(self.auto_scale_min_interval_ms)
    }

    /// Per-series downsampling budget for a plot of `plot_width` pixels.
    #[must_use]
    pub fn point_budget(&self, plot_width: Option<f64>) -> usize {
        match plot_width {
            Some(width) if width.is_finite() && width > 0.0 => {
                let derived = (width * self.points_per_pixel).round();
                let derived = if derived.is_finite() && derived > 0.0 {
                    derived.min(usize::MAX as f64) as usize
                } else {
                    0
                };
                derived.max(self.min_visible_points)
            }
            _ => self.fallback_visible_points,
        }
    }

    pub fn validate(self) -> ChartResult<Self> {
        validate_scroll_zoom_config(self.scroll_zoom)?;
        validate_padding_config(self.y_axis_padding)?;

        if !(2..=MAX_TICKS).contains(&self.max_ticks) {
            return Err(ChartError::InvalidConfig(format!(
                "max_ticks must be in 2..={MAX_TICKS}, got {}",
                self.max_ticks
            )));
        }
        if !self.points_per_pixel.is_finite() || self.points_per_pixel <= 0.0 {
            return Err(ChartError::InvalidConfig(
                "points_per_pixel must be finite and > 0".to_owned(),
            ));
        }
        Ok(self)
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(self) -> ChartResult<String> {
        serde_json::to_string_pretty(&self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes and validates config from JSON.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config: {e}")))?;
        config.validate()
    }
}

fn duration_to_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

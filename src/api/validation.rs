use crate::core::YAxisPaddingConfig;
use crate::error::{ChartError, ChartResult};
use crate::interaction::ScrollZoomConfig;

pub(super) fn validate_scroll_zoom_config(config: ScrollZoomConfig) -> ChartResult<ScrollZoomConfig> {
    if !config.min_zoom_days.is_finite()
        || !config.max_zoom_days.is_finite()
        || config.min_zoom_days <= 0.0
    {
        return Err(ChartError::InvalidConfig(
            "zoom day bounds must be finite and > 0".to_owned(),
        ));
    }
    if config.min_zoom_days > config.max_zoom_days {
        return Err(ChartError::InvalidConfig(format!(
            "min_zoom_days ({}) must be <= max_zoom_days ({})",
            config.min_zoom_days, config.max_zoom_days
        )));
    }
    if !config.seconds_per_day.is_finite() || config.seconds_per_day <= 0.0 {
        return Err(ChartError::InvalidConfig(
            "seconds_per_day must be finite and > 0".to_owned(),
        ));
    }
    if !config.initial_visible_days.is_finite() {
        return Err(ChartError::InvalidConfig(
            "initial_visible_days must be finite".to_owned(),
        ));
    }
    Ok(config)
}

pub(super) fn validate_padding_config(
    config: YAxisPaddingConfig,
) -> ChartResult<YAxisPaddingConfig> {
    for (name, value) in [
        ("range_padding_percent", config.range_padding_percent),
        ("min_value_padding_percent", config.min_value_padding_percent),
        ("minimum_padding", config.minimum_padding),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(ChartError::InvalidConfig(format!(
                "y-axis {name} must be finite and >= 0"
            )));
        }
    }
    Ok(config)
}

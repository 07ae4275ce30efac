use serde::{Deserialize, Serialize};

use crate::core::primitives::unix_seconds_to_datetime;

const MONTH_STRIDE_MIN_DAYS: f64 = 91.0;
const WEEK_STRIDE_MIN_DAYS: f64 = 31.0;

/// Calendar granularity used for X-axis grid lines and labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum XAxisStrideUnit {
    #[default]
    Day,
    Week,
    Month,
}

impl XAxisStrideUnit {
    /// Picks the stride for a visible window spanning `visible_days` days.
    #[must_use]
    pub fn for_visible_days(visible_days: f64) -> Self {
        if visible_days >= MONTH_STRIDE_MIN_DAYS {
            Self::Month
        } else if visible_days >= WEEK_STRIDE_MIN_DAYS {
            Self::Week
        } else {
            Self::Day
        }
    }

    #[must_use]
    pub fn for_visible_length(visible_length_seconds: f64, seconds_per_day: f64) -> Self {
        if seconds_per_day <= 0.0 {
            return Self::Day;
        }
        Self::for_visible_days(visible_length_seconds / seconds_per_day)
    }

    /// `chrono` format string for tick labels at this granularity.
    #[must_use]
    pub fn label_format(self) -> &'static str {
        match self {
            Self::Day | Self::Week => "%b %-d",
            Self::Month => "%b %Y",
        }
    }

    /// Formats a unix timestamp (seconds, UTC) as an axis label.
    #[must_use]
    pub fn format_label(self, unix_seconds: f64) -> Option<String> {
        unix_seconds_to_datetime(unix_seconds)
            .map(|time| time.format(self.label_format()).to_string())
    }
}

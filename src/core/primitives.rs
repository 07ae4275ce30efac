use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Converts a decimal measurement (body weight, one-rep max, ...) to `f64`.
///
/// Values outside the `f64` range map to `None`; callers drop such samples.
#[must_use]
pub fn decimal_to_f64(value: Decimal) -> Option<f64> {
    value.to_f64().filter(|converted| converted.is_finite())
}

/// Unix timestamp in seconds with millisecond precision.
#[must_use]
pub fn datetime_to_unix_seconds(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64 / 1000.0
}

/// Inverse of [`datetime_to_unix_seconds`]. Returns `None` for non-finite or
/// out-of-range timestamps.
#[must_use]
pub fn unix_seconds_to_datetime(seconds: f64) -> Option<DateTime<Utc>> {
    if !seconds.is_finite() {
        return None;
    }
    let millis = (seconds * 1000.0).round();
    if millis < i64::MIN as f64 || millis > i64::MAX as f64 {
        return None;
    }
    DateTime::from_timestamp_millis(millis as i64)
}

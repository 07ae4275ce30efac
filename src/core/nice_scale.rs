use serde::{Deserialize, Serialize};

/// Domain used whenever the input range is empty or non-finite.
pub const DEFAULT_DOMAIN: (f64, f64) = (0.0, 1.0);

/// Largest `max_ticks` honoured by [`nice_scale`]; larger requests are treated as this.
pub const MAX_TICKS: usize = 10_000;
/// Smallest tick spacing, in units of `f64::EPSILON` times the value magnitude.
const MIN_SPACING_ULPS: f64 = 4.0;

/// Padding applied around the raw value range before tick generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct YAxisPaddingConfig {
    /// Fraction of the value range added on each side.
    pub range_padding_percent: f64,
    /// Fraction of `|min|` used as padding for narrow ranges far from zero.
    pub min_value_padding_percent: f64,
    /// Absolute padding floor in value units.
    pub minimum_padding: f64,
}

impl Default for YAxisPaddingConfig {
    fn default() -> Self {
        Self {
            range_padding_percent: 0.10,
            min_value_padding_percent: 0.05,
            minimum_padding: 0.5,
        }
    }
}

/// Ticks evenly spaced by a 1/2/5 x 10^n step; `domain` spans first to last tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NiceScale {
    pub tick_values: Vec<f64>,
    pub domain: (f64, f64),
}

impl Default for NiceScale {
    fn default() -> Self {
        Self {
            tick_values: vec![DEFAULT_DOMAIN.0, DEFAULT_DOMAIN.1],
            domain: DEFAULT_DOMAIN,
        }
    }
}

impl NiceScale {
    /// Distance between adjacent ticks, `0.0` for fewer than two ticks.
    #[must_use]
    pub fn tick_spacing(&self) -> f64 {
        match self.tick_values.as_slice() {
            [first, second, ..] => second - first,
            _ => 0.0,
        }
    }
}

/// Pads `[min_value, max_value]` by
/// `max(range * range_pct, max(|min| * min_value_pct, minimum_padding))`.
#[must_use]
pub fn padded_domain(min_value: f64, max_value: f64, config: YAxisPaddingConfig) -> (f64, f64) {
    if !min_value.is_finite() || !max_value.is_finite() {
        return DEFAULT_DOMAIN;
    }

    let (low, high) = (min_value.min(max_value), min_value.max(max_value));
    let range = high - low;
    let floor_padding =
        (low.abs() * config.min_value_padding_percent).max(config.minimum_padding);
    let padding = (range * config.range_padding_percent).max(floor_padding);

    let (low, high) = (low - padding, high + padding);
    if low == high {
        return (low - 1.0, high + 1.0);
    }
    (low, high)
}

/// [`padded_domain`] over the extrema of `values`; empty input yields [`DEFAULT_DOMAIN`].
#[must_use]
pub fn padded_domain_for_values<I>(values: I, config: YAxisPaddingConfig) -> (f64, f64)
where
    I: IntoIterator<Item = f64>,
{
    match value_extent(values) {
        Some((min, max)) => padded_domain(min, max, config),
        None => DEFAULT_DOMAIN,
    }
}

/// Min and max of `values`, ignoring NaN. `None` when nothing comparable remains.
#[must_use]
pub fn value_extent<I>(values: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = f64>,
{
    values
        .into_iter()
        .filter(|value| !value.is_nan())
        .fold(None, |extent, value| match extent {
            None => Some((value, value)),
            Some((min, max)) => Some((min.min(value), max.max(value))),
        })
}

/// Generates human-friendly ticks covering `[min_value, max_value]`.
///
/// Ticks always land on the returned domain edges, and the domain always
/// covers the input range. `max_ticks` is clamped into `2..=MAX_TICKS`. When
/// the range is too narrow for its magnitude, the spacing widens to the
/// smallest nice step that keeps ticks distinct.
#[must_use]
pub fn nice_scale(min_value: f64, max_value: f64, max_ticks: usize) -> NiceScale {
    if !min_value.is_finite() || !max_value.is_finite() {
        return NiceScale::default();
    }

    let (mut low, mut high) = (min_value.min(max_value), min_value.max(max_value));
    if low == high {
        low -= 1.0;
        high += 1.0;
    }

    let intervals = max_ticks.clamp(2, MAX_TICKS) - 1;
    let nice_range = nice_number(high - low, false);
    let resolution = low.abs().max(high.abs()) * f64::EPSILON * MIN_SPACING_ULPS;
    let mut tick_spacing = nice_number(nice_range / intervals as f64, true);
    if tick_spacing < resolution {
        tick_spacing = nice_number(resolution, false);
    }
    if !tick_spacing.is_finite() || tick_spacing <= 0.0 {
        return NiceScale::default();
    }

    let mut nice_min = (low / tick_spacing).floor() * tick_spacing;
    if nice_min > low {
        nice_min -= tick_spacing;
    }
    let nice_max = (high / tick_spacing).ceil() * tick_spacing;
    let steps = ((nice_max - nice_min) / tick_spacing).round();
    if !steps.is_finite() || steps < 1.0 {
        return NiceScale::default();
    }
    let mut steps = steps as usize;
    // Rounding in the division can leave the top tick a hair under `high`.
    if nice_min + steps as f64 * tick_spacing < high {
        steps += 1;
    }

    let tick_values: Vec<f64> = (0..=steps)
        .map(|index| nice_min + index as f64 * tick_spacing)
        .collect();
    let domain = (nice_min, nice_min + steps as f64 * tick_spacing);

    NiceScale {
        tick_values,
        domain,
    }
}

/// Snaps `value` to 1, 2, 5 or 10 times its power of ten.
///
/// `round = false` snaps up (ceiling-like); `round = true` snaps to the nearest
/// candidate. Non-positive or non-finite input is returned unchanged.
#[must_use]
pub fn nice_number(value: f64, round: bool) -> f64 {
    if !value.is_finite() || value <= 0.0 {
        return value;
    }

    let exponent = value.log10().floor();
    let magnitude = 10f64.powf(exponent);
    let fraction = value / magnitude;

    let nice_fraction = if round {
        if fraction < 1.5 {
            1.0
        } else if fraction < 3.0 {
            2.0
        } else if fraction < 7.0 {
            5.0
        } else {
            10.0
        }
    } else if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };

    nice_fraction * magnitude
}

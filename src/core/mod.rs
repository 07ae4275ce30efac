pub mod axis_stride;
pub mod downsample;
pub mod nice_scale;
pub mod primitives;
pub mod search;
pub mod types;
pub mod windowing;

pub use axis_stride::XAxisStrideUnit;
pub use downsample::min_max;
pub use nice_scale::{
    DEFAULT_DOMAIN, MAX_TICKS, NiceScale, YAxisPaddingConfig, nice_number, nice_scale,
    padded_domain, padded_domain_for_values, value_extent,
};
pub use search::{lower_bound, upper_bound, visible_range};
pub use types::{TimeSeries, TimeSeriesPoint};
pub use windowing::{DateWindow, date_extent, extend_range, visible_date_window};

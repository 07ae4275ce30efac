mod chart_config;
mod chart_model;
mod metrics;
mod render_output;
mod scheduler;
mod validation;

pub use chart_config::ChartModelConfig;
pub use chart_model::{ChartModel, VisibleMetricsListener};
pub use metrics::{SeriesRangeMetrics, VisibleRangeMetrics};
pub use render_output::{
    ChartRenderOutput, ChartRenderOutputJsonContractV1, RENDER_OUTPUT_JSON_SCHEMA_V1,
};
pub use scheduler::{DebounceSlot, TaskHandle, ThrottleRequest, ThrottledDebounce};

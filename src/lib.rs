//! progress-chart: data/state model behind interactive time-series progress charts.
//!
//! The crate owns everything between raw measurement series and a renderer:
//! date-sorted caches, binary-search window queries, min/max downsampling,
//! nice Y-axis ticks, pinch-zoom/scroll state and debounced recomputation.
//! Drawing, gestures and persistence stay with the host.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod telemetry;

pub use api::{ChartModel, ChartModelConfig, ChartRenderOutput, VisibleRangeMetrics};
pub use error::{ChartError, ChartResult};

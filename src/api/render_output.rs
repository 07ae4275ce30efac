use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{DateWindow, TimeSeriesPoint, XAxisStrideUnit};
use crate::error::{ChartError, ChartResult};

use super::{ChartModel, VisibleRangeMetrics};

pub const RENDER_OUTPUT_JSON_SCHEMA_V1: u32 = 1;

/// Everything a renderer needs to draw the current frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartRenderOutput {
    pub y_domain: (f64, f64),
    pub y_tick_values: Vec<f64>,
    pub x_domain: Option<DateWindow>,
    pub x_axis_stride_unit: XAxisStrideUnit,
    pub per_series_visible_points: IndexMap<String, Vec<TimeSeriesPoint>>,
    pub visible_metrics: VisibleRangeMetrics,
    #[serde(default)]
    pub data_version: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartRenderOutputJsonContractV1 {
    pub schema_version: u32,
    pub output: ChartRenderOutput,
}

impl ChartModel {
    /// Snapshot of the renderer contract. Computes metrics if none are cached.
    pub fn render_output(&mut self) -> ChartRenderOutput {
        let visible_metrics = self.visible_range_metrics().clone();
        ChartRenderOutput {
            y_domain: self.y_domain(),
            y_tick_values: self.y_tick_values().to_vec(),
            x_domain: self.x_domain(),
            x_axis_stride_unit: self.x_axis_stride(),
            per_series_visible_points: self.visible_series_map().clone(),
            visible_metrics,
            data_version: self.data_version(),
        }
    }
}

impl ChartRenderOutput {
    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = ChartRenderOutputJsonContractV1 {
            schema_version: RENDER_OUTPUT_JSON_SCHEMA_V1,
            output: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize render output contract v1: {e}"))
        })
    }

    /// Parses either a bare output or a versioned v1 contract payload.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        if let Ok(output) = serde_json::from_str::<ChartRenderOutput>(input) {
            return Ok(output);
        }
        let payload: ChartRenderOutputJsonContractV1 =
            serde_json::from_str(input).map_err(|e| {
                ChartError::InvalidData(format!("failed to parse render output json payload: {e}"))
            })?;
        if payload.schema_version != RENDER_OUTPUT_JSON_SCHEMA_V1 {
            return Err(ChartError::InvalidData(format!(
                "unsupported render output schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.output)
    }
}

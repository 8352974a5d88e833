//! Multi-metric batch configuration
//!
//! ```json
//! {
//!   "shared": {
//!     "axes": [ ... ],
//!     "timeIntervals": { ... },
//!     "options": { "zeroVisibility": "ELIMINATE" }
//!   },
//!   "metrics": [
//!     { "metric": "employeeCount", "label": "Headcount" },
//!     { "metric": "exitCount", "filters": [ ... ] }
//!   ]
//! }
//! ```
//!
//! The API applies one filter list per request, so metrics filtered
//! differently need one query each.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use super::errors::{BatchError, BatchResult};

/// Axes, time window and options common to every query of a batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedQuery {
    pub axes: Vec<Value>,
    #[serde(rename = "timeIntervals", default, skip_serializing_if = "Option::is_none")]
    pub time_intervals: Option<Value>,
    #[serde(default)]
    pub options: Map<String, Value>,
}

/// One metric of a batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricEntry {
    pub metric: String,
    #[serde(default)]
    pub filters: Vec<Value>,
    /// Display name for the `metric` column; defaults to the metric id
    #[serde(default)]
    pub label: Option<String>,
}

impl MetricEntry {
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.metric)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiMetricConfig {
    pub shared: SharedQuery,
    pub metrics: Vec<MetricEntry>,
}

impl MultiMetricConfig {
    /// Load a batch configuration from a JSON file
    pub fn load(path: &Path) -> BatchResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            BatchError::Config(format!("Failed to read '{}': {}", path.display(), e))
        })?;
        serde_json::from_str(&content)
            .map_err(|e| BatchError::Config(format!("Invalid batch config JSON: {}", e)))
    }

    /// Payload for one entry: its metric and filters over the shared axes and window
    pub fn payload_for(&self, entry: &MetricEntry) -> Value {
        let mut query = json!({
            "source": {"metric": entry.metric},
            "axes": self.shared.axes,
            "filters": entry.filters,
        });
        if let Some(time_intervals) = &self.shared.time_intervals {
            query["timeIntervals"] = time_intervals.clone();
        }

        let mut payload = json!({ "query": query });
        if !self.shared.options.is_empty() {
            payload["options"] = Value::Object(self.shared.options.clone());
        }
        payload
    }
}

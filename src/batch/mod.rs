//! Multi-Metric Batch
//!
//! Runs one aggregate query per metric over shared axes and a shared time
//! window, then concatenates the decoded rows. Execution is sequential and
//! all-or-nothing.

mod config;
mod errors;
mod runner;

pub use config::{MetricEntry, MultiMetricConfig, SharedQuery};
pub use errors::{BatchError, BatchResult};
pub use runner::{run_batch, METRIC_COLUMN, METRIC_ID_COLUMN};

//! Sequential batch execution
//!
//! Entries run in config order. The first failure aborts the whole batch
//! and no partial result is returned.

use crate::cellset::{decode, TabularRecord};
use crate::observability::{log_event, Event};
use crate::payload::validate;
use crate::transport::QueryTransport;

use super::config::{MetricEntry, MultiMetricConfig};
use super::errors::{BatchError, BatchResult};

/// Leading column holding the entry label
pub const METRIC_COLUMN: &str = "metric";
/// Second column holding the metric id
pub const METRIC_ID_COLUMN: &str = "metric_id";

/// Runs every metric of `config` through `transport` and concatenates the rows.
///
/// Each row is prefixed with `metric` (label or id) and `metric_id`.
/// Entries whose query yields no rows are skipped.
///
/// # Errors
///
/// - `NoMetrics` when the config lists none
/// - the first payload, transport or decode failure, tagged with its metric
/// - `NoData` when no entry produced a row
pub fn run_batch<T>(transport: &T, config: &MultiMetricConfig) -> BatchResult<Vec<TabularRecord>>
where
    T: QueryTransport + ?Sized,
{
    if config.metrics.is_empty() {
        return Err(BatchError::NoMetrics);
    }

    let count = config.metrics.len().to_string();
    log_event(Event::BatchBegin, &[("metrics", count.as_str())]);

    let mut rows = Vec::new();
    for entry in &config.metrics {
        match run_entry(transport, config, entry) {
            Ok(records) if records.is_empty() => {
                log_event(Event::BatchEntryEmpty, &[("metric", entry.metric.as_str())]);
            }
            Ok(records) => rows.extend(records),
            Err(e) => {
                log_event(
                    Event::BatchAborted,
                    &[("metric", entry.metric.as_str()), ("code", e.code())],
                );
                return Err(e);
            }
        }
    }

    if rows.is_empty() {
        log_event(Event::BatchAborted, &[("code", BatchError::NoData.code())]);
        return Err(BatchError::NoData);
    }

    let total = rows.len().to_string();
    log_event(Event::BatchComplete, &[("rows", total.as_str())]);
    Ok(rows)
}

fn run_entry<T>(
    transport: &T,
    config: &MultiMetricConfig,
    entry: &MetricEntry,
) -> BatchResult<Vec<TabularRecord>>
where
    T: QueryTransport + ?Sized,
{
    let payload = config.payload_for(entry);
    let (ok, errors) = validate(&payload);
    if !ok {
        return Err(BatchError::InvalidPayload {
            metric: entry.metric.clone(),
            errors,
        });
    }

    log_event(Event::QueryDispatched, &[("metric", entry.metric.as_str())]);
    let response = transport
        .post_query(&payload)
        .map_err(|source| BatchError::Transport {
            metric: entry.metric.clone(),
            source,
        })?;

    let records = decode(&response, Some(&entry.metric)).map_err(|source| BatchError::Decode {
        metric: entry.metric.clone(),
        source,
    })?;

    Ok(records
        .into_iter()
        .map(|r| {
            r.with_leading(METRIC_ID_COLUMN, entry.metric.as_str())
                .with_leading(METRIC_COLUMN, entry.label())
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{TransportError, TransportResult};
    use serde_json::{json, Value};

    struct Fixed(Value);

    impl QueryTransport for Fixed {
        fn post_query(&self, _payload: &Value) -> TransportResult<Value> {
            Ok(self.0.clone())
        }
    }

    struct Down;

    impl QueryTransport for Down {
        fn post_query(&self, _payload: &Value) -> TransportResult<Value> {
            Err(TransportError::Network("connection refused".into()))
        }
    }

    fn config(metrics: Value) -> MultiMetricConfig {
        serde_json::from_value(json!({
            "shared": {
                "axes": [{"dimensionLevelSelection": {"dimension": {"name": "Gender"}, "levelIds": ["Gender"]}}],
                "timeIntervals": {"fromDateTime": "2024-01-01", "intervalPeriodType": "MONTH", "intervalCount": 1}
            },
            "metrics": metrics
        }))
        .unwrap()
    }

    #[test]
    fn test_empty_metric_list() {
        let result = run_batch(&Down, &config(json!([])));
        assert!(matches!(result, Err(BatchError::NoMetrics)));
    }

    #[test]
    fn test_rows_lead_with_metric_columns() {
        let response = json!({
            "axes": [{"dimension": {"name": "Gender"}, "positions": [{"path": ["Female"]}]}],
            "cells": [{"coordinates": [0], "value": "12"}]
        });
        let rows = run_batch(
            &Fixed(response),
            &config(json!([{"metric": "employeeCount", "label": "Headcount"}])),
        )
        .unwrap();

        assert_eq!(rows.len(), 1);
        let columns: Vec<&str> = rows[0].columns().collect();
        assert_eq!(&columns[..2], &["metric", "metric_id"]);
        assert_eq!(rows[0].get("metric").and_then(|s| s.as_str()), Some("Headcount"));
        assert_eq!(rows[0].get("metric_id").and_then(|s| s.as_str()), Some("employeeCount"));
    }

    #[test]
    fn test_interval_labels_are_left_unchanged() {
        let response = json!({
            "axes": [{"dimension": {"name": "DateInRange"}, "positions": [{"path": ["2023-01-01T00:00:00.000Z - [0]"]}]}],
            "cells": [{"coordinates": [0], "value": "5"}]
        });
        let rows = run_batch(&Fixed(response), &config(json!([{"metric": "employeeCount"}]))).unwrap();
        assert_eq!(
            rows[0].get("DateInRange").and_then(|s| s.as_str()),
            Some("2023-01-01T00:00:00.000Z - [0]")
        );
    }

    #[test]
    fn test_transport_failure_names_metric() {
        let err = run_batch(&Down, &config(json!([{"metric": "exitCount"}]))).unwrap_err();
        assert_eq!(err.metric(), Some("exitCount"));
        assert_eq!(err.code(), "CELLQ_TRANSPORT_NETWORK");
    }

    #[test]
    fn test_all_empty_is_no_data() {
        let err = run_batch(
            &Fixed(json!({"axes": [], "cells": []})),
            &config(json!([{"metric": "a"}, {"metric": "b"}])),
        )
        .unwrap_err();
        assert!(matches!(err, BatchError::NoData));
    }
}

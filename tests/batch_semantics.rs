//! Batch Semantics Tests
//!
//! - Entries run in config order, one query each
//! - The first failure aborts the batch; later entries are never sent
//! - Rows lead with `metric` and `metric_id`
//! - Entries with no rows are skipped; a batch with no rows at all fails

use std::cell::RefCell;
use std::collections::HashMap;

use cellquery::batch::{run_batch, BatchError, MultiMetricConfig};
use cellquery::cellset::Scalar;
use cellquery::transport::{QueryTransport, TransportError, TransportResult};
use serde_json::{json, Value};

// =============================================================================
// Helper Functions
// =============================================================================

/// In-memory transport answering by metric id and recording every request
struct ScriptedTransport {
    responses: HashMap<String, Result<Value, u16>>,
    sent: RefCell<Vec<Value>>,
}

impl ScriptedTransport {
    fn new() -> Self {
        Self {
            responses: HashMap::new(),
            sent: RefCell::new(Vec::new()),
        }
    }

    fn answer(mut self, metric: &str, response: Value) -> Self {
        self.responses.insert(metric.to_string(), Ok(response));
        self
    }

    fn fail(mut self, metric: &str, status: u16) -> Self {
        self.responses.insert(metric.to_string(), Err(status));
        self
    }

    fn sent_metrics(&self) -> Vec<String> {
        self.sent
            .borrow()
            .iter()
            .filter_map(|p| p.pointer("/query/source/metric").and_then(Value::as_str))
            .map(str::to_string)
            .collect()
    }
}

impl QueryTransport for ScriptedTransport {
    fn post_query(&self, payload: &Value) -> TransportResult<Value> {
        self.sent.borrow_mut().push(payload.clone());
        let metric = payload
            .pointer("/query/source/metric")
            .and_then(Value::as_str)
            .unwrap_or_default();
        match self.responses.get(metric) {
            Some(Ok(response)) => Ok(response.clone()),
            Some(Err(status)) => Err(TransportError::Http {
                status: *status,
                body: "rejected".into(),
            }),
            None => Ok(json!({"axes": [], "cells": []})),
        }
    }
}

fn config(metrics: Value) -> MultiMetricConfig {
    serde_json::from_value(json!({
        "shared": {
            "axes": [{"dimensionLevelSelection": {"dimension": {"name": "Country"}, "levelIds": ["Country"]}}],
            "timeIntervals": {"dynamicDateFrom": "SOURCE", "intervalPeriodType": "YEAR", "intervalCount": 1}
        },
        "metrics": metrics
    }))
    .unwrap()
}

fn country_rows(values: &[&str]) -> Value {
    let positions: Vec<Value> = (0..values.len())
        .map(|i| json!({"path": [format!("C{}", i)]}))
        .collect();
    let cells: Vec<Value> = values
        .iter()
        .enumerate()
        .map(|(i, v)| json!({"coordinates": [i], "value": v}))
        .collect();
    json!({
        "axes": [{"dimension": {"name": "Country"}, "positions": positions}],
        "cells": cells
    })
}

// =============================================================================
// Success
// =============================================================================

#[test]
fn test_rows_are_concatenated_in_config_order() {
    let transport = ScriptedTransport::new()
        .answer("employeeCount", country_rows(&["10", "20"]))
        .answer("exitCount", country_rows(&["1"]));
    let config = config(json!([
        {"metric": "employeeCount", "label": "Headcount"},
        {"metric": "exitCount"}
    ]));

    let rows = run_batch(&transport, &config).unwrap();

    assert_eq!(transport.sent_metrics(), vec!["employeeCount", "exitCount"]);
    assert_eq!(rows.len(), 3);
    let labels: Vec<_> = rows
        .iter()
        .filter_map(|r| r.get("metric").and_then(Scalar::as_str))
        .collect();
    assert_eq!(labels, vec!["Headcount", "Headcount", "exitCount"]);

    let columns: Vec<&str> = rows[2].columns().collect();
    assert_eq!(columns, vec!["metric", "metric_id", "Measures", "Country", "value"]);
}

#[test]
fn test_each_entry_carries_its_own_filters() {
    let transport = ScriptedTransport::new()
        .answer("a", country_rows(&["1"]))
        .answer("b", country_rows(&["2"]));
    let config = config(json!([
        {"metric": "a"},
        {"metric": "b", "filters": [{"selectionConcept": {"name": "isManager"}}]}
    ]));

    run_batch(&transport, &config).unwrap();

    let sent = transport.sent.borrow();
    assert_eq!(sent[0]["query"]["filters"], json!([]));
    assert_eq!(sent[1]["query"]["filters"][0]["selectionConcept"]["name"], "isManager");
    assert_eq!(sent[0]["query"]["axes"], sent[1]["query"]["axes"]);
}

#[test]
fn test_empty_entries_are_skipped() {
    let transport = ScriptedTransport::new().answer("b", country_rows(&["4"]));
    let config = config(json!([{"metric": "a"}, {"metric": "b"}]));

    let rows = run_batch(&transport, &config).unwrap();

    assert_eq!(transport.sent_metrics(), vec!["a", "b"]);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("metric_id").and_then(Scalar::as_str), Some("b"));
}

// =============================================================================
// Failure
// =============================================================================

#[test]
fn test_first_failure_aborts_batch() {
    let transport = ScriptedTransport::new()
        .answer("a", country_rows(&["1"]))
        .fail("b", 500)
        .answer("c", country_rows(&["3"]));
    let config = config(json!([{"metric": "a"}, {"metric": "b"}, {"metric": "c"}]));

    let err = run_batch(&transport, &config).unwrap_err();

    assert_eq!(transport.sent_metrics(), vec!["a", "b"]);
    match err {
        BatchError::Transport { metric, source } => {
            assert_eq!(metric, "b");
            assert_eq!(source.status(), Some(500));
        }
        other => panic!("Expected Transport error, got {:?}", other),
    }
}

#[test]
fn test_api_error_body_aborts_batch() {
    let transport = ScriptedTransport::new()
        .answer("a", json!({"error": {"message": "Unknown metric", "errorCode": "E1"}}))
        .answer("b", country_rows(&["1"]));
    let config = config(json!([{"metric": "a"}, {"metric": "b"}]));

    let err = run_batch(&transport, &config).unwrap_err();

    assert_eq!(transport.sent_metrics(), vec!["a"]);
    assert!(matches!(err, BatchError::Decode { .. }));
    assert_eq!(err.code(), "CELLQ_RESPONSE_ERROR");
}

#[test]
fn test_invalid_shared_axes_are_never_sent() {
    let transport = ScriptedTransport::new();
    let mut config = config(json!([{"metric": "a"}]));
    config.shared.axes = vec![json!({"notAnAxis": {}})];

    let err = run_batch(&transport, &config).unwrap_err();

    assert!(transport.sent_metrics().is_empty());
    match err {
        BatchError::InvalidPayload { metric, errors } => {
            assert_eq!(metric, "a");
            assert!(errors[0].contains("Unrecognized axis selection"));
        }
        other => panic!("Expected InvalidPayload, got {:?}", other),
    }
}

#[test]
fn test_no_rows_anywhere_is_no_data() {
    let transport = ScriptedTransport::new();
    let config = config(json!([{"metric": "a"}, {"metric": "b"}]));

    assert!(matches!(
        run_batch(&transport, &config),
        Err(BatchError::NoData)
    ));
    assert_eq!(transport.sent_metrics().len(), 2);
}

#[test]
fn test_empty_metric_list_sends_nothing() {
    let transport = ScriptedTransport::new();
    assert!(matches!(
        run_batch(&transport, &config(json!([]))),
        Err(BatchError::NoMetrics)
    ));
    assert!(transport.sent.borrow().is_empty());
}

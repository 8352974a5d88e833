//! Validator Invariant Tests
//!
//! - A payload without `query` yields exactly one error, and nothing else is checked
//! - Defects are accumulated across rules, never fail-fast
//! - Payloads produced by the builder always validate
//! - Validation is deterministic

use cellquery::axis::{AxisKind, TimeIntervals};
use cellquery::payload::{
    dimension_axis, member_set_filter, selection_concept_filter, time_axis, QueryBuilder,
};
use cellquery::{validate, PayloadValidator};
use serde_json::{json, Value};

// =============================================================================
// Helper Functions
// =============================================================================

fn valid_payload() -> Value {
    json!({
        "query": {
            "source": {"metric": "employeeCount"},
            "axes": [
                {"dimensionLevelSelection": {
                    "dimension": {"name": "Function", "qualifyingPath": "Employee"},
                    "levelIds": ["Function"]
                }}
            ],
            "filters": [
                {"selectionConcept": {"name": "isManager", "qualifyingPath": "Employee"}}
            ],
            "timeIntervals": {
                "dynamicDateFrom": "SOURCE",
                "intervalPeriodType": "YEAR",
                "intervalCount": 3
            }
        },
        "options": {"zeroVisibility": "ELIMINATE"}
    })
}

// =============================================================================
// Totality
// =============================================================================

#[test]
fn test_missing_query_short_circuits() {
    let inputs = [
        json!({}),
        json!({"source": {"metric": "x"}, "axes": "nope"}),
        json!([1, 2, 3]),
        json!("payload"),
        Value::Null,
    ];
    for input in &inputs {
        let (ok, errors) = validate(input);
        assert!(!ok, "{} should be rejected", input);
        assert_eq!(errors, vec!["Missing 'query' key in payload".to_string()]);
    }
}

// =============================================================================
// Completeness
// =============================================================================

/// Missing metric and missing axes are both reported in one pass.
#[test]
fn test_missing_metric_and_axes_both_reported() {
    let payload = json!({"query": {"source": {}}});
    let (ok, errors) = validate(&payload);

    assert!(!ok);
    assert!(errors.iter().any(|e| e.contains("'metric'")));
    assert!(errors.iter().any(|e| e.contains("'axes'")));
    assert_eq!(errors.len(), 2);
}

#[test]
fn test_errors_follow_rule_order() {
    let payload = json!({
        "query": {
            "axes": [{}, {"formula": "x", "selectionConcept": {}}],
            "filters": [{}],
            "timeIntervals": {}
        }
    });
    let (_, errors) = validate(&payload);

    let source = errors.iter().position(|e| e.contains("'source'")).unwrap();
    let axis0 = errors.iter().position(|e| e.starts_with("Axis 0")).unwrap();
    let axis1 = errors.iter().position(|e| e.starts_with("Axis 1")).unwrap();
    let filter = errors.iter().position(|e| e.starts_with("Filter 0")).unwrap();
    let time = errors.iter().position(|e| e.starts_with("timeIntervals")).unwrap();

    assert!(source < axis0);
    assert!(axis0 < axis1);
    assert!(axis1 < filter);
    assert!(filter < time);
    // anchor, period type and count are each reported
    assert_eq!(errors.iter().filter(|e| e.starts_with("timeIntervals")).count(), 3);
}

// =============================================================================
// Axis Variants
// =============================================================================

#[test]
fn test_every_known_axis_kind_is_accepted() {
    for kind in AxisKind::ALL {
        let body = match kind {
            AxisKind::DimensionLevelSelection => {
                json!({"dimension": {"name": "Gender"}, "levelIds": ["Gender"]})
            }
            AxisKind::NumericRanges => json!({"property": {"name": "Age"}, "ranges": "0 30 60"}),
            _ => json!({}),
        };
        let mut axis = serde_json::Map::new();
        axis.insert(kind.tag().to_string(), body);

        let mut payload = valid_payload();
        payload["query"]["axes"] = json!([Value::Object(axis)]);
        let (ok, errors) = validate(&payload);
        assert!(ok, "{} rejected: {:?}", kind.tag(), errors);
    }
}

#[test]
fn test_unknown_axis_tag_is_flagged() {
    let mut payload = valid_payload();
    payload["query"]["axes"] = json!([{"dimensionSelection": {}}]);
    let report = PayloadValidator::validate(&payload);

    assert!(!report.is_valid());
    assert!(report.errors()[0].contains("Unrecognized axis selection 'dimensionSelection'"));
}

#[test]
fn test_empty_level_ids_rejected() {
    let mut payload = valid_payload();
    payload["query"]["axes"][0]["dimensionLevelSelection"]["levelIds"] = json!([]);
    let (ok, errors) = validate(&payload);

    assert!(!ok);
    assert_eq!(
        errors,
        vec!["Axis 0: 'levelIds' is empty (at least one level ID required)".to_string()]
    );
}

#[test]
fn test_filter_needs_exactly_one_kind() {
    let mut payload = valid_payload();
    payload["query"]["filters"] = json!([
        {"memberSet": {}, "selectionConcept": {}},
        {"selectionConcept": {"name": "isActive"}}
    ]);
    let (ok, errors) = validate(&payload);

    assert!(!ok);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].starts_with("Filter 0"));
}

// =============================================================================
// Builder Agreement
// =============================================================================

#[test]
fn test_built_payloads_validate() {
    let payload = QueryBuilder::new("employeeCount")
        .axis(dimension_axis("Location", Some("Employee"), Some(vec!["Country".into()])))
        .axis(time_axis(None, None))
        .filter(member_set_filter("Gender", &["Female"], &[], None))
        .filter(selection_concept_filter("isManager", None))
        .time_intervals(TimeIntervals::from_date("2024-01-01", "MONTH", 12))
        .option("zeroVisibility", "ELIMINATE")
        .build()
        .unwrap()
        .to_value()
        .unwrap();

    let report = PayloadValidator::validate(&payload);
    assert!(report.is_valid(), "{:?}", report.errors());
}

// =============================================================================
// Determinism
// =============================================================================

#[test]
fn test_validation_is_deterministic() {
    let payload = json!({"query": {"axes": [{"bogus": 1}], "filters": "x"}});
    let first = validate(&payload);
    for _ in 0..50 {
        assert_eq!(validate(&payload), first);
    }
}

#[test]
fn test_valid_payload_passes() {
    let (ok, errors) = validate(&valid_payload());
    assert!(ok);
    assert!(errors.is_empty());
}

//! Payload validator for aggregate query payloads
//!
//! Validation semantics:
//! - `query` must be present; without it nothing else is checked
//! - `source` names one metric or a non-empty list of metric columns
//! - `axes` is present and non-empty
//! - every axis carries exactly one known variant tag, and the typed
//!   variants carry their required fields
//! - every filter carries exactly one of `memberSet` / `selectionConcept`
//! - a time window is anchored and has a period type and count
//!
//! Defects are accumulated, never fail-fast: one pass reports every
//! problem in the payload. Messages are ordered by rule, then by index.

use serde_json::{Map, Value};

use crate::axis::{AxisKind, Detected, FilterKind};

/// Outcome of validating one payload
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    errors: Vec<String>,
}

impl ValidationReport {
    /// True when no defect was found
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Defects in detection order
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Splits the report into `(ok, errors)`
    pub fn into_parts(self) -> (bool, Vec<String>) {
        (self.errors.is_empty(), self.errors)
    }

    fn push(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }
}

/// Validates a candidate payload, returning `(ok, errors)`.
pub fn validate(payload: &Value) -> (bool, Vec<String>) {
    PayloadValidator::validate(payload).into_parts()
}

/// Structural validator for raw aggregate query payloads.
///
/// Stateless; every call is independent.
pub struct PayloadValidator;

impl PayloadValidator {
    /// Validates a payload and returns every defect found.
    pub fn validate(payload: &Value) -> ValidationReport {
        let mut report = ValidationReport::default();

        let Some(query) = field(payload, "query") else {
            report.push("Missing 'query' key in payload");
            return report;
        };
        let Some(query) = query.as_object() else {
            report.push("'query' must be an object");
            return report;
        };

        Self::check_source(query, &mut report);
        Self::check_axes(query, &mut report);
        Self::check_filters(query, &mut report);
        Self::check_time_intervals(query, &mut report);

        report
    }

    fn check_source(query: &Map<String, Value>, report: &mut ValidationReport) {
        let Some(source) = query.get("source").filter(|v| !v.is_null()) else {
            report.push("Missing 'source' in query");
            return;
        };

        if field(source, "metric").is_some() {
            return;
        }

        match field(source, "metrics") {
            Some(metrics) => match field(metrics, "columns") {
                None => report.push("Missing 'columns' in source.metrics"),
                Some(Value::Array(columns)) if columns.is_empty() => {
                    report.push("'metrics.columns' is empty (at least one column is required)")
                }
                Some(Value::Array(_)) => {}
                Some(_) => report.push("'metrics.columns' must be an array"),
            },
            None => report.push("Missing 'metric' in source"),
        }
    }

    fn check_axes(query: &Map<String, Value>, report: &mut ValidationReport) {
        let axes = match query.get("axes").filter(|v| !v.is_null()) {
            None => {
                report.push("Missing 'axes' in query (at least one axis is required)");
                return;
            }
            Some(Value::Array(axes)) => axes,
            Some(_) => {
                report.push("'axes' must be an array");
                return;
            }
        };

        if axes.is_empty() {
            report.push("'axes' is empty (at least one axis is required)");
            return;
        }

        for (i, axis) in axes.iter().enumerate() {
            Self::check_axis(i, axis, report);
        }
    }

    fn check_axis(i: usize, axis: &Value, report: &mut ValidationReport) {
        let Some(obj) = axis.as_object() else {
            report.push(format!("Axis {}: must be an object", i));
            return;
        };

        match AxisKind::detect(obj) {
            Detected::Unrecognized if obj.values().all(Value::is_null) => report.push(format!(
                "Axis {}: Missing axis selection (expected one of: {})",
                i,
                AxisKind::expected_tags()
            )),
            Detected::Unrecognized => report.push(format!(
                "Axis {}: Unrecognized axis selection {} (expected one of: {})",
                i,
                quoted_keys(obj),
                AxisKind::expected_tags()
            )),
            Detected::Many(kinds) => report.push(format!(
                "Axis {}: Multiple axis selections present ({}); exactly one is allowed",
                i,
                kinds
                    .iter()
                    .map(|k| format!("'{}'", k.tag()))
                    .collect::<Vec<_>>()
                    .join(", ")
            )),
            Detected::One(AxisKind::DimensionLevelSelection) => {
                let body = &obj[AxisKind::DimensionLevelSelection.tag()];
                match field(body, "dimension") {
                    None => report.push(format!(
                        "Axis {}: Missing 'dimension' in dimensionLevelSelection",
                        i
                    )),
                    Some(dimension) if field(dimension, "name").is_none() => {
                        report.push(format!("Axis {}: Missing 'name' in dimension", i))
                    }
                    Some(_) => {}
                }
                match field(body, "levelIds") {
                    None => report.push(format!(
                        "Axis {}: Missing 'levelIds' in dimensionLevelSelection",
                        i
                    )),
                    Some(Value::Array(ids)) if ids.is_empty() => report.push(format!(
                        "Axis {}: 'levelIds' is empty (at least one level ID required)",
                        i
                    )),
                    Some(Value::Array(_)) => {}
                    Some(_) => report.push(format!("Axis {}: 'levelIds' must be an array", i)),
                }
            }
            Detected::One(AxisKind::NumericRanges) => {
                let body = &obj[AxisKind::NumericRanges.tag()];
                if field(body, "property").is_none() {
                    report.push(format!("Axis {}: Missing 'property' in numericRanges", i));
                }
                if field(body, "ranges").is_none() {
                    report.push(format!("Axis {}: Missing 'ranges' in numericRanges", i));
                }
            }
            // Remaining kinds are opaque beyond the tag itself.
            Detected::One(_) => {}
        }
    }

    fn check_filters(query: &Map<String, Value>, report: &mut ValidationReport) {
        let filters = match query.get("filters").filter(|v| !v.is_null()) {
            None => return,
            Some(Value::Array(filters)) => filters,
            Some(_) => {
                report.push("'filters' must be an array");
                return;
            }
        };

        for (i, filter) in filters.iter().enumerate() {
            let Some(obj) = filter.as_object() else {
                report.push(format!("Filter {}: must be an object", i));
                continue;
            };
            match FilterKind::detect(obj) {
                Detected::One(_) => {}
                Detected::Unrecognized => report.push(format!(
                    "Filter {}: Must have either 'memberSet' or 'selectionConcept'",
                    i
                )),
                Detected::Many(_) => report.push(format!(
                    "Filter {}: Must have only one of 'memberSet' or 'selectionConcept'",
                    i
                )),
            }
        }
    }

    fn check_time_intervals(query: &Map<String, Value>, report: &mut ValidationReport) {
        let Some(ti) = query.get("timeIntervals").filter(|v| !v.is_null()) else {
            return;
        };
        if !ti.is_object() {
            report.push("timeIntervals: must be an object");
            return;
        }

        if field(ti, "fromDateTime").is_none() && field(ti, "dynamicDateFrom").is_none() {
            report.push("timeIntervals: Must have either 'fromDateTime' or 'dynamicDateFrom'");
        }
        if field(ti, "intervalPeriodType").is_none() {
            report.push("timeIntervals: Missing 'intervalPeriodType'");
        }
        if field(ti, "intervalCount").is_none() {
            report.push("timeIntervals: Missing 'intervalCount'");
        }
    }
}

/// Object member lookup where an explicit `null` counts as absent.
fn field<'v>(value: &'v Value, key: &str) -> Option<&'v Value> {
    value.get(key).filter(|v| !v.is_null())
}

fn quoted_keys(obj: &Map<String, Value>) -> String {
    obj.iter()
        .filter(|(_, v)| !v.is_null())
        .map(|(k, _)| k)
        .map(|k| format!("'{}'", k))
        .collect::<Vec<_>>()
        .join(", ")
}

//! Cell set decoder
//!
//! Turns a response `{"axes": [...], "cells": [...]}` into one flat record
//! per cell, in cell order.
//!
//! Decoding steps:
//! 1. A response `error` member fails the call with `DecodeError::Response`
//! 2. Without axes, each cell becomes `{value, Measures?}`
//! 3. Each axis is classified (Measures or Dimension) and gets a position
//!    table, built once and shared by every cell
//! 4. Without a metric hint (an empty hint counts as none), metric identity
//!    is the `measure`/`metric` member of any Measures axis, else the first
//!    Measures axis's first position, else `source.metric` / `source.measure`
//! 5. Each cell's coordinates index into the position tables; a coordinate
//!    count that differs from the axis count is `MalformedResponse`
//! 6. `value` coerces to f64 and `support` to i64; unparsable becomes null
//!
//! Decoding is pure: all caches live for one call.

use serde_json::{Map, Value};

use super::classify::{classify_axis, AxisRole, MEASURES_COLUMN};
use super::errors::{DecodeError, DecodeResult};
use super::record::{RecordBuilder, Scalar, TabularRecord};

/// Decodes a raw cell set response into tabular records.
///
/// `metric_hint` is the metric the query was issued for; when given it
/// takes precedence over anything found in the response.
///
/// # Errors
///
/// - `Response` if the body carries an `error` member
/// - `MalformedResponse` if the body is not an object, `axes`/`cells` are
///   not arrays, or a cell's coordinates do not line up with the axes
pub fn decode(response: &Value, metric_hint: Option<&str>) -> DecodeResult<Vec<TabularRecord>> {
    let body = response
        .as_object()
        .ok_or_else(|| DecodeError::malformed("response is not a JSON object"))?;

    if let Some(error) = body.get("error").filter(|e| !e.is_null()) {
        return Err(DecodeError::from_error_body(error));
    }

    let cells = array_member(body, "cells")?;
    let axes = array_member(body, "axes")?;
    let metric_hint = metric_hint.filter(|m| !m.is_empty());

    if axes.is_empty() {
        let metric = metric_hint
            .map(str::to_string)
            .or_else(|| metric_from_source(body));
        return cells
            .iter()
            .enumerate()
            .map(|(index, cell)| decode_scalar_cell(index, cell, metric.as_deref()))
            .collect();
    }

    let layout = AxisLayout::build(axes);
    let metric = metric_hint
        .map(str::to_string)
        .or_else(|| layout.resolve_metric(axes))
        .or_else(|| metric_from_source(body));

    cells
        .iter()
        .enumerate()
        .map(|(index, cell)| layout.decode_cell(index, cell, metric.as_deref()))
        .collect()
}

/// Looks up an optional array member; absent or null reads as empty.
fn array_member<'a>(body: &'a Map<String, Value>, key: &str) -> DecodeResult<&'a [Value]> {
    match body.get(key) {
        None | Some(Value::Null) => Ok(&[]),
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(DecodeError::malformed(format!("'{}' must be an array", key))),
    }
}

fn decode_scalar_cell(
    index: usize,
    cell: &Value,
    metric: Option<&str>,
) -> DecodeResult<TabularRecord> {
    let cell = cell
        .as_object()
        .ok_or_else(|| DecodeError::malformed(format!("cell {} is not an object", index)))?;

    let mut record = RecordBuilder::with_capacity(2);
    record.set("value", coerce_value(cell.get("value")));
    if let Some(metric) = metric {
        record.set(MEASURES_COLUMN, metric);
    }
    Ok(record.build())
}

/// Per-call axis metadata: role and position labels for every axis.
struct AxisLayout {
    roles: Vec<AxisRole>,
    positions: Vec<Vec<String>>,
    measures_axes: Vec<usize>,
}

impl AxisLayout {
    fn build(axes: &[Value]) -> Self {
        let roles: Vec<AxisRole> = axes
            .iter()
            .enumerate()
            .map(|(ordinal, axis)| classify_axis(ordinal, axis))
            .collect();
        let measures_axes = roles
            .iter()
            .enumerate()
            .filter(|(_, r)| **r == AxisRole::Measures)
            .map(|(i, _)| i)
            .collect();
        let positions = axes.iter().map(position_table).collect();

        Self {
            roles,
            positions,
            measures_axes,
        }
    }

    /// Metric identity from the Measures axes: the first `measure`/`metric`
    /// member on any of them, else the first position label of the first one.
    fn resolve_metric(&self, axes: &[Value]) -> Option<String> {
        let first = *self.measures_axes.first()?;

        self.measures_axes
            .iter()
            .find_map(|&i| {
                ["measure", "metric"]
                    .iter()
                    .find_map(|key| axes[i].get(*key).and_then(non_empty_text))
            })
            .or_else(|| {
                axes[first]
                    .get("positions")
                    .and_then(Value::as_array)
                    .and_then(|positions| positions.first())
                    .and_then(position_label)
            })
    }

    fn decode_cell(
        &self,
        index: usize,
        cell: &Value,
        metric: Option<&str>,
    ) -> DecodeResult<TabularRecord> {
        let cell = cell
            .as_object()
            .ok_or_else(|| DecodeError::malformed(format!("cell {} is not an object", index)))?;

        let coordinates = coordinates(index, cell)?;
        if coordinates.len() != self.roles.len() {
            return Err(DecodeError::malformed(format!(
                "cell {} has {} coordinates but the response has {} axes",
                index,
                coordinates.len(),
                self.roles.len()
            )));
        }

        let mut record = RecordBuilder::with_capacity(self.roles.len() + 3);

        // Without a Measures axis a known metric still gets a column, first.
        if self.measures_axes.is_empty() {
            if let Some(metric) = metric {
                record.set(MEASURES_COLUMN, metric);
            }
        }

        for (axis, &coordinate) in coordinates.iter().enumerate() {
            match &self.roles[axis] {
                AxisRole::Measures => {
                    if let Some(metric) = metric {
                        record.set(MEASURES_COLUMN, metric);
                    }
                }
                AxisRole::Dimension(column) => {
                    let label = self.positions[axis]
                        .get(coordinate)
                        .cloned()
                        .unwrap_or_else(|| format!("Position_{}", coordinate));
                    record.set(column, label);
                }
            }
        }

        record.set("value", coerce_value(cell.get("value")));
        if let Some(support) = cell.get("support") {
            record.set("support", coerce_support(support));
        }

        Ok(record.build())
    }
}

fn coordinates(index: usize, cell: &Map<String, Value>) -> DecodeResult<Vec<usize>> {
    let raw = match cell.get("coordinates") {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(raw)) => raw,
        Some(_) => {
            return Err(DecodeError::malformed(format!(
                "cell {} coordinates must be an array",
                index
            )))
        }
    };

    raw.iter()
        .map(|c| {
            c.as_u64()
                .and_then(|c| usize::try_from(c).ok())
                .ok_or_else(|| {
                    DecodeError::malformed(format!(
                        "cell {} has a coordinate that is not a non-negative integer: {}",
                        index, c
                    ))
                })
        })
        .collect()
}

/// Position labels for one axis, in position order.
fn position_table(axis: &Value) -> Vec<String> {
    axis.get("positions")
        .and_then(Value::as_array)
        .map(|positions| {
            positions
                .iter()
                .enumerate()
                .map(|(ordinal, position)| {
                    position_label(position).unwrap_or_else(|| format!("Position_{}", ordinal))
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Label of a position: last `path` element, a non-list `path` as text,
/// or the first member's `name`/`memberId`.
fn position_label(position: &Value) -> Option<String> {
    match position.get("path") {
        Some(Value::Array(path)) => {
            if let Some(last) = path.last() {
                return Some(text(last));
            }
        }
        None | Some(Value::Null) => {}
        Some(other) => return Some(text(other)),
    }

    let member = position.get("members")?.as_array()?.first()?;
    ["name", "memberId"]
        .iter()
        .find_map(|key| member.get(*key).and_then(non_empty_text))
}

fn metric_from_source(body: &Map<String, Value>) -> Option<String> {
    let source = body.get("source")?;
    ["metric", "measure"]
        .iter()
        .find_map(|key| source.get(*key).and_then(non_empty_text))
}

fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn non_empty_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        other => Some(text(other)),
    }
}

/// `value` as f64; null, empty or unparsable reads as null.
fn coerce_value(value: Option<&Value>) -> Scalar {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) if !s.trim().is_empty() => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.into()
}

/// `support` as i64; null, empty or unparsable reads as null.
fn coerce_support(support: &Value) -> Scalar {
    let parsed = match support {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) if !s.trim().is_empty() => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    parsed.into()
}

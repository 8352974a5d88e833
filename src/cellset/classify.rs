//! Axis role classification
//!
//! Responses do not state which axis carries metric identity. The only
//! signals available are a `measure`/`metric` key on the axis, or the
//! word "measures" somewhere in the axis. The second check is loose and
//! will also fire on a dimension whose name contains "measures"; that
//! behavior is kept as is. Replace `is_measures_axis` alone once responses
//! expose an explicit role.

use serde_json::Value;

/// Role of a response axis
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AxisRole {
    /// Carries metric identity
    Measures,
    /// Carries a grouping value; the column name to use
    Dimension(String),
}

pub const MEASURES_COLUMN: &str = "Measures";

/// True when the axis should be treated as the Measures axis.
pub fn is_measures_axis(axis: &Value) -> bool {
    if axis.get("measure").is_some() || axis.get("metric").is_some() {
        return true;
    }
    axis.to_string().to_lowercase().contains("measures")
}

/// Classifies the axis at `ordinal`.
pub fn classify_axis(ordinal: usize, axis: &Value) -> AxisRole {
    if is_measures_axis(axis) {
        return AxisRole::Measures;
    }

    let name = axis
        .get("dimension")
        .and_then(|d| d.get("name"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("Dimension_{}", ordinal));
    AxisRole::Dimension(name)
}

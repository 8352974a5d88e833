//! Typed aggregate query payload
//!
//! These types serialize to exactly the JSON shape the aggregate endpoint
//! accepts. Axis and filter variants are externally tagged, so
//! `AxisSpec::Formula(..)` becomes `{"formula": ...}` on the wire.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::kinds::{AxisKind, FilterKind};

/// Reference to a dimension, optionally scoped to an analytic object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionRef {
    pub name: String,
    #[serde(
        rename = "qualifyingPath",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub qualifying_path: Option<String>,
}

impl DimensionRef {
    pub fn new(name: impl Into<String>, qualifying_path: Option<&str>) -> Self {
        Self {
            name: name.into(),
            qualifying_path: qualifying_path.map(str::to_string),
        }
    }
}

/// Reference to a numeric property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyRef {
    pub name: String,
    #[serde(
        rename = "qualifyingPath",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub qualifying_path: Option<String>,
}

/// Group by one or more levels of a dimension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionLevelSelection {
    pub dimension: DimensionRef,
    #[serde(rename = "levelIds")]
    pub level_ids: Vec<String>,
}

/// Bucket a numeric property into ranges
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericRanges {
    pub property: PropertyRef,
    /// Space-separated range boundaries, e.g. `"0 10 20 30"`
    pub ranges: String,
}

/// One axis of an aggregate query
///
/// Only the two commonly built kinds are typed; the remaining kinds are
/// carried as opaque JSON bodies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AxisSpec {
    DimensionLevelSelection(DimensionLevelSelection),
    NumericRanges(NumericRanges),
    SelectionConcept(Value),
    DimensionMemberSelection(Value),
    MemberMapSelection(Value),
    Formula(Value),
    DimensionLeafMemberSelection(Value),
    DimensionDataMemberSelection(Value),
    DimensionLevelWithUncategorizedValueSelection(Value),
}

impl AxisSpec {
    /// Returns the variant kind
    pub fn kind(&self) -> AxisKind {
        match self {
            AxisSpec::DimensionLevelSelection(_) => AxisKind::DimensionLevelSelection,
            AxisSpec::NumericRanges(_) => AxisKind::NumericRanges,
            AxisSpec::SelectionConcept(_) => AxisKind::SelectionConcept,
            AxisSpec::DimensionMemberSelection(_) => AxisKind::DimensionMemberSelection,
            AxisSpec::MemberMapSelection(_) => AxisKind::MemberMapSelection,
            AxisSpec::Formula(_) => AxisKind::Formula,
            AxisSpec::DimensionLeafMemberSelection(_) => AxisKind::DimensionLeafMemberSelection,
            AxisSpec::DimensionDataMemberSelection(_) => AxisKind::DimensionDataMemberSelection,
            AxisSpec::DimensionLevelWithUncategorizedValueSelection(_) => {
                AxisKind::DimensionLevelWithUncategorizedValueSelection
            }
        }
    }
}

/// A member addressed by its hierarchy path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberPath {
    pub path: Vec<String>,
}

/// Included and excluded members of a member-set filter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemberValues {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub included: Vec<MemberPath>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub excluded: Vec<MemberPath>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberSetFilter {
    pub dimension: DimensionRef,
    pub values: MemberValues,
}

/// Named selection concept, e.g. `isManager`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionConceptRef {
    pub name: String,
    #[serde(
        rename = "qualifyingPath",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub qualifying_path: Option<String>,
}

/// One filter of an aggregate query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterSpec {
    MemberSet(MemberSetFilter),
    SelectionConcept(SelectionConceptRef),
}

impl FilterSpec {
    pub fn kind(&self) -> FilterKind {
        match self {
            FilterSpec::MemberSet(_) => FilterKind::MemberSet,
            FilterSpec::SelectionConcept(_) => FilterKind::SelectionConcept,
        }
    }
}

/// Time window of an aggregate query
///
/// Either `fromDateTime` or `dynamicDateFrom` anchors the window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeIntervals {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_date_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dynamic_date_from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_period_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_period_count: Option<u32>,
    /// `BACKWARD` or `FORWARD` from the anchor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
}

impl TimeIntervals {
    /// Window anchored at a fixed start date
    pub fn from_date(from: impl Into<String>, period_type: impl Into<String>, count: u32) -> Self {
        Self {
            from_date_time: Some(from.into()),
            interval_period_type: Some(period_type.into()),
            interval_count: Some(count),
            ..Default::default()
        }
    }

    /// Window anchored dynamically, e.g. at `SOURCE`
    pub fn dynamic(anchor: impl Into<String>, period_type: impl Into<String>, count: u32) -> Self {
        Self {
            dynamic_date_from: Some(anchor.into()),
            interval_period_type: Some(period_type.into()),
            interval_count: Some(count),
            ..Default::default()
        }
    }
}

/// One column of a multi-metric source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricColumn {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
}

impl MetricColumn {
    pub fn metric(id: impl Into<String>) -> Self {
        Self {
            column_name: None,
            metric: Some(id.into()),
            formula: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricColumns {
    pub columns: Vec<MetricColumn>,
}

/// Source of an aggregate query: one metric or a list of metric columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuerySource {
    Metric { metric: String },
    Metrics { metrics: MetricColumns },
}

impl QuerySource {
    /// Returns the single metric id, if this is a single-metric source
    pub fn metric_id(&self) -> Option<&str> {
        match self {
            QuerySource::Metric { metric } => Some(metric),
            QuerySource::Metrics { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateQuery {
    pub source: QuerySource,
    pub axes: Vec<AxisSpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<FilterSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_intervals: Option<TimeIntervals>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter_values: Option<Vec<Value>>,
}

/// Complete request body for the aggregate endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryPayload {
    pub query: AggregateQuery,
    /// Pass-through flags such as `zeroVisibility` or `calendarType`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Map<String, Value>>,
}

impl QueryPayload {
    /// Converts the payload to raw JSON for validation or dispatch
    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}

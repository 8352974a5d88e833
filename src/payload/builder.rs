//! Convenience constructors for common payload shapes
//!
//! Everything built here passes `PayloadValidator`: defaults fill in level
//! ids and a query cannot be built without an axis.

use serde_json::{Map, Value};

use crate::axis::{
    AggregateQuery, AxisSpec, DimensionLevelSelection, DimensionRef, FilterSpec, MemberPath,
    MemberSetFilter, MemberValues, MetricColumn, MetricColumns, QueryPayload, QuerySource,
    SelectionConceptRef, TimeIntervals,
};

use super::errors::{PayloadError, PayloadResult};

/// Analytic object most dimensions and concepts are scoped to
pub const DEFAULT_QUALIFYING_PATH: &str = "Employee";

pub const DEFAULT_TIME_DIMENSION: &str = "Time";
pub const DEFAULT_TIME_LEVEL: &str = "FISCAL_YEAR";

/// Builds a dimension-level axis.
///
/// Without explicit level ids (or with an empty list) the dimension name
/// itself is used as the single level id, which is what regular
/// dimensions expect. Parent-child hierarchies need real level ids.
pub fn dimension_axis(
    dimension: &str,
    qualifying_path: Option<&str>,
    level_ids: Option<Vec<String>>,
) -> AxisSpec {
    let level_ids = match level_ids {
        Some(ids) if !ids.is_empty() => ids,
        _ => vec![dimension.to_string()],
    };
    AxisSpec::DimensionLevelSelection(DimensionLevelSelection {
        dimension: DimensionRef::new(dimension, qualifying_path),
        level_ids,
    })
}

/// Builds a time axis for per-period breakdowns (e.g. one row per fiscal year).
///
/// Time dimensions are usually not scoped, so no qualifying path is set.
pub fn time_axis(dimension: Option<&str>, level_id: Option<&str>) -> AxisSpec {
    let dimension = dimension.unwrap_or(DEFAULT_TIME_DIMENSION);
    let level_id = level_id.unwrap_or(DEFAULT_TIME_LEVEL);
    dimension_axis(dimension, None, Some(vec![level_id.to_string()]))
}

/// Builds a member-set filter over one dimension.
///
/// Each member becomes a single-element path. Empty lists are omitted
/// from the wire form.
pub fn member_set_filter(
    dimension: &str,
    included: &[&str],
    excluded: &[&str],
    qualifying_path: Option<&str>,
) -> FilterSpec {
    let to_paths = |members: &[&str]| {
        members
            .iter()
            .map(|m| MemberPath {
                path: vec![m.to_string()],
            })
            .collect::<Vec<_>>()
    };
    FilterSpec::MemberSet(MemberSetFilter {
        dimension: DimensionRef::new(dimension, qualifying_path),
        values: MemberValues {
            included: to_paths(included),
            excluded: to_paths(excluded),
        },
    })
}

/// Builds a selection-concept filter such as `isManager`.
pub fn selection_concept_filter(concept: &str, qualifying_path: Option<&str>) -> FilterSpec {
    FilterSpec::SelectionConcept(SelectionConceptRef {
        name: concept.to_string(),
        qualifying_path: qualifying_path.map(str::to_string),
    })
}

/// Fluent builder for a complete `QueryPayload`.
///
/// ```ignore
/// let payload = QueryBuilder::new("employeeCount")
///     .axis(dimension_axis("Function", Some(DEFAULT_QUALIFYING_PATH), None))
///     .filter(selection_concept_filter("isManager", Some(DEFAULT_QUALIFYING_PATH)))
///     .option("zeroVisibility", "ELIMINATE")
///     .build()?;
/// ```
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    source: QuerySource,
    axes: Vec<AxisSpec>,
    filters: Vec<FilterSpec>,
    time_intervals: Option<TimeIntervals>,
    parameter_values: Vec<Value>,
    options: Map<String, Value>,
}

impl QueryBuilder {
    /// Starts a single-metric query
    pub fn new(metric: impl Into<String>) -> Self {
        Self::with_source(QuerySource::Metric {
            metric: metric.into(),
        })
    }

    /// Starts a multi-metric query
    pub fn with_metrics(columns: Vec<MetricColumn>) -> Self {
        Self::with_source(QuerySource::Metrics {
            metrics: MetricColumns { columns },
        })
    }

    fn with_source(source: QuerySource) -> Self {
        Self {
            source,
            axes: Vec::new(),
            filters: Vec::new(),
            time_intervals: None,
            parameter_values: Vec::new(),
            options: Map::new(),
        }
    }

    pub fn axis(mut self, axis: AxisSpec) -> Self {
        self.axes.push(axis);
        self
    }

    pub fn filter(mut self, filter: FilterSpec) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn time_intervals(mut self, time_intervals: TimeIntervals) -> Self {
        self.time_intervals = Some(time_intervals);
        self
    }

    pub fn parameter_value(mut self, value: Value) -> Self {
        self.parameter_values.push(value);
        self
    }

    /// Sets a pass-through option, e.g. `("nullVisibility", "ELIMINATE")`
    pub fn option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Finishes the payload.
    ///
    /// # Errors
    ///
    /// - `NoAxes` if no axis was added
    /// - `NoMetricColumns` for a multi-metric source without columns
    pub fn build(self) -> PayloadResult<QueryPayload> {
        if self.axes.is_empty() {
            return Err(PayloadError::NoAxes);
        }
        if let QuerySource::Metrics { metrics } = &self.source {
            if metrics.columns.is_empty() {
                return Err(PayloadError::NoMetricColumns);
            }
        }

        Ok(QueryPayload {
            query: AggregateQuery {
                source: self.source,
                axes: self.axes,
                filters: self.filters,
                time_intervals: self.time_intervals,
                parameter_values: if self.parameter_values.is_empty() {
                    None
                } else {
                    Some(self.parameter_values)
                },
            },
            options: if self.options.is_empty() {
                None
            } else {
                Some(self.options)
            },
        })
    }
}

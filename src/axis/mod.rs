//! Axis Descriptor Model
//!
//! Typed representation of the aggregate query payload: axis and filter
//! variants, time window, metric source.
//!
//! Variant detection on raw JSON lives in `kinds`; the payload validator
//! uses it so unknown tags are reported instead of silently accepted.

mod kinds;
mod types;

pub use kinds::{AxisKind, Detected, FilterKind};
pub use types::{
    AggregateQuery, AxisSpec, DimensionLevelSelection, DimensionRef, FilterSpec, MemberPath,
    MemberSetFilter, MemberValues, MetricColumn, MetricColumns, NumericRanges, PropertyRef,
    QueryPayload, QuerySource, SelectionConceptRef, TimeIntervals,
};

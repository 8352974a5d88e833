//! Variant tags for axes and filters
//!
//! An axis object on the wire carries exactly one variant tag key, e.g.
//! `{"dimensionLevelSelection": {...}}`. Detection looks only at tag keys;
//! auxiliary keys such as `tableAxisOptions` do not take part.

use std::fmt;

use serde_json::{Map, Value};

/// Known axis variant tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisKind {
    DimensionLevelSelection,
    NumericRanges,
    SelectionConcept,
    DimensionMemberSelection,
    MemberMapSelection,
    Formula,
    DimensionLeafMemberSelection,
    DimensionDataMemberSelection,
    DimensionLevelWithUncategorizedValueSelection,
}

impl AxisKind {
    /// All kinds, in wire documentation order
    pub const ALL: [AxisKind; 9] = [
        AxisKind::DimensionLevelSelection,
        AxisKind::NumericRanges,
        AxisKind::SelectionConcept,
        AxisKind::DimensionMemberSelection,
        AxisKind::MemberMapSelection,
        AxisKind::Formula,
        AxisKind::DimensionLeafMemberSelection,
        AxisKind::DimensionDataMemberSelection,
        AxisKind::DimensionLevelWithUncategorizedValueSelection,
    ];

    /// Returns the wire tag
    pub fn tag(&self) -> &'static str {
        match self {
            AxisKind::DimensionLevelSelection => "dimensionLevelSelection",
            AxisKind::NumericRanges => "numericRanges",
            AxisKind::SelectionConcept => "selectionConcept",
            AxisKind::DimensionMemberSelection => "dimensionMemberSelection",
            AxisKind::MemberMapSelection => "memberMapSelection",
            AxisKind::Formula => "formula",
            AxisKind::DimensionLeafMemberSelection => "dimensionLeafMemberSelection",
            AxisKind::DimensionDataMemberSelection => "dimensionDataMemberSelection",
            AxisKind::DimensionLevelWithUncategorizedValueSelection => {
                "dimensionLevelWithUncategorizedValueSelection"
            }
        }
    }

    /// Looks up a kind by wire tag
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.tag() == tag)
    }

    /// Comma-separated list of every known tag, for error messages
    pub fn expected_tags() -> String {
        Self::ALL
            .iter()
            .map(|k| k.tag())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Detects which variant tags an axis object carries
    pub fn detect(obj: &Map<String, Value>) -> Detected<AxisKind> {
        Detected::from_kinds(
            Self::ALL
                .iter()
                .copied()
                .filter(|k| has_tag(obj, k.tag()))
                .collect(),
        )
    }
}

impl fmt::Display for AxisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Known filter variant tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    MemberSet,
    SelectionConcept,
}

impl FilterKind {
    pub const ALL: [FilterKind; 2] = [FilterKind::MemberSet, FilterKind::SelectionConcept];

    /// Returns the wire tag
    pub fn tag(&self) -> &'static str {
        match self {
            FilterKind::MemberSet => "memberSet",
            FilterKind::SelectionConcept => "selectionConcept",
        }
    }

    /// Detects which variant tags a filter object carries
    pub fn detect(obj: &Map<String, Value>) -> Detected<FilterKind> {
        Detected::from_kinds(
            Self::ALL
                .iter()
                .copied()
                .filter(|k| has_tag(obj, k.tag()))
                .collect(),
        )
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// A tag mapped to `null` counts as absent
fn has_tag(obj: &Map<String, Value>, tag: &str) -> bool {
    obj.get(tag).is_some_and(|v| !v.is_null())
}

/// Outcome of variant-tag detection on a single object
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detected<K> {
    /// No known tag present
    Unrecognized,
    /// Exactly one known tag present
    One(K),
    /// More than one known tag present
    Many(Vec<K>),
}

impl<K> Detected<K> {
    fn from_kinds(mut kinds: Vec<K>) -> Self {
        match kinds.len() {
            0 => Detected::Unrecognized,
            1 => Detected::One(kinds.remove(0)),
            _ => Detected::Many(kinds),
        }
    }
}

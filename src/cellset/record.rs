//! Flat tabular records produced by the decoder

use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// A single cell value in a record
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Text(String),
    Number(f64),
    Integer(i64),
    Null,
}

impl Scalar {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Number(n) => Some(*n),
            Scalar::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Scalar::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Text(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Text(s)
    }
}

impl From<Option<f64>> for Scalar {
    fn from(v: Option<f64>) -> Self {
        v.map_or(Scalar::Null, Scalar::Number)
    }
}

impl From<Option<i64>> for Scalar {
    fn from(v: Option<i64>) -> Self {
        v.map_or(Scalar::Null, Scalar::Integer)
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Text(s) => write!(f, "{}", s),
            Scalar::Number(n) => write!(f, "{}", n),
            Scalar::Integer(i) => write!(f, "{}", i),
            Scalar::Null => Ok(()),
        }
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Scalar::Text(s) => serializer.serialize_str(s),
            Scalar::Number(n) => serializer.serialize_f64(*n),
            Scalar::Integer(i) => serializer.serialize_i64(*i),
            Scalar::Null => serializer.serialize_none(),
        }
    }
}

/// One materialized cell: ordered column name → scalar.
///
/// Records are immutable; the transforming methods consume the record
/// and return a new one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TabularRecord {
    columns: Vec<(String, Scalar)>,
}

impl TabularRecord {
    /// Looks up a column by name
    pub fn get(&self, name: &str) -> Option<&Scalar> {
        self.columns
            .iter()
            .find(|(column, _)| column == name)
            .map(|(_, value)| value)
    }

    /// Column names in order
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(column, _)| column.as_str())
    }

    /// (column, value) pairs in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Scalar)> {
        self.columns.iter().map(|(column, value)| (column.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Returns a record with `name` as its first column.
    ///
    /// An existing column of the same name is moved, not duplicated.
    pub fn with_leading(mut self, name: &str, value: impl Into<Scalar>) -> Self {
        self.columns.retain(|(column, _)| column != name);
        self.columns.insert(0, (name.to_string(), value.into()));
        self
    }

    /// Returns a record with the named column rewritten; absent columns are left alone.
    pub fn map_column(mut self, name: &str, f: impl FnOnce(&Scalar) -> Scalar) -> Self {
        if let Some((_, value)) = self.columns.iter_mut().find(|(column, _)| column == name) {
            *value = f(value);
        }
        self
    }
}

impl Serialize for TabularRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (column, value) in &self.columns {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

/// Assembles a record column by column.
///
/// Setting an existing column overwrites it in place.
#[derive(Debug, Default)]
pub(crate) struct RecordBuilder {
    columns: Vec<(String, Scalar)>,
}

impl RecordBuilder {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            columns: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn set(&mut self, name: &str, value: impl Into<Scalar>) {
        let value = value.into();
        match self.columns.iter_mut().find(|(column, _)| column == name) {
            Some((_, slot)) => *slot = value,
            None => self.columns.push((name.to_string(), value)),
        }
    }

    pub(crate) fn build(self) -> TabularRecord {
        TabularRecord {
            columns: self.columns,
        }
    }
}

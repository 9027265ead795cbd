use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use thiserror::Error;

// ---------------------------------------------------------------------------
// FeatureValue – a single numeric cell
// ---------------------------------------------------------------------------

/// A numeric feature value. Integer and float cells are kept distinct so that
/// alignment copies them verbatim; they only become `f64` inside a scorer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeatureValue {
    Integer(i64),
    Float(f64),
}

impl FeatureValue {
    /// The fill value used for columns a record does not carry.
    pub const ZERO: FeatureValue = FeatureValue::Integer(0);

    pub fn as_f64(&self) -> f64 {
        match self {
            FeatureValue::Integer(i) => *i as f64,
            FeatureValue::Float(v) => *v,
        }
    }
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureValue::Integer(i) => write!(f, "{i}"),
            FeatureValue::Float(v) => write!(f, "{v:.4}"),
        }
    }
}

impl From<i64> for FeatureValue {
    fn from(value: i64) -> Self {
        FeatureValue::Integer(value)
    }
}

impl From<f64> for FeatureValue {
    fn from(value: f64) -> Self {
        FeatureValue::Float(value)
    }
}

// ---------------------------------------------------------------------------
// RawInputRecord – what the form produces
// ---------------------------------------------------------------------------

/// Free-form input row: feature name → value. Built once per submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawInputRecord {
    values: BTreeMap<String, FeatureValue>,
}

impl RawInputRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FeatureValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FeatureValue>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<FeatureValue> {
        self.values.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<FeatureValue>> FromIterator<(K, V)> for RawInputRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = RawInputRecord::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

// ---------------------------------------------------------------------------
// FeatureSchema – a model's training-time columns
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq)]
pub enum SchemaError {
    #[error("feature schema is empty")]
    Empty,
    #[error("feature schema lists '{0}' more than once")]
    Duplicate(String),
    #[error("feature schema contains a blank name at position {0}")]
    BlankName(usize),
}

/// Ordered, non-empty list of unique feature names a model was trained on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSchema {
    names: Vec<String>,
}

impl FeatureSchema {
    pub fn new<I, S>(names: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Err(SchemaError::Empty);
        }
        let mut seen = BTreeSet::new();
        for (i, name) in names.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(SchemaError::BlankName(i));
            }
            if !seen.insert(name.as_str()) {
                return Err(SchemaError::Duplicate(name.clone()));
            }
        }
        Ok(Self { names })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }
}

// ---------------------------------------------------------------------------
// AlignedRecord – a record shaped exactly like one schema
// ---------------------------------------------------------------------------

/// One row whose columns are exactly a [`FeatureSchema`], in schema order.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedRecord {
    pub(crate) columns: Vec<(String, FeatureValue)>,
}

impl AlignedRecord {
    pub fn columns(&self) -> &[(String, FeatureValue)] {
        &self.columns
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(n, _)| n.as_str())
    }

    pub fn get(&self, name: &str) -> Option<FeatureValue> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Dense `f64` row in column order, as a scorer consumes it.
    pub fn to_row(&self) -> Vec<f64> {
        self.columns.iter().map(|(_, v)| v.as_f64()).collect()
    }

    /// View this record as free-form input again (used to re-align).
    pub fn to_raw(&self) -> RawInputRecord {
        self.columns.iter().map(|(n, v)| (n.clone(), *v)).collect()
    }
}

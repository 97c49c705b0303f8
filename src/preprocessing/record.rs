//! Raw form records
//!
//! A raw record is what the data-entry form submits: field name to a plain
//! number. Integer codes and floats are kept apart because indicator
//! column names depend on how the value is written.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single raw field value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Integer(i64),
    Float(f64),
}

impl RawValue {
    /// Numeric value fed to the classifier
    pub fn as_f64(&self) -> f64 {
        match self {
            RawValue::Integer(v) => *v as f64,
            RawValue::Float(v) => *v,
        }
    }

    /// Suffix used in `<field>_<value>` indicator column names
    ///
    /// Integers print bare; floats always keep a fractional part, so a
    /// float code `1.0` maps to `_1.0` the way the training data named it.
    pub fn indicator_suffix(&self) -> String {
        match self {
            RawValue::Integer(v) => v.to_string(),
            RawValue::Float(v) if v.fract() == 0.0 && v.is_finite() => format!("{:.1}", v),
            RawValue::Float(v) => v.to_string(),
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.indicator_suffix())
    }
}

impl From<i32> for RawValue {
    fn from(v: i32) -> Self {
        RawValue::Integer(v as i64)
    }
}

impl From<i64> for RawValue {
    fn from(v: i64) -> Self {
        RawValue::Integer(v)
    }
}

impl From<f64> for RawValue {
    fn from(v: f64) -> Self {
        RawValue::Float(v)
    }
}

/// Field name to raw value, as entered
///
/// Ordered by field name so serialized records are stable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord {
    fields: BTreeMap<String, RawValue>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field, replacing any previous value
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<RawValue>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Builder-style insert
    pub fn with(mut self, field: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn get(&self, field: &str) -> Option<RawValue> {
        self.fields.get(field).copied()
    }

    pub fn get_f64(&self, field: &str) -> Option<f64> {
        self.get(field).map(|v| v.as_f64())
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, RawValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<RawValue>> FromIterator<(K, V)> for RawRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = RawRecord::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

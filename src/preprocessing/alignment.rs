//! Feature alignment
//!
//! Turns a raw record into the exact vector the classifier was trained on:
//!
//! 1. every categorical field becomes a single `<field>_<value>` indicator
//!    set to 1, and the field itself is removed
//! 2. numeric fields pass through untouched
//! 3. schema columns the record did not produce are 0
//! 4. produced columns the schema does not know are dropped
//! 5. the result follows schema order
//!
//! Unknown category values therefore degrade to "no indicator set" instead
//! of failing, and missing numeric fields degrade to 0. There is no error
//! path.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use super::record::RawRecord;
use super::schema::{EncodedFeatureVector, FeatureSchema};

/// What alignment had to fix up on the way
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AlignmentReport {
    /// Produced columns absent from the schema, sorted
    pub dropped: Vec<String>,
    /// The categorical indicators among `dropped`
    pub unknown_categories: Vec<String>,
    /// Number of schema columns zero-filled
    pub zero_filled: usize,
}

/// Name of the indicator column for a categorical value
pub fn indicator_column(field: &str, value: &super::RawValue) -> String {
    format!("{}_{}", field, value.indicator_suffix())
}

/// Aligns a raw record to the feature schema
pub fn align<S: AsRef<str>>(
    record: &RawRecord,
    categorical: &[S],
    schema: &FeatureSchema,
) -> EncodedFeatureVector {
    align_with_report(record, categorical, schema).0
}

/// Aligns a raw record and reports dropped and zero-filled columns
pub fn align_with_report<S: AsRef<str>>(
    record: &RawRecord,
    categorical: &[S],
    schema: &FeatureSchema,
) -> (EncodedFeatureVector, AlignmentReport) {
    let mut working: HashMap<String, f64> = HashMap::with_capacity(record.len());
    let mut indicators: HashSet<String> = HashSet::new();

    for (field, value) in record.iter() {
        if categorical.iter().any(|c| c.as_ref() == field) {
            let column = indicator_column(field, &value);
            indicators.insert(column.clone());
            working.insert(column, 1.0);
        } else {
            working.insert(field.to_string(), value.as_f64());
        }
    }

    let mut zero_filled = 0;
    let values: Vec<f64> = schema
        .columns()
        .iter()
        .map(|column| match working.remove(column) {
            Some(value) => value,
            None => {
                zero_filled += 1;
                0.0
            }
        })
        .collect();

    let mut dropped: Vec<String> = working.into_keys().collect();
    dropped.sort();
    let unknown_categories = dropped
        .iter()
        .filter(|column| indicators.contains(column.as_str()))
        .cloned()
        .collect();

    (
        EncodedFeatureVector::new(schema.shared_columns(), values),
        AlignmentReport {
            dropped,
            unknown_categories,
            zero_filled,
        },
    )
}

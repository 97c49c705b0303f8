//! # Feature Mapping Catalog
//!
//! Static reference data for the student record: field names, the list of
//! categorical fields, code labels, form presets and form bounds.
//!
//! Nothing here is mutable or configurable at runtime.

pub mod fields;
pub mod mappings;
pub mod presets;

pub use fields::{CATEGORICAL_FIELDS, ORIGINAL_COLUMNS};
pub use mappings::{label, FieldOptions};
pub use presets::{Preset, PresetDefaults, SemesterDefaults};

//! # Preprocessing
//!
//! Raw form records, the feature schema, and the alignment step that maps
//! one onto the other.
//!
//! ## Invariants
//! - An encoded vector always has the schema's length and column order
//! - Schema columns the record cannot produce are exactly 0
//! - Columns the schema does not know never reach the classifier
//! - Alignment is pure: same record, same schema, same vector

pub mod alignment;
pub mod errors;
pub mod record;
pub mod schema;

pub use alignment::{align, align_with_report, indicator_column, AlignmentReport};
pub use errors::{PreprocessingError, PreprocessingResult};
pub use record::{RawRecord, RawValue};
pub use schema::{EncodedFeatureVector, FeatureSchema};

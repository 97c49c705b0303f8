//! # Export
//!
//! JSON download of the last prediction made in a session.

mod errors;
mod report;

pub use errors::{ExportError, ExportResult};
pub use report::{file_name, ExportReport};

//! scholaris - student enrollment outcome prediction service
//!
//! Predicts whether a student will drop out, stay enrolled or graduate
//! from their enrollment record, behind an authenticated HTTP API.
//!
//! - `catalog`: field names, coded value labels and sample profiles
//! - `preprocessing`: one-hot encoding and alignment to the model schema
//! - `validation`: advisory checks on raw records
//! - `model`: artifact loading, random forest and assessment
//! - `auth`: accounts, roles and sessions
//! - `export`: downloadable prediction reports
//! - `http_server` / `cli`: the outer surfaces

pub mod auth;
pub mod catalog;
pub mod cli;
pub mod export;
pub mod http_server;
pub mod model;
pub mod observability;
pub mod preprocessing;
pub mod validation;

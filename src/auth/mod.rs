//! # Auth Module
//!
//! Authentication gate for the prediction service: username/password
//! login against a JSON account store, bearer-token sessions with an idle
//! timeout, and a three-level role hierarchy.

pub mod accounts;
pub mod api;
pub mod crypto;
pub mod errors;
pub mod role;
pub mod session;

pub use accounts::{AccountStore, AccountSummary, FileAccountStore, InMemoryAccountStore, UserAccount};
pub use api::{AuthService, LoginRequest, LoginResponse, NewAccountRequest};
pub use crypto::PasswordPolicy;
pub use errors::{AuthError, AuthResult};
pub use role::Role;
pub use session::{LastPrediction, Session, SessionConfig, SessionInfo, SessionManager, SessionState};

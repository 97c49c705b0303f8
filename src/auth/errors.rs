//! # Auth Errors
//!
//! Error types for the authentication gate and the account store.

use thiserror::Error;

/// Result type for auth operations
pub type AuthResult<T> = Result<T, AuthError>;

/// Authentication and authorization errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    // ==================
    // Authentication Errors
    // ==================

    /// Unknown username or wrong password; the two are never distinguished
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// No session attached to the request
    #[error("Authentication required")]
    AuthenticationRequired,

    /// Session idled past the timeout and was logged out
    #[error("Session expired")]
    SessionExpired,

    // ==================
    // Authorization Errors
    // ==================

    /// Session role is below the one required
    #[error("Not authorized to perform this action")]
    Unauthorized,

    /// An admin tried to delete their own account
    #[error("Cannot delete your own account")]
    CannotDeleteSelf,

    // ==================
    // Account Errors
    // ==================

    /// Username already present in the store
    #[error("Username already exists")]
    UsernameTaken,

    /// Username not present in the store
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// Username has the wrong length or characters
    #[error("Invalid username: {0}")]
    InvalidUsername(String),

    /// Some other account field is unusable
    #[error("Invalid account: {0}")]
    InvalidAccount(String),

    /// Password does not meet the policy
    #[error("Password does not meet requirements: {0}")]
    WeakPassword(String),

    // ==================
    // Internal Errors
    // ==================

    #[error("Internal error: password hashing failed")]
    HashingFailed,

    /// Account store could not be read or written
    #[error("Storage error: {0}")]
    StorageError(String),
}

impl AuthError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request
            AuthError::InvalidUsername(_) => 400,
            AuthError::InvalidAccount(_) => 400,
            AuthError::WeakPassword(_) => 400,
            AuthError::CannotDeleteSelf => 400,

            // 401 Unauthorized
            AuthError::InvalidCredentials => 401,
            AuthError::AuthenticationRequired => 401,
            AuthError::SessionExpired => 401,

            // 403 Forbidden
            AuthError::Unauthorized => 403,

            // 404 Not Found
            AuthError::AccountNotFound(_) => 404,

            // 409 Conflict
            AuthError::UsernameTaken => 409,

            // 500 Internal Server Error
            AuthError::HashingFailed => 500,
            AuthError::StorageError(_) => 500,
        }
    }

    /// Returns whether this error should be logged at warn level
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}

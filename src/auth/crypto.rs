//! # Cryptographic Utilities
//!
//! Password digests and bearer tokens.
//!
//! Two digest formats are accepted when verifying:
//! - Argon2id PHC strings (`$argon2id$...`), written for every new account
//! - bare 64-character SHA-256 hex, as found in older account files
//!
//! Secrets are always compared in constant time.

use std::fmt::Write as _;
use std::sync::OnceLock;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::RngCore;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use super::errors::{AuthError, AuthResult};

/// Password requirements
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    pub min_length: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self { min_length: 8 }
    }
}

impl PasswordPolicy {
    pub fn with_min_length(min_length: usize) -> Self {
        Self { min_length }
    }

    /// Checks a candidate password
    pub fn validate(&self, password: &str) -> AuthResult<()> {
        if password.chars().count() < self.min_length {
            return Err(AuthError::WeakPassword(format!(
                "Password must be at least {} characters",
                self.min_length
            )));
        }

        Ok(())
    }
}

/// Hashes a password with Argon2id and a fresh salt
pub fn hash_password(password: &str) -> AuthResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::HashingFailed)
}

/// Unsalted SHA-256 hex digest of a password
///
/// Only used to seed the default account in the legacy format and to
/// verify legacy digests.
pub fn legacy_digest(password: &str) -> String {
    let digest = Sha256::digest(password.as_bytes());
    let mut hex = String::with_capacity(64);
    for byte in digest {
        let _ = write!(hex, "{:02x}", byte);
    }
    hex
}

fn is_legacy_digest(stored: &str) -> bool {
    stored.len() == 64 && stored.chars().all(|c| c.is_ascii_hexdigit())
}

/// Verifies a password against a stored digest of either format
pub fn verify_password(password: &str, stored: &str) -> AuthResult<bool> {
    if is_legacy_digest(stored) {
        let computed = legacy_digest(password);
        return Ok(constant_time_str_eq(&computed, &stored.to_ascii_lowercase()));
    }

    let parsed = PasswordHash::new(stored).map_err(|_| AuthError::InvalidCredentials)?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

static DUMMY_HASH: OnceLock<String> = OnceLock::new();

/// Argon2id digest no account uses, verified against when there is no
/// Argon2 work to do otherwise
fn dummy_hash() -> &'static str {
    DUMMY_HASH.get_or_init(|| hash_password("scholaris-no-such-account").unwrap_or_default())
}

/// Checks a login attempt in roughly constant time
///
/// Unknown accounts and legacy digests still pay for one Argon2
/// verification, so response time does not reveal which usernames exist.
pub fn verify_login(password: &str, stored: Option<&str>) -> bool {
    let argon2_digest = stored.is_some_and(|s| !is_legacy_digest(s));
    if !argon2_digest {
        let _ = verify_password(password, dummy_hash());
    }

    stored
        .map(|s| verify_password(password, s).unwrap_or(false))
        .unwrap_or(false)
}

/// 256 random bits, URL-safe base64
pub fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    base64::Engine::encode(&base64::engine::general_purpose::URL_SAFE_NO_PAD, bytes)
}

/// Digest a bearer token is stored under
///
/// The raw token only ever lives on the client.
pub fn hash_token(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    base64::Engine::encode(&base64::engine::general_purpose::URL_SAFE_NO_PAD, digest)
}

pub fn constant_time_str_eq(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

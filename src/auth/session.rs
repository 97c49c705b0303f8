//! # Session Management
//!
//! A client is either Anonymous or Authenticated with a role. Sessions are
//! created on login, destroyed on logout, and expire after a stretch of
//! inactivity. Each authenticated request counts as activity.
//!
//! Sessions are keyed by the SHA-256 of their bearer token; the raw token
//! is handed out once and never stored.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::model::PredictionResult;
use crate::observability::{log_event_with_fields, Event};
use crate::preprocessing::RawRecord;

use super::accounts::UserAccount;
use super::crypto::{generate_token, hash_token};
use super::errors::{AuthError, AuthResult};
use super::role::Role;

/// Authentication state of a client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Authenticated { role: Role },
}

impl SessionState {
    /// Anonymous fails every check
    pub fn has_permission(&self, required: Role) -> bool {
        match self {
            SessionState::Anonymous => false,
            SessionState::Authenticated { role } => role.satisfies(required),
        }
    }

    pub fn role(&self) -> Option<Role> {
        match self {
            SessionState::Anonymous => None,
            SessionState::Authenticated { role } => Some(*role),
        }
    }
}

/// Most recent prediction made in a session, kept for export
#[derive(Debug, Clone)]
pub struct LastPrediction {
    pub record: RawRecord,
    pub result: PredictionResult,
    pub predicted_at: DateTime<Utc>,
}

/// Authenticated session
#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub username: String,
    pub role: Role,
    /// Display name
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
    pub last_prediction: Option<LastPrediction>,
}

impl Session {
    fn new(username: &str, account: &UserAccount, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.to_string(),
            role: account.role,
            name: account.name.clone(),
            created_at: now,
            last_activity: now,
            last_prediction: None,
        }
    }

    pub fn state(&self) -> SessionState {
        SessionState::Authenticated { role: self.role }
    }

    pub fn has_permission(&self, required: Role) -> bool {
        self.state().has_permission(required)
    }

    /// Inactive for longer than `timeout`
    pub fn is_timed_out(&self, now: DateTime<Utc>, timeout: Duration) -> bool {
        now - self.last_activity > timeout
    }

    /// Records activity
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.last_activity = now;
    }

    pub fn info(&self, timeout: Duration) -> SessionInfo {
        SessionInfo {
            username: self.username.clone(),
            name: self.name.clone(),
            role: self.role,
            created_at: self.created_at,
            last_activity: self.last_activity,
            expires_at: self.last_activity + timeout,
            has_prediction: self.last_prediction.is_some(),
        }
    }
}

/// What a client may see of its own session
#[derive(Debug, Clone, Serialize)]
pub struct SessionInfo {
    pub username: String,
    pub name: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
    /// When the session expires unless used again
    pub expires_at: DateTime<Utc>,
    pub has_prediction: bool,
}

/// Session manager configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Inactivity after which a session is logged out
    pub idle_timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_timeout: Duration::minutes(30),
        }
    }
}

/// Owns all live sessions
#[derive(Debug)]
pub struct SessionManager {
    config: SessionConfig,
    sessions: RwLock<HashMap<String, Session>>,
}

impl SessionManager {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Opens a session for a verified account
    ///
    /// Returns the raw bearer token; only its digest is kept. Timed-out
    /// sessions nobody came back for are dropped first.
    pub fn create(&self, username: &str, account: &UserAccount) -> AuthResult<(Session, String)> {
        self.create_at(username, account, Utc::now())
    }

    pub fn create_at(
        &self,
        username: &str,
        account: &UserAccount,
        now: DateTime<Utc>,
    ) -> AuthResult<(Session, String)> {
        let token = generate_token();
        let session = Session::new(username, account, now);

        let purged = self.purge_expired(now)?;
        if purged > 0 {
            let count = purged.to_string();
            log_event_with_fields(Event::SessionExpired, &[("purged", count.as_str())]);
        }

        let mut sessions = self.write()?;
        sessions.insert(hash_token(&token), session.clone());

        Ok((session, token))
    }

    /// Looks up a session, applying the timeout and recording activity
    pub fn resolve(&self, token: &str) -> AuthResult<Session> {
        self.resolve_at(token, Utc::now())
    }

    pub fn resolve_at(&self, token: &str, now: DateTime<Utc>) -> AuthResult<Session> {
        let key = hash_token(token);
        let mut sessions = self.write()?;

        let session = sessions
            .get_mut(&key)
            .ok_or(AuthError::AuthenticationRequired)?;

        if session.is_timed_out(now, self.config.idle_timeout) {
            let username = session.username.clone();
            sessions.remove(&key);
            log_event_with_fields(Event::SessionExpired, &[("username", username.as_str())]);
            return Err(AuthError::SessionExpired);
        }

        session.touch(now);
        Ok(session.clone())
    }

    /// Ends a session
    pub fn destroy(&self, token: &str) -> AuthResult<Session> {
        let mut sessions = self.write()?;
        sessions
            .remove(&hash_token(token))
            .ok_or(AuthError::AuthenticationRequired)
    }

    /// Ends every session of one account; returns how many
    pub fn destroy_all_for_user(&self, username: &str) -> AuthResult<usize> {
        let mut sessions = self.write()?;
        let before = sessions.len();
        sessions.retain(|_, s| s.username != username);
        Ok(before - sessions.len())
    }

    /// Replaces the cached prediction of a session
    pub fn record_prediction(&self, token: &str, prediction: LastPrediction) -> AuthResult<()> {
        let mut sessions = self.write()?;
        let session = sessions
            .get_mut(&hash_token(token))
            .ok_or(AuthError::AuthenticationRequired)?;
        session.last_prediction = Some(prediction);
        Ok(())
    }

    /// Drops every timed-out session; returns how many
    pub fn purge_expired(&self, now: DateTime<Utc>) -> AuthResult<usize> {
        let timeout = self.config.idle_timeout;
        let mut sessions = self.write()?;
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_timed_out(now, timeout));
        Ok(before - sessions.len())
    }

    pub fn active_count(&self) -> AuthResult<usize> {
        let sessions = self
            .sessions
            .read()
            .map_err(|_| AuthError::StorageError("Lock poisoned".to_string()))?;
        Ok(sessions.len())
    }

    fn write(&self) -> AuthResult<std::sync::RwLockWriteGuard<'_, HashMap<String, Session>>> {
        self.sessions
            .write()
            .map_err(|_| AuthError::StorageError("Lock poisoned".to_string()))
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

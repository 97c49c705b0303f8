//! # Auth Service
//!
//! Login, logout, permission checks and account management on top of the
//! account store and the session manager.
//!
//! Every permission-gated operation checks the caller's role before it
//! touches the store, so a rejected call has no side effects.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::observability::{log_event_with_fields, Event};

use super::accounts::{validate_username, AccountStore, AccountSummary, UserAccount};
use super::crypto::{verify_login, PasswordPolicy};
use super::errors::{AuthError, AuthResult};
use super::role::Role;
use super::session::{LastPrediction, Session, SessionConfig, SessionInfo, SessionManager, SessionState};

/// Login request body
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Returned once per login
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    /// Bearer token for the `Authorization` header
    pub token: String,
    pub session: SessionInfo,
}

/// Account creation request body
#[derive(Debug, Clone, Deserialize)]
pub struct NewAccountRequest {
    pub username: String,
    pub password: String,
    pub role: Role,
    pub name: String,
}

/// Auth service combining the store, sessions and password policy
pub struct AuthService {
    store: Box<dyn AccountStore>,
    sessions: SessionManager,
    password_policy: PasswordPolicy,
}

impl AuthService {
    pub fn new(
        store: impl AccountStore + 'static,
        session_config: SessionConfig,
        password_policy: PasswordPolicy,
    ) -> Self {
        Self {
            store: Box::new(store),
            sessions: SessionManager::new(session_config),
            password_policy,
        }
    }

    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    /// Anonymous to Authenticated
    ///
    /// Unknown usernames and wrong passwords fail identically.
    pub fn login(&self, request: &LoginRequest) -> AuthResult<LoginResponse> {
        let accounts = self.store.load_all()?;

        let account = accounts.get(&request.username);
        let stored = account.map(|a| a.password_hash.as_str());

        let verified = verify_login(&request.password, stored);

        let account = match account.filter(|_| verified) {
            Some(account) => account,
            None => {
                log_event_with_fields(
                    Event::LoginRejected,
                    &[("username", request.username.as_str())],
                );
                return Err(AuthError::InvalidCredentials);
            }
        };

        let (session, token) = self.sessions.create(&request.username, account)?;
        log_event_with_fields(
            Event::LoginSucceeded,
            &[
                ("role", session.role.as_str()),
                ("username", session.username.as_str()),
            ],
        );

        Ok(LoginResponse {
            token,
            session: session.info(self.sessions.config().idle_timeout),
        })
    }

    /// Authenticated to Anonymous
    pub fn logout(&self, token: &str) -> AuthResult<()> {
        let session = self.sessions.destroy(token)?;
        log_event_with_fields(Event::Logout, &[("username", session.username.as_str())]);
        Ok(())
    }

    /// Session behind a bearer token, if any
    ///
    /// Counts as activity; a timed-out session is logged out here.
    pub fn resolve(&self, token: Option<&str>) -> AuthResult<Session> {
        let token = token.ok_or(AuthError::AuthenticationRequired)?;
        self.sessions.resolve(token)
    }

    /// State of the client presenting `token`
    pub fn state(&self, token: Option<&str>) -> SessionState {
        match self.resolve(token) {
            Ok(session) => session.state(),
            Err(_) => SessionState::Anonymous,
        }
    }

    /// Resolves a session and checks it holds `required`
    pub fn require(&self, token: Option<&str>, required: Role) -> AuthResult<Session> {
        let session = self.resolve(token)?;
        ensure_role(&session, required)?;
        Ok(session)
    }

    /// Admin only
    pub fn list_accounts(&self, actor: &Session) -> AuthResult<Vec<AccountSummary>> {
        ensure_role(actor, Role::Admin)?;

        let accounts = self.store.load_all()?;
        Ok(accounts
            .iter()
            .map(|(username, account)| AccountSummary::new(username, account))
            .collect())
    }

    /// Admin only; fails if the username exists
    pub fn add_account(&self, actor: &Session, request: &NewAccountRequest) -> AuthResult<AccountSummary> {
        ensure_role(actor, Role::Admin)?;
        validate_username(&request.username)?;

        let mut accounts: BTreeMap<String, UserAccount> = self.store.load_all()?;
        if accounts.contains_key(&request.username) {
            return Err(AuthError::UsernameTaken);
        }

        let account = UserAccount::new(
            &request.password,
            request.role,
            &request.name,
            &self.password_policy,
        )?;
        let summary = AccountSummary::new(&request.username, &account);

        accounts.insert(request.username.clone(), account);
        self.store.save_all(&accounts)?;

        log_event_with_fields(
            Event::AccountCreated,
            &[
                ("actor", actor.username.as_str()),
                ("role", summary.role.as_str()),
                ("username", summary.username.as_str()),
            ],
        );
        Ok(summary)
    }

    /// Admin only; an admin cannot delete themself
    ///
    /// Sessions of the deleted account end immediately.
    pub fn delete_account(&self, actor: &Session, username: &str) -> AuthResult<()> {
        ensure_role(actor, Role::Admin)?;
        if actor.username == username {
            return Err(AuthError::CannotDeleteSelf);
        }

        let mut accounts = self.store.load_all()?;
        if accounts.remove(username).is_none() {
            return Err(AuthError::AccountNotFound(username.to_string()));
        }
        self.store.save_all(&accounts)?;

        let ended = self.sessions.destroy_all_for_user(username)?;
        let ended = ended.to_string();
        log_event_with_fields(
            Event::AccountDeleted,
            &[
                ("actor", actor.username.as_str()),
                ("sessions_ended", ended.as_str()),
                ("username", username),
            ],
        );
        Ok(())
    }

    /// Caches a prediction for later export
    pub fn record_prediction(&self, token: &str, prediction: LastPrediction) -> AuthResult<()> {
        self.sessions.record_prediction(token, prediction)
    }
}

/// Guard clause shared by every gated operation
fn ensure_role(session: &Session, required: Role) -> AuthResult<()> {
    if session.has_permission(required) {
        return Ok(());
    }
    log_event_with_fields(
        Event::AccessDenied,
        &[
            ("required", required.as_str()),
            ("role", session.role.as_str()),
            ("username", session.username.as_str()),
        ],
    );
    Err(AuthError::Unauthorized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::accounts::InMemoryAccountStore;
    use std::sync::Arc;

    fn service() -> (AuthService, Arc<InMemoryAccountStore>) {
        let store = Arc::new(InMemoryAccountStore::new());
        let service = AuthService::new(
            store.clone(),
            SessionConfig::default(),
            PasswordPolicy::default(),
        );
        (service, store)
    }

    fn login(service: &AuthService, username: &str, password: &str) -> AuthResult<LoginResponse> {
        service.login(&LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    fn new_account(username: &str, role: Role) -> NewAccountRequest {
        NewAccountRequest {
            username: username.to_string(),
            password: "password123".to_string(),
            role,
            name: format!("{} name", username),
        }
    }

    #[test]
    fn test_default_admin_login() {
        let (service, _) = service();
        let response = login(&service, "admin", "admin123").unwrap();
        assert_eq!(response.session.role, Role::Admin);
        assert_eq!(response.session.name, "Administrator");

        let state = service.state(Some(&response.token));
        assert_eq!(state, SessionState::Authenticated { role: Role::Admin });
    }

    #[test]
    fn test_rejections_are_identical() {
        let (service, _) = service();
        let wrong_password = login(&service, "admin", "nope").unwrap_err();
        let unknown_user = login(&service, "ghost", "admin123").unwrap_err();
        assert_eq!(wrong_password, unknown_user);
        assert_eq!(wrong_password.to_string(), unknown_user.to_string());
        assert_eq!(wrong_password, AuthError::InvalidCredentials);
    }

    #[test]
    fn test_missing_token_is_anonymous() {
        let (service, _) = service();
        assert_eq!(service.state(None), SessionState::Anonymous);
        assert_eq!(
            service.require(None, Role::User).unwrap_err(),
            AuthError::AuthenticationRequired
        );
    }

    #[test]
    fn test_logout() {
        let (service, _) = service();
        let token = login(&service, "admin", "admin123").unwrap().token;
        service.logout(&token).unwrap();
        assert_eq!(service.state(Some(&token)), SessionState::Anonymous);
    }

    #[test]
    fn test_account_lifecycle() {
        let (service, store) = service();
        let token = login(&service, "admin", "admin123").unwrap().token;
        let admin = service.require(Some(&token), Role::Admin).unwrap();

        let created = service
            .add_account(&admin, &new_account("teacher", Role::Educator))
            .unwrap();
        assert_eq!(created.role, Role::Educator);
        assert!(store.load_all().unwrap().contains_key("teacher"));

        let teacher = login(&service, "teacher", "password123").unwrap();
        assert_eq!(teacher.session.role, Role::Educator);

        service.delete_account(&admin, "teacher").unwrap();
        assert!(!store.load_all().unwrap().contains_key("teacher"));
        // Sessions of a deleted account are gone
        assert_eq!(service.state(Some(&teacher.token)), SessionState::Anonymous);
    }

    #[test]
    fn test_duplicate_username_rejected() {
        let (service, _) = service();
        let token = login(&service, "admin", "admin123").unwrap().token;
        let admin = service.resolve(Some(&token)).unwrap();

        assert_eq!(
            service
                .add_account(&admin, &new_account("admin", Role::User))
                .unwrap_err(),
            AuthError::UsernameTaken
        );
    }

    #[test]
    fn test_admin_cannot_delete_self() {
        let (service, store) = service();
        let token = login(&service, "admin", "admin123").unwrap().token;
        let admin = service.resolve(Some(&token)).unwrap();

        assert_eq!(
            service.delete_account(&admin, "admin").unwrap_err(),
            AuthError::CannotDeleteSelf
        );
        assert!(store.load_all().unwrap().contains_key("admin"));
    }

    #[test]
    fn test_non_admin_cannot_manage_accounts() {
        let (service, store) = service();
        let admin_token = login(&service, "admin", "admin123").unwrap().token;
        let admin = service.resolve(Some(&admin_token)).unwrap();
        service
            .add_account(&admin, &new_account("teacher", Role::Educator))
            .unwrap();

        let teacher_token = login(&service, "teacher", "password123").unwrap().token;
        let teacher = service.resolve(Some(&teacher_token)).unwrap();
        let before = store.load_all().unwrap();

        assert_eq!(
            service
                .add_account(&teacher, &new_account("student", Role::User))
                .unwrap_err(),
            AuthError::Unauthorized
        );
        assert_eq!(
            service.delete_account(&teacher, "admin").unwrap_err(),
            AuthError::Unauthorized
        );
        assert_eq!(service.list_accounts(&teacher).unwrap_err(), AuthError::Unauthorized);
        assert_eq!(store.load_all().unwrap(), before);
    }

    #[test]
    fn test_delete_unknown_account() {
        let (service, _) = service();
        let token = login(&service, "admin", "admin123").unwrap().token;
        let admin = service.resolve(Some(&token)).unwrap();
        assert!(matches!(
            service.delete_account(&admin, "ghost"),
            Err(AuthError::AccountNotFound(_))
        ));
    }

    #[test]
    fn test_invalid_new_accounts() {
        let (service, _) = service();
        let token = login(&service, "admin", "admin123").unwrap().token;
        let admin = service.resolve(Some(&token)).unwrap();

        let mut bad_name = new_account("x y", Role::User);
        assert!(matches!(
            service.add_account(&admin, &bad_name),
            Err(AuthError::InvalidUsername(_))
        ));

        bad_name.username = "xy".to_string();
        bad_name.password = "short".to_string();
        assert!(matches!(
            service.add_account(&admin, &bad_name),
            Err(AuthError::WeakPassword(_))
        ));
    }

    #[test]
    fn test_list_accounts() {
        let (service, _) = service();
        let token = login(&service, "admin", "admin123").unwrap().token;
        let admin = service.resolve(Some(&token)).unwrap();

        let accounts = service.list_accounts(&admin).unwrap();
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].username, "admin");
    }
}

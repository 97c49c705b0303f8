//! # Account Store
//!
//! Accounts live in one JSON object keyed by username:
//!
//! ```json
//! { "admin": { "password_hash": "240be5...", "role": "admin", "name": "Administrator" } }
//! ```
//!
//! The whole file is read for every lookup and rewritten for every change.
//! There is no locking across processes: with two writers the last one
//! wins.

use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock, RwLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::observability::{log_event_with_fields, Event};

use super::crypto::{hash_password, legacy_digest, PasswordPolicy};
use super::errors::{AuthError, AuthResult};
use super::role::Role;

/// Username of the account seeded into a fresh store
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
const DEFAULT_ADMIN_NAME: &str = "Administrator";

/// Stored account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    /// Argon2id PHC string or legacy SHA-256 hex, never plaintext
    pub password_hash: String,
    pub role: Role,
    pub name: String,
}

impl UserAccount {
    /// Creates an account with a freshly hashed password
    pub fn new(password: &str, role: Role, name: &str, policy: &PasswordPolicy) -> AuthResult<Self> {
        policy.validate(password)?;

        let name = name.trim();
        if name.is_empty() {
            return Err(AuthError::InvalidAccount("name must not be empty".to_string()));
        }

        Ok(Self {
            password_hash: hash_password(password)?,
            role,
            name: name.to_string(),
        })
    }
}

/// Public view of an account, without its digest
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountSummary {
    pub username: String,
    pub role: Role,
    pub name: String,
}

impl AccountSummary {
    pub fn new(username: &str, account: &UserAccount) -> Self {
        Self {
            username: username.to_string(),
            role: account.role,
            name: account.name.clone(),
        }
    }
}

/// The accounts a brand-new store starts with
pub fn default_accounts() -> BTreeMap<String, UserAccount> {
    let mut accounts = BTreeMap::new();
    accounts.insert(
        DEFAULT_ADMIN_USERNAME.to_string(),
        UserAccount {
            password_hash: legacy_digest(DEFAULT_ADMIN_PASSWORD),
            role: Role::Admin,
            name: DEFAULT_ADMIN_NAME.to_string(),
        },
    );
    accounts
}

static USERNAME_PATTERN: OnceLock<Option<Regex>> = OnceLock::new();

/// Checks username shape: 1 to 64 of `A-Z a-z 0-9 _ . @ -`
pub fn validate_username(username: &str) -> AuthResult<()> {
    let valid = USERNAME_PATTERN
        .get_or_init(|| Regex::new(r"^[A-Za-z0-9_.@-]{1,64}$").ok())
        .as_ref()
        .map(|re| re.is_match(username))
        .unwrap_or(false);

    if valid {
        Ok(())
    } else {
        Err(AuthError::InvalidUsername(
            "use 1-64 letters, digits, '_', '.', '@' or '-'".to_string(),
        ))
    }
}

/// Whole-file account storage
pub trait AccountStore: Send + Sync {
    /// Reads every account
    fn load_all(&self) -> AuthResult<BTreeMap<String, UserAccount>>;

    /// Replaces every account
    fn save_all(&self, accounts: &BTreeMap<String, UserAccount>) -> AuthResult<()>;
}

impl<T: AccountStore + ?Sized> AccountStore for Arc<T> {
    fn load_all(&self) -> AuthResult<BTreeMap<String, UserAccount>> {
        (**self).load_all()
    }

    fn save_all(&self, accounts: &BTreeMap<String, UserAccount>) -> AuthResult<()> {
        (**self).save_all(accounts)
    }
}

type RawAccounts = BTreeMap<String, serde_json::Value>;

/// JSON file account store
///
/// A missing file, or one that is not a JSON object, is replaced by one
/// holding only the default admin account. A single record that does not
/// decode (an unknown role, say) is skipped with a warning; it can never
/// log in and is kept in the file as it was.
#[derive(Debug)]
pub struct FileAccountStore {
    path: PathBuf,
}

impl FileAccountStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the file with default accounts if it does not exist yet
    ///
    /// Returns whether a file was created.
    pub fn ensure_initialized(&self) -> AuthResult<bool> {
        if self.path.exists() {
            return Ok(false);
        }
        self.seed(Event::AccountStoreCreated)?;
        Ok(true)
    }

    fn seed(&self, event: Event) -> AuthResult<BTreeMap<String, UserAccount>> {
        let accounts = default_accounts();
        self.save_all(&accounts)?;

        let path = self.path.display().to_string();
        log_event_with_fields(event, &[("path", path.as_str())]);
        Ok(accounts)
    }

    /// Parses the file as a JSON object of records
    ///
    /// `None` when the file does not exist; `Some(Err)` when it is not a
    /// JSON object.
    fn read_raw(&self) -> AuthResult<Option<Result<RawAccounts, serde_json::Error>>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(serde_json::from_str(&content))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AuthError::StorageError(format!(
                "Failed to read account store: {}",
                e
            ))),
        }
    }

    fn unreadable_records(&self) -> RawAccounts {
        match self.read_raw() {
            Ok(Some(Ok(raw))) => raw
                .into_iter()
                .filter(|(_, record)| serde_json::from_value::<UserAccount>(record.clone()).is_err())
                .collect(),
            _ => RawAccounts::new(),
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl AccountStore for FileAccountStore {
    fn load_all(&self) -> AuthResult<BTreeMap<String, UserAccount>> {
        let raw = match self.read_raw()? {
            Some(Ok(raw)) => raw,
            Some(Err(_)) => return self.seed(Event::AccountStoreReset),
            None => return self.seed(Event::AccountStoreCreated),
        };

        let mut accounts = BTreeMap::new();
        for (username, record) in raw {
            match serde_json::from_value::<UserAccount>(record) {
                Ok(account) => {
                    accounts.insert(username, account);
                }
                Err(e) => {
                    let reason = e.to_string();
                    log_event_with_fields(
                        Event::AccountRecordSkipped,
                        &[("reason", reason.as_str()), ("username", username.as_str())],
                    );
                }
            }
        }
        Ok(accounts)
    }

    fn save_all(&self, accounts: &BTreeMap<String, UserAccount>) -> AuthResult<()> {
        // Records this build cannot read are carried over untouched
        let mut raw = self.unreadable_records();
        for (username, account) in accounts {
            let record = serde_json::to_value(account).map_err(|e| {
                AuthError::StorageError(format!("Failed to serialize accounts: {}", e))
            })?;
            raw.insert(username.clone(), record);
        }

        let content = serde_json::to_string_pretty(&raw).map_err(|e| {
            AuthError::StorageError(format!("Failed to serialize accounts: {}", e))
        })?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    AuthError::StorageError(format!(
                        "Failed to create account store directory: {}",
                        e
                    ))
                })?;
            }
        }

        // Write-then-rename so readers never see a half-written file
        let temp_path = self.temp_path();
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)
            .map_err(|e| AuthError::StorageError(format!("Failed to write account store: {}", e)))?;
        file.write_all(content.as_bytes())
            .and_then(|_| file.sync_all())
            .map_err(|e| AuthError::StorageError(format!("Failed to write account store: {}", e)))?;

        fs::rename(&temp_path, &self.path)
            .map_err(|e| AuthError::StorageError(format!("Failed to replace account store: {}", e)))
    }
}

/// Account store held in memory
#[derive(Debug)]
pub struct InMemoryAccountStore {
    accounts: RwLock<BTreeMap<String, UserAccount>>,
}

impl InMemoryAccountStore {
    /// Store holding only the default accounts
    pub fn new() -> Self {
        Self::with_accounts(default_accounts())
    }

    pub fn with_accounts(accounts: BTreeMap<String, UserAccount>) -> Self {
        Self {
            accounts: RwLock::new(accounts),
        }
    }
}

impl Default for InMemoryAccountStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AccountStore for InMemoryAccountStore {
    fn load_all(&self) -> AuthResult<BTreeMap<String, UserAccount>> {
        let accounts = self
            .accounts
            .read()
            .map_err(|_| AuthError::StorageError("Lock poisoned".to_string()))?;
        Ok(accounts.clone())
    }

    fn save_all(&self, accounts: &BTreeMap<String, UserAccount>) -> AuthResult<()> {
        let mut stored = self
            .accounts
            .write()
            .map_err(|_| AuthError::StorageError("Lock poisoned".to_string()))?;
        *stored = accounts.clone();
        Ok(())
    }
}

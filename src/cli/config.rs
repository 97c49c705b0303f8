//! Service configuration file
//!
//! Every field has a default, so `{}` is a valid config. Relative paths
//! are taken relative to the directory holding the config file.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::auth::{PasswordPolicy, SessionConfig};
use crate::catalog::fields;
use crate::http_server::HttpServerConfig;
use crate::model::ArtifactPaths;
use crate::validation::ValidationRules;

use super::errors::{CliError, CliResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Bind address and CORS origins
    #[serde(default)]
    pub http: HttpServerConfig,

    /// Model, preprocessing and feature-name files
    #[serde(default)]
    pub artifacts: ArtifactPaths,

    /// JSON file holding user accounts
    #[serde(default = "default_account_store_path")]
    pub account_store_path: PathBuf,

    /// Idle minutes before a session is logged out
    #[serde(default = "default_session_timeout_minutes")]
    pub session_timeout_minutes: i64,

    /// Youngest enrollment age accepted without a warning
    #[serde(default = "default_min_enrollment_age")]
    pub min_enrollment_age: f64,

    #[serde(default = "default_password_min_length")]
    pub password_min_length: usize,
}

fn default_account_store_path() -> PathBuf {
    PathBuf::from("users.json")
}

fn default_session_timeout_minutes() -> i64 {
    30
}

fn default_min_enrollment_age() -> f64 {
    fields::bounds::MIN_AGE as f64
}

fn default_password_min_length() -> usize {
    8
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http: HttpServerConfig::default(),
            artifacts: ArtifactPaths::default(),
            account_store_path: default_account_store_path(),
            session_timeout_minutes: default_session_timeout_minutes(),
            min_enrollment_age: default_min_enrollment_age(),
            password_min_length: default_password_min_length(),
        }
    }
}

impl Config {
    /// Loads, validates and resolves paths against the config's directory
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::config_error(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Ok(config.resolved_against(base))
    }

    /// Writes this config as pretty JSON
    pub fn write(&self, path: &Path) -> CliResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|e| {
            CliError::config_error(format!(
                "Failed to write config file '{}': {}",
                path.display(),
                e
            ))
        })
    }

    pub fn validate(&self) -> CliResult<()> {
        if self.http.host.trim().is_empty() {
            return Err(CliError::config_error("http.host must not be empty"));
        }
        if self.session_timeout_minutes <= 0 {
            return Err(CliError::config_error(
                "session_timeout_minutes must be positive",
            ));
        }
        if !self.min_enrollment_age.is_finite() || self.min_enrollment_age < 0.0 {
            return Err(CliError::config_error(
                "min_enrollment_age must be a non-negative number",
            ));
        }
        if self.password_min_length == 0 {
            return Err(CliError::config_error(
                "password_min_length must be at least 1",
            ));
        }
        if self.account_store_path.as_os_str().is_empty() {
            return Err(CliError::config_error(
                "account_store_path must not be empty",
            ));
        }
        Ok(())
    }

    fn resolved_against(mut self, base: &Path) -> Self {
        let resolve = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        resolve(&mut self.account_store_path);
        resolve(&mut self.artifacts.model);
        resolve(&mut self.artifacts.preprocessing);
        resolve(&mut self.artifacts.feature_names);
        self
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            idle_timeout: Duration::minutes(self.session_timeout_minutes),
        }
    }

    pub fn password_policy(&self) -> PasswordPolicy {
        PasswordPolicy::with_min_length(self.password_min_length)
    }

    pub fn validation_rules(&self) -> ValidationRules {
        ValidationRules {
            min_age: self.min_enrollment_age,
        }
    }
}

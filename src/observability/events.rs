//! Observable events
//!
//! Every log line the service writes names one of these.

use std::fmt;

use super::logger::Severity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    StartupBegin,
    StartupComplete,
    Serving,
    Shutdown,
    ConfigLoaded,

    // Model artifacts
    ArtifactsLoaded,
    ArtifactsFailed,

    // Account store
    AccountStoreCreated,
    AccountStoreReset,
    AccountRecordSkipped,
    AccountCreated,
    AccountDeleted,

    // Sessions
    LoginSucceeded,
    LoginRejected,
    Logout,
    SessionExpired,
    AccessDenied,

    // Predictions
    ValidationWarnings,
    UnknownCategoryDropped,
    PredictionComplete,
    PredictionFailed,
    ReportExported,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::StartupBegin => "SCHOLARIS_STARTUP_BEGIN",
            Event::StartupComplete => "SCHOLARIS_STARTUP_COMPLETE",
            Event::Serving => "SCHOLARIS_SERVING",
            Event::Shutdown => "SCHOLARIS_SHUTDOWN",
            Event::ConfigLoaded => "CONFIG_LOADED",

            Event::ArtifactsLoaded => "MODEL_ARTIFACTS_LOADED",
            Event::ArtifactsFailed => "MODEL_ARTIFACTS_FAILED",

            Event::AccountStoreCreated => "ACCOUNT_STORE_CREATED",
            Event::AccountStoreReset => "ACCOUNT_STORE_RESET",
            Event::AccountRecordSkipped => "ACCOUNT_RECORD_SKIPPED",
            Event::AccountCreated => "ACCOUNT_CREATED",
            Event::AccountDeleted => "ACCOUNT_DELETED",

            Event::LoginSucceeded => "LOGIN_SUCCEEDED",
            Event::LoginRejected => "LOGIN_REJECTED",
            Event::Logout => "LOGOUT",
            Event::SessionExpired => "SESSION_EXPIRED",
            Event::AccessDenied => "ACCESS_DENIED",

            Event::ValidationWarnings => "VALIDATION_WARNINGS",
            Event::UnknownCategoryDropped => "UNKNOWN_CATEGORY_DROPPED",
            Event::PredictionComplete => "PREDICTION_COMPLETE",
            Event::PredictionFailed => "PREDICTION_FAILED",
            Event::ReportExported => "REPORT_EXPORTED",
        }
    }

    /// Severity this event is always logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::ArtifactsFailed => Severity::Fatal,
            Event::PredictionFailed => Severity::Error,
            Event::AccountStoreReset
            | Event::AccountRecordSkipped
            | Event::LoginRejected
            | Event::AccessDenied
            | Event::UnknownCategoryDropped
            | Event::ValidationWarnings => Severity::Warn,
            _ => Severity::Info,
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

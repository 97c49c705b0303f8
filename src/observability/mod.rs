//! # Observability
//!
//! Structured JSON logging with a closed set of typed events.
//!
//! ```ignore
//! use scholaris::observability::{log_event, log_event_with_fields, Event};
//!
//! log_event(Event::StartupBegin);
//! log_event_with_fields(Event::LoginRejected, &[("username", "bob")]);
//! ```
//!
//! Logging is synchronous and never fails the caller.

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Logs an event at its own severity
pub fn log_event(event: Event) {
    Logger::log(event.severity(), event.as_str(), &[]);
}

/// Logs an event with fields at its own severity
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}

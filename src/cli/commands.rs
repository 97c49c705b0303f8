//! CLI command implementations
//!
//! `serve` and `predict` refuse to run without a complete, consistent set
//! of model artifacts.

use std::path::Path;
use std::sync::Arc;

use serde_json::json;

use crate::auth::{AuthService, FileAccountStore};
use crate::http_server::{AppState, HttpServer};
use crate::model::{assess, ModelArtifacts, Predictor};
use crate::observability::{log_event, log_event_with_fields, Event};
use crate::preprocessing::RawRecord;
use crate::validation::Validator;

use super::args::{Cli, Command};
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::{read_record, write_response};

/// Main entry point for CLI
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}

/// Run a specific command
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Init { config } => init(&config),
        Command::Serve { config, port } => serve(&config, port),
        Command::Predict { config } => predict(&config),
        Command::Validate { config } => validate(&config),
    }
}

/// Writes a default config if none exists, then seeds the account store
pub fn init(config_path: &Path) -> CliResult<()> {
    let config_created = if config_path.exists() {
        false
    } else {
        Config::default().write(config_path)?;
        true
    };

    let config = load_config(config_path)?;
    let store = FileAccountStore::new(&config.account_store_path);
    let store_created = store.ensure_initialized()?;

    write_response(json!({
        "config": config_path.display().to_string(),
        "config_created": config_created,
        "account_store": store.path().display().to_string(),
        "account_store_created": store_created,
    }))
}

/// Loads everything and serves HTTP until interrupted
pub fn serve(config_path: &Path, port: Option<u16>) -> CliResult<()> {
    log_event(Event::StartupBegin);

    let mut config = load_config(config_path)?;
    if let Some(port) = port {
        config.http.port = port;
    }

    let predictor = load_predictor(&config)?;

    let store = FileAccountStore::new(&config.account_store_path);
    store
        .ensure_initialized()
        .map_err(|e| CliError::boot_failed(format!("Account store unusable: {}", e)))?;

    let auth = AuthService::new(store, config.session_config(), config.password_policy());
    let validator = Validator::new(config.validation_rules());
    let state = Arc::new(AppState::new(auth, predictor, validator));
    let server = HttpServer::new(config.http.clone(), state);

    let addr = server.socket_addr();
    log_event_with_fields(Event::StartupComplete, &[("addr", addr.as_str())]);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Assesses one record read from stdin
pub fn predict(config_path: &Path) -> CliResult<()> {
    let config = load_config(config_path)?;
    let predictor = load_predictor(&config)?;
    let validator = Validator::new(config.validation_rules());

    let record = read_record()?;
    let data = predict_record(&predictor, &validator, &record)?;
    write_response(data)
}

/// Runs the advisory checks on one record read from stdin
pub fn validate(config_path: &Path) -> CliResult<()> {
    let config = load_config(config_path)?;
    let validator = Validator::new(config.validation_rules());

    let record = read_record()?;
    write_response(validate_record(&validator, &record))
}

pub(crate) fn predict_record(
    predictor: &Predictor,
    validator: &Validator,
    record: &RawRecord,
) -> CliResult<serde_json::Value> {
    let (assessment, _) = assess(predictor, validator, record)?;
    Ok(serde_json::to_value(assessment)?)
}

pub(crate) fn validate_record(validator: &Validator, record: &RawRecord) -> serde_json::Value {
    let warnings = validator.validate(record);
    json!({
        "valid": warnings.is_empty(),
        "warnings": warnings,
    })
}

fn load_config(path: &Path) -> CliResult<Config> {
    let config = Config::load(path)?;
    let shown = path.display().to_string();
    log_event_with_fields(Event::ConfigLoaded, &[("path", shown.as_str())]);
    Ok(config)
}

fn load_predictor(config: &Config) -> CliResult<Predictor> {
    let loaded = ModelArtifacts::load(&config.artifacts).and_then(Predictor::from_artifacts);

    match loaded {
        Ok(predictor) => {
            let features = predictor.schema().len().to_string();
            log_event_with_fields(Event::ArtifactsLoaded, &[("features", features.as_str())]);
            Ok(predictor)
        }
        Err(e) => {
            let reason = e.to_string();
            log_event_with_fields(Event::ArtifactsFailed, &[("reason", reason.as_str())]);
            Err(CliError::boot_failed(reason))
        }
    }
}

//! JSON I/O for the CLI
//!
//! - Input: one JSON document on stdin (may span lines)
//! - Output: one JSON object per line on stdout

use std::io::{self, Read, Write};

use serde_json::Value;

use crate::preprocessing::RawRecord;

use super::errors::{CliError, CliResult};

/// Reads stdin to the end
pub fn read_input() -> CliResult<String> {
    let mut input = String::new();
    io::stdin().lock().read_to_string(&mut input)?;
    Ok(input)
}

/// Parses a raw record: a JSON object of field name to number
pub fn parse_record(input: &str) -> CliResult<RawRecord> {
    if input.trim().is_empty() {
        return Err(CliError::invalid_input("Empty input"));
    }
    serde_json::from_str(input)
        .map_err(|e| CliError::invalid_input(format!("Invalid record: {}", e)))
}

/// Reads one raw record from stdin
pub fn read_record() -> CliResult<RawRecord> {
    parse_record(&read_input()?)
}

/// Writes `{"status":"ok","data":...}`
pub fn write_response(data: Value) -> CliResult<()> {
    write_line(&serde_json::json!({
        "status": "ok",
        "data": data
    }))
}

/// Writes `{"status":"error","code":...,"message":...}`
pub fn write_error(code: &str, message: &str) -> CliResult<()> {
    write_line(&serde_json::json!({
        "status": "error",
        "code": code,
        "message": message
    }))
}

fn write_line(value: &Value) -> CliResult<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer(&mut stdout, value)?;
    writeln!(stdout)?;
    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_record() {
        let record = parse_record("{\n  \"Gender\": 1,\n  \"GDP\": 1.74\n}").unwrap();
        assert_eq!(record.len(), 2);
        assert_eq!(record.get_f64("GDP"), Some(1.74));
    }

    #[test]
    fn test_parse_record_rejects_bad_input() {
        assert!(parse_record("   ").is_err());
        assert!(parse_record("[1, 2]").is_err());
        assert!(parse_record(r#"{"Gender": "male"}"#).is_err());
    }
}

//! CLI command implementations
//!
//! Each command returns the `data` object of its success response;
//! `run_command` writes it, or the error envelope, to stdout.

use std::path::Path;

use serde_json::{json, Value};

use crate::batch::{run_batch, MultiMetricConfig};
use crate::cellset::{decode, to_year_end, TabularRecord};
use crate::observability::{log_event, Event};
use crate::payload::{load_payload, PayloadValidator};
use crate::transport::{ApiConfig, HttpTransport, QueryTransport};

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::{read_json_file, write_error, write_response};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    // A missing .env is normal; the process environment still applies.
    let _ = dotenvy::dotenv();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    let result = match cmd {
        Command::Validate { file } => validate(&file),
        Command::Decode { response, metric } => decode_file(&response, metric.as_deref()),
        Command::Run {
            file,
            config,
            metric,
            skip_validation,
        } => run_file(&file, config.as_deref(), metric.as_deref(), skip_validation),
        Command::Batch { config, api_config } => batch(&config, api_config.as_deref()),
    };

    match result {
        Ok(data) => write_response(data),
        Err(e) => {
            write_error(e.code_str(), e.message())?;
            Err(e)
        }
    }
}

/// Validate a payload file
pub fn validate(path: &Path) -> CliResult<Value> {
    let payload = load_payload(path)?;
    log_event(Event::PayloadLoaded, &[("path", path.display().to_string().as_str())]);
    check_payload(&payload)?;
    Ok(json!({ "valid": true }))
}

/// Decode a saved response file
pub fn decode_file(path: &Path, metric: Option<&str>) -> CliResult<Value> {
    let response = read_json_file(path)?;
    let records = decode_response(&response, metric)?;
    Ok(records_data(records))
}

/// Validate, send and decode one payload file
pub fn run_file(
    path: &Path,
    config: Option<&Path>,
    metric: Option<&str>,
    skip_validation: bool,
) -> CliResult<Value> {
    let payload = load_payload(path)?;
    log_event(Event::PayloadLoaded, &[("path", path.display().to_string().as_str())]);

    let transport = HttpTransport::new(api_config(config)?)?;
    run_query(&transport, &payload, metric, skip_validation)
}

/// Validate, send and decode one payload through `transport`.
///
/// The Measures hint defaults to `query.source.metric`.
pub fn run_query<T>(
    transport: &T,
    payload: &Value,
    metric: Option<&str>,
    skip_validation: bool,
) -> CliResult<Value>
where
    T: QueryTransport + ?Sized,
{
    if !skip_validation {
        check_payload(payload)?;
    }

    let metric = match metric {
        Some(metric) => Some(metric),
        None => payload.pointer("/query/source/metric").and_then(Value::as_str),
    };
    log_event(Event::QueryDispatched, &[("metric", metric.unwrap_or("-"))]);

    let response = transport.post_query(payload).map_err(|e| {
        log_event(
            Event::QueryFailed,
            &[("code", e.code()), ("error", e.to_string().as_str())],
        );
        CliError::from(e)
    })?;

    let records = decode_response(&response, metric)?;
    Ok(records_data(records))
}

/// Run a multi-metric batch
pub fn batch(config: &Path, api: Option<&Path>) -> CliResult<Value> {
    let batch_config = MultiMetricConfig::load(config)?;
    let transport = HttpTransport::new(api_config(api)?)?;
    let records = run_batch(&transport, &batch_config)?;
    Ok(records_data(to_year_end(records)))
}

fn check_payload(payload: &Value) -> CliResult<()> {
    let report = PayloadValidator::validate(payload);
    if !report.is_valid() {
        let count = report.errors().len().to_string();
        log_event(Event::PayloadRejected, &[("errors", count.as_str())]);
        return Err(CliError::invalid_payload(report.errors()));
    }
    log_event(Event::PayloadValidated, &[]);
    Ok(())
}

fn decode_response(response: &Value, metric: Option<&str>) -> CliResult<Vec<TabularRecord>> {
    match decode(response, metric) {
        Ok(records) => {
            let rows = records.len().to_string();
            log_event(Event::ResponseDecoded, &[("rows", rows.as_str())]);
            Ok(to_year_end(records))
        }
        Err(e) => {
            log_event(Event::ResponseRejected, &[("code", e.code())]);
            Err(e.into())
        }
    }
}

fn api_config(path: Option<&Path>) -> CliResult<ApiConfig> {
    let (config, source) = match path {
        Some(path) => (ApiConfig::load(path)?, path.display().to_string()),
        None => (ApiConfig::from_env()?, "environment".to_string()),
    };
    log_event(
        Event::ConfigLoaded,
        &[("host", config.host.as_str()), ("source", source.as_str())],
    );
    Ok(config)
}

fn records_data(records: Vec<TabularRecord>) -> Value {
    json!({
        "rows": records.len(),
        "records": records,
    })
}

#[cfg(test)]
mod tests {
    use super::super::errors::CliErrorCode;
    use super::*;
    use crate::transport::{TransportError, TransportResult};
    use std::cell::Cell;
    use std::fs;
    use tempfile::TempDir;

    struct Canned {
        response: Value,
        calls: Cell<usize>,
    }

    impl Canned {
        fn new(response: Value) -> Self {
            Self {
                response,
                calls: Cell::new(0),
            }
        }
    }

    impl QueryTransport for Canned {
        fn post_query(&self, _payload: &Value) -> TransportResult<Value> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.response.clone())
        }
    }

    struct Rejecting;

    impl QueryTransport for Rejecting {
        fn post_query(&self, _payload: &Value) -> TransportResult<Value> {
            Err(TransportError::Http {
                status: 401,
                body: "unauthorized".into(),
            })
        }
    }

    fn payload() -> Value {
        json!({
            "query": {
                "source": {"metric": "employeeCount"},
                "axes": [{"dimensionLevelSelection": {"dimension": {"name": "Gender"}, "levelIds": ["Gender"]}}],
                "timeIntervals": {"fromDateTime": "2024-01-01", "intervalPeriodType": "MONTH", "intervalCount": 1}
            }
        })
    }

    fn response() -> Value {
        json!({
            "axes": [{"dimension": {"name": "Gender"}, "positions": [{"path": ["Male"]}, {"path": ["Female"]}]}],
            "cells": [
                {"coordinates": [0], "value": "10"},
                {"coordinates": [1], "value": "12"}
            ]
        })
    }

    #[test]
    fn test_validate_accepts_good_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("q.json");
        fs::write(&path, payload().to_string()).unwrap();

        assert_eq!(validate(&path).unwrap(), json!({"valid": true}));
    }

    #[test]
    fn test_validate_rejects_missing_axes() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("q.json");
        fs::write(&path, r#"{"query": {"source": {"metric": "m"}}}"#).unwrap();

        let err = validate(&path).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::InvalidPayload);
        assert!(err.message().contains("Missing 'axes' in query"));
    }

    #[test]
    fn test_run_query_uses_source_metric_as_hint() {
        let transport = Canned::new(response());
        let data = run_query(&transport, &payload(), None, false).unwrap();

        assert_eq!(transport.calls.get(), 1);
        assert_eq!(data["rows"], 2);
        assert_eq!(data["records"][0]["Measures"], "employeeCount");
        assert_eq!(data["records"][1]["Gender"], "Female");
        assert_eq!(data["records"][1]["value"], 12.0);
    }

    #[test]
    fn test_invalid_payload_is_not_sent() {
        let transport = Canned::new(response());
        let err = run_query(&transport, &json!({"query": {}}), None, false).unwrap_err();

        assert_eq!(err.code_str(), "CELLQ_PAYLOAD_INVALID");
        assert_eq!(transport.calls.get(), 0);
    }

    #[test]
    fn test_skip_validation_sends_anyway() {
        let transport = Canned::new(response());
        run_query(&transport, &json!({"query": {}}), Some("m"), true).unwrap();
        assert_eq!(transport.calls.get(), 1);
    }

    #[test]
    fn test_http_failure_keeps_transport_code() {
        let err = run_query(&Rejecting, &payload(), None, false).unwrap_err();
        assert_eq!(err.code_str(), "CELLQ_TRANSPORT_HTTP");
    }

    #[test]
    fn test_decode_file_reports_api_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("r.json");
        fs::write(
            &path,
            r#"{"error": {"message": "Metric not found", "errorCode": "E404"}}"#,
        )
        .unwrap();

        let err = decode_file(&path, None).unwrap_err();
        assert_eq!(err.code_str(), "CELLQ_RESPONSE_ERROR");
        assert!(err.message().contains("Metric not found"));
    }
}

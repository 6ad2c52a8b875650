//! Integration tests for grapher-common crate.

use std::error::Error;
use std::fs;

use grapher_common::{init_logging, GrapherError, LogFormat, LoggingConfig, Result};

fn read_number(text: &str) -> Result<f64> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    value
        .as_f64()
        .ok_or_else(|| GrapherError::malformed_field("expected a number", "th"))
}

#[test]
fn test_question_mark_converts_json_errors() {
    assert_eq!(read_number("1.5").unwrap(), 1.5);

    let err = read_number("[1").unwrap_err();
    assert!(err.is_malformed_input());
    assert!(err.source().is_some());

    let err = read_number("\"x\"").unwrap_err();
    assert_eq!(err.field(), Some("th"));
}

#[test]
fn test_style_error_names_token() {
    let err = GrapherError::style("unrecognized character 'q'", "rq");
    assert!(err.to_string().contains("\"rq\""));
    assert_eq!(err.field(), None);
}

#[test]
fn test_json_logging_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("grapher.log");
    init_logging(LoggingConfig {
        level: "info".to_string(),
        format: LogFormat::Json,
        file_path: Some(path.to_string_lossy().into_owned()),
        include_spans: true,
        ..LoggingConfig::default()
    })
    .unwrap();

    tracing::info!(graphs = 3, "Loaded graph document");
    tracing::debug!("filtered out");
    tracing::info_span!("graph", index = 1).in_scope(|| {});

    let written = fs::read_to_string(&path).unwrap();
    let line: serde_json::Value = serde_json::from_str(written.lines().next().unwrap()).unwrap();
    assert_eq!(line["fields"]["message"], "Loaded graph document");
    assert_eq!(line["fields"]["graphs"], 3);
    assert!(!written.contains("filtered out"));
    let close = written
        .lines()
        .map(|l| serde_json::from_str::<serde_json::Value>(l).unwrap())
        .find(|l| l["fields"]["message"] == "close")
        .expect("span close event");
    assert_eq!(close["span"]["name"], "graph");
}

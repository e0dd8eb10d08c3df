//! Tests for logging functionality
//!
//! These tests verify that logging initialization works correctly
//! with different configurations.

use javapuml::core::logging::{init_logging, LogFormat, LOG_FORMAT_ENV, LOG_LEVEL_ENV};
use std::str::FromStr;

#[test]
fn test_log_format_parsing() {
    assert_eq!(LogFormat::from_str("compact").unwrap(), LogFormat::Compact);
    assert_eq!(LogFormat::from_str("pretty").unwrap(), LogFormat::Pretty);
    assert_eq!(LogFormat::from_str("json").unwrap(), LogFormat::Json);
    assert_eq!(LogFormat::from_str("JSON").unwrap(), LogFormat::Json);
    assert!(LogFormat::from_str("xml").is_err());
}

#[test]
fn test_log_format_variants() {
    assert_eq!(LogFormat::variants(), &["compact", "pretty", "json"]);
}

#[test]
fn test_env_variable_names() {
    assert_eq!(LOG_LEVEL_ENV, "JAVAPUML_LOG_LEVEL");
    assert_eq!(LOG_FORMAT_ENV, "JAVAPUML_LOG_FORMAT");
}

#[test]
fn test_init_logging_with_levels_and_formats() {
    // Only the first call can install the global subscriber; the rest must fail gracefully
    let _ = init_logging(Some("debug"), Some("compact"));
    let _ = init_logging(Some("warn"), Some("pretty"));
    let _ = init_logging(Some("off"), Some("json"));
    assert!(init_logging(Some("info"), Some("compact")).is_err());
}

#[test]
fn test_init_logging_rejects_unknown_format() {
    let error = init_logging(Some("info"), Some("xml")).unwrap_err();
    assert!(error.to_string().contains("Invalid log format"));
}

#[test]
fn test_logging_during_generation() {
    let _ = init_logging(Some("trace"), Some("compact"));
    let output = javapuml::render("class Order { Customer customer; }").unwrap();
    assert!(output.contains("Order - Customer"));
}

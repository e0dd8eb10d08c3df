//! Logging infrastructure for diagram generation
//!
//! This module provides structured logging using the `tracing` crate.
//! It supports configurable log levels and formats.
//!
//! # Usage
//!
//! ```rust
//! use javapuml::core::logging::init_logging;
//!
//! // Initialize with default settings
//! let _ = init_logging(None, None);
//!
//! // Or with custom level and format
//! let _ = init_logging(Some("debug"), Some("pretty"));
//! ```
//!
//! # Log Formats
//!
//! - `compact`: Single-line format, good for batch runs
//! - `pretty`: Multi-line format with colors, good for development
//! - `json`: JSON format, good for log aggregation systems
//!
//! # Environment Variables
//!
//! - `JAVAPUML_LOG_LEVEL`: Set log level (trace|debug|info|warn|error|off)
//! - `JAVAPUML_LOG_FORMAT`: Set log format (compact|pretty|json)
//! - `RUST_LOG`: Standard `tracing-subscriber` filter directives
//!
//! # Filtering Logs
//!
//! ```bash
//! # Show only Java parser logs at debug level
//! RUST_LOG="javapuml::plugins::java=debug" javapuml generate ./app
//!
//! # Trace association inference while keeping everything else at info
//! RUST_LOG="info,javapuml::plugins::plantuml::builder=trace" javapuml generate ./app
//! ```

use std::str::FromStr;

use tracing::Subscriber;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

/// Environment variable consulted for the log level
pub const LOG_LEVEL_ENV: &str = "JAVAPUML_LOG_LEVEL";

/// Environment variable consulted for the log format
pub const LOG_FORMAT_ENV: &str = "JAVAPUML_LOG_FORMAT";

/// Log format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Compact single-line format
    Compact,
    /// Pretty multi-line format with colors
    Pretty,
    /// JSON format for log aggregation
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

impl LogFormat {
    /// Get all valid format names
    pub fn variants() -> &'static [&'static str] {
        &["compact", "pretty", "json"]
    }
}

/// Initialize the tracing subscriber with the given log level and format
///
/// * `level` - log level or filter directive. When `None`, falls back to
///   `JAVAPUML_LOG_LEVEL`, then `RUST_LOG`, then `info`. An explicit level is
///   never overridden by the environment.
/// * `format` - compact|pretty|json. Falls back to `JAVAPUML_LOG_FORMAT`, then `compact`.
///
/// Logs are written to stderr so that `generate -o -` can stream the diagram on stdout.
///
/// Returns an error if the format is unknown or a global subscriber is already set.
pub fn init_logging(
    level: Option<&str>,
    format: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let format = match format {
        Some(name) => name.to_string(),
        None => std::env::var(LOG_FORMAT_ENV).unwrap_or_else(|_| "compact".to_string()),
    };
    let format = LogFormat::from_str(&format).map_err(|e| format!("Invalid log format: {}", e))?;

    Registry::default()
        .with(level_filter(&resolve_level(level)))
        .with(stderr_layer(format))
        .try_init()?;
    Ok(())
}

fn resolve_level(level: Option<&str>) -> String {
    level
        .map(str::to_string)
        .or_else(|| std::env::var(LOG_LEVEL_ENV).ok())
        .or_else(|| std::env::var(EnvFilter::DEFAULT_ENV).ok())
        .unwrap_or_else(|| "info".to_string())
}

/// Filter for a level or directive string; unparsable input means `info`
fn level_filter(directives: &str) -> EnvFilter {
    EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new("info"))
}

fn stderr_layer<S>(format: LogFormat) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    let layer = fmt::layer().with_writer(std::io::stderr);
    match format {
        LogFormat::Compact => layer.compact().with_target(false).boxed(),
        LogFormat::Pretty => layer
            .pretty()
            .with_file(true)
            .with_line_number(true)
            .with_span_events(FmtSpan::ACTIVE)
            .boxed(),
        LogFormat::Json => layer
            .json()
            .with_file(true)
            .with_line_number(true)
            .with_span_events(FmtSpan::ACTIVE)
            .boxed(),
    }
}

/// Initialize logging with default settings (info level, compact format)
pub fn init_default_logging() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(None, None)
}

//! Core error types for diagram generation
//!
//! This module defines the error types shared by the Java front-end, the
//! source discovery step, and the PlantUML renderer.

use std::path::PathBuf;

use thiserror::Error;

/// Core error types for diagram generation
#[derive(Error, Debug)]
pub enum DiagramError {
    #[error("Parse error: {message} at line {line}, column {column}")]
    ParseError {
        message: String,
        line: usize,
        column: usize,
    },

    #[error("Discovery error in '{}': {message}", path.display())]
    DiscoveryError { path: PathBuf, message: String },

    #[error("Render error: {message}")]
    RenderError { message: String },

    #[error("IO error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

impl DiagramError {
    /// Create a new parse error
    pub fn parse_error(message: String, line: usize, column: usize) -> Self {
        Self::ParseError {
            message,
            line,
            column,
        }
    }

    /// Create a parse error located at a byte offset of `source`
    ///
    /// Lines and columns are 1-based; columns count characters, not bytes.
    pub fn parse_error_at(message: impl Into<String>, source: &str, offset: usize) -> Self {
        let (line, column) = line_column(source, offset);
        Self::parse_error(message.into(), line, column)
    }

    /// Create a new discovery error
    pub fn discovery_error(path: impl Into<PathBuf>, message: String) -> Self {
        Self::DiscoveryError {
            path: path.into(),
            message,
        }
    }

    /// Create a new render error
    pub fn render_error(message: String) -> Self {
        Self::RenderError { message }
    }
}

fn line_column(source: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(source.len());
    let before = source.get(..offset).unwrap_or(source);
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error() {
        let error = DiagramError::parse_error("Invalid syntax".to_string(), 5, 10);
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("Parse error"));
        assert!(error_msg.contains("Invalid syntax"));
        assert!(error_msg.contains("line 5"));
        assert!(error_msg.contains("column 10"));
    }

    #[test]
    fn test_parse_error_at_offset() {
        let source = "class A {\n  int x\n}";
        let offset = source.find('}').unwrap();
        match DiagramError::parse_error_at("expected ';'", source, offset) {
            DiagramError::ParseError { line, column, .. } => {
                assert_eq!(line, 3);
                assert_eq!(column, 1);
            }
            other => panic!("Expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_error_at_end_of_input() {
        let source = "class A {";
        match DiagramError::parse_error_at("unexpected end of input", source, 999) {
            DiagramError::ParseError { line, column, .. } => {
                assert_eq!(line, 1);
                assert_eq!(column, 10);
            }
            other => panic!("Expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_discovery_error() {
        let error = DiagramError::discovery_error("src/services", "not a directory".to_string());
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("Discovery error"));
        assert!(error_msg.contains("src/services"));
        assert!(error_msg.contains("not a directory"));
    }

    #[test]
    fn test_render_error() {
        let error = DiagramError::render_error("Render failed".to_string());
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("Render error"));
        assert!(error_msg.contains("Render failed"));
    }

    #[test]
    fn test_io_error_conversion() {
        use std::io;
        let io_err = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error: DiagramError = io_err.into();
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("IO error"));
        assert!(error_msg.contains("File not found"));
    }
}

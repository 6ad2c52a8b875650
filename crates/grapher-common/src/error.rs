//! Error types and utilities for Grapher

use thiserror::Error;

/// Result type alias for Grapher operations
pub type Result<T> = std::result::Result<T, GrapherError>;

/// Main error type for Grapher operations
#[derive(Error, Debug)]
pub enum GrapherError {
    /// Input that is not JSON, or JSON whose shape cannot describe a graph
    #[error("Malformed input: {message}")]
    MalformedInput {
        message: String,
        field: Option<String>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A series style token that cannot be interpreted
    #[error("Style error: {message} (in {token:?})")]
    Style { message: String, token: String },

    /// Graph generation and plotting errors
    #[error("Graph error: {message}")]
    Graph {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Option values that parse but cannot be used
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },
}

impl GrapherError {
    /// Create a new malformed input error
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedInput {
            message: msg.into(),
            field: None,
            source: None,
        }
    }

    /// Create a new malformed input error naming the offending field
    pub fn malformed_field(msg: impl Into<String>, field: impl Into<String>) -> Self {
        Self::MalformedInput {
            message: msg.into(),
            field: Some(field.into()),
            source: None,
        }
    }

    /// Create a new malformed input error with source
    pub fn malformed_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::MalformedInput {
            message: msg.into(),
            field: None,
            source: Some(Box::new(source)),
        }
    }

    /// Create a new style error for the given token
    pub fn style(msg: impl Into<String>, token: impl Into<String>) -> Self {
        Self::Style {
            message: msg.into(),
            token: token.into(),
        }
    }

    /// Create a new graph error
    pub fn graph(msg: impl Into<String>) -> Self {
        Self::Graph {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new graph error with source
    pub fn graph_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Graph {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new validation error with field name
    pub fn validation_field(msg: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: Some(field.into()),
        }
    }

    /// Returns true for errors caused by the input document rather than rendering.
    #[must_use]
    pub const fn is_malformed_input(&self) -> bool {
        matches!(self, Self::MalformedInput { .. })
    }

    /// The field an error is attributed to, when known.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MalformedInput { field, .. } | Self::Validation { field, .. } => {
                field.as_deref()
            }
            _ => None,
        }
    }
}

/// Convert from `serde_json::Error` to `GrapherError`
impl From<serde_json::Error> for GrapherError {
    fn from(err: serde_json::Error) -> Self {
        Self::malformed_with_source("invalid JSON document", err)
    }
}

#[cfg(feature = "plotters")]
/// Convert from plotters drawing errors to `GrapherError`
impl<T> From<plotters::drawing::DrawingAreaErrorKind<T>> for GrapherError
where
    T: std::error::Error + Send + Sync + 'static,
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<T>) -> Self {
        Self::graph_with_source("Graph rendering failed", err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{error::Error, io};

    #[test]
    fn test_error_creation() {
        let malformed = GrapherError::malformed_field("not a number", "th");
        assert!(malformed.to_string().contains("Malformed input"));
        assert!(malformed.to_string().contains("not a number"));
        assert_eq!(malformed.field(), Some("th"));
        assert!(malformed.is_malformed_input());

        let style = GrapherError::style("unrecognized character 'q'", "kq");
        assert_eq!(
            style.to_string(),
            "Style error: unrecognized character 'q' (in \"kq\")"
        );
        assert!(!style.is_malformed_input());

        let validation = GrapherError::validation_field("bad format", "tick_formatstr");
        assert!(validation.to_string().contains("Validation error"));
        assert_eq!(validation.field(), Some("tick_formatstr"));
    }

    #[test]
    fn test_error_with_source() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "font missing");
        let wrapped = GrapherError::graph_with_source("Failed to draw text", io_error);

        assert!(wrapped.to_string().contains("Failed to draw text"));
        assert!(wrapped.source().is_some());
        assert_eq!(wrapped.field(), None);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error: GrapherError = io_error.into();

        assert!(error.to_string().contains("I/O error"));
        assert!(error.source().is_some());
    }

    #[test]
    fn test_serde_error_is_malformed_input() {
        let serde_error = serde_json::from_str::<serde_json::Value>("{\"a\": }").unwrap_err();
        let error: GrapherError = serde_error.into();

        assert!(error.is_malformed_input());
        assert!(error.to_string().contains("invalid JSON document"));
        assert!(error.source().is_some());
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_error() -> Result<String> {
            Err(GrapherError::graph("failure"))
        }

        let error = returns_error().unwrap_err();
        assert_eq!(error.to_string(), "Graph error: failure");
    }
}

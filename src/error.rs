use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error type for the restocheck core.
/// All fallible functions return Result<T, DiagError> instead of String errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagError {
    pub message: String,
    pub stage: String,
    pub context: Option<String>,
    pub source: Option<String>,
}

impl DiagError {
    /// Create a new error with stage and message
    pub fn new<S: Into<String>>(message: S, stage: &'static str) -> Self {
        DiagError {
            message: message.into(),
            stage: stage.to_string(),
            context: None,
            source: None,
        }
    }

    /// Add additional context information
    pub fn with_context<S: Into<String>>(mut self, context: S) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Add source error information
    pub fn with_source<S: Into<String>>(mut self, source: S) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl fmt::Display for DiagError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.stage, self.message)?;
        if let Some(ref context) = self.context {
            write!(f, " (context: {})", context)?;
        }
        if let Some(ref source) = self.source {
            write!(f, " (source: {})", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for DiagError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

impl From<anyhow::Error> for DiagError {
    fn from(err: anyhow::Error) -> Self {
        DiagError::new(err.to_string(), "unknown").with_source("anyhow")
    }
}

impl From<std::io::Error> for DiagError {
    fn from(err: std::io::Error) -> Self {
        DiagError::new(format!("I/O error: {}", err), "io").with_source("std::io")
    }
}

impl From<serde_json::Error> for DiagError {
    fn from(err: serde_json::Error) -> Self {
        DiagError::new(format!("JSON error: {}", err), "json_parse").with_source("serde_json")
    }
}

impl From<reqwest::Error> for DiagError {
    fn from(err: reqwest::Error) -> Self {
        DiagError::new(format!("HTTP error: {}", err), "sync").with_source("reqwest")
    }
}

//! Error types for the thumbduel analysis core.
//!
//! Analysis errors are organized by failure class so callers can tell
//! "input incomplete" from "not configured" from "call failed" without
//! string matching.

use thiserror::Error;

/// Top-level error type for thumbduel operations.
#[derive(Error, Debug)]
pub enum ThumbduelError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Analysis call errors
    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Errors from a single analysis call, organized by failure class.
///
/// The core performs no retries and no fallback degradation; every
/// variant propagates unchanged to the caller.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// A request field was empty; raised before any network I/O
    #[error("Incomplete input: {field} is empty")]
    IncompleteInput { field: &'static str },

    /// No credential found in any resolver source
    #[error("No API credential configured. Set one with `thumbduel key set` or the GEMINI_API_KEY env var.")]
    MissingCredential,

    /// Network/connectivity/service error from the external call
    #[error("Transport failure{}: {message}", status_label(.status_code))]
    Transport {
        message: String,
        status_code: Option<u16>,
    },

    /// Credential rejected by the service; distinct from generic transport
    /// failure so callers can direct users toward key reconfiguration
    #[error("Authentication rejected (HTTP {status_code}): {message}")]
    Authentication { message: String, status_code: u16 },

    /// Response text failed JSON parsing or schema validation
    #[error("Malformed response from analysis service: {message}")]
    MalformedResponse { message: String },

    /// The deadline on the single suspension point expired
    #[error("Analysis timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },
}

fn status_label(status_code: &Option<u16>) -> String {
    match status_code {
        Some(code) => format!(" (HTTP {code})"),
        None => String::new(),
    }
}

/// Convenience type alias for thumbduel results.
pub type Result<T> = std::result::Result<T, ThumbduelError>;

/// Convenience type alias for analysis-call results.
pub type CallResult<T> = std::result::Result<T, AnalysisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_message_includes_status() {
        let err = AnalysisError::Transport {
            message: "service unavailable".to_string(),
            status_code: Some(503),
        };
        assert!(err.to_string().contains("HTTP 503"));
    }

    #[test]
    fn test_transport_message_without_status() {
        let err = AnalysisError::Transport {
            message: "connection refused".to_string(),
            status_code: None,
        };
        assert!(!err.to_string().contains("HTTP"));
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_incomplete_input_names_field() {
        let err = AnalysisError::IncompleteInput { field: "title_a" };
        assert!(err.to_string().contains("title_a"));
    }
}

//! Error types for raph-bench operations.
//!
//! Defines error types for each subsystem:
//! - Process configuration (credentials, endpoints)
//! - Chat-completions endpoint calls
//! - Dataset and task-file loading
//!
//! A missed answer extraction is not an error; extractors return `None` and the
//! item is scored as incorrect.

use thiserror::Error;

/// Errors raised while reading process configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing {0} in environment.")]
    MissingCredential(&'static str),

    #[error("Invalid credential: {0}")]
    InvalidCredential(String),
}

/// Errors that can occur while calling the chat-completions endpoint.
///
/// Every variant is fatal for the run: the scoring loop does not retry and does
/// not score a failed call as incorrect.
#[derive(Debug, Error)]
pub enum EndpointError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(String),

    #[error("Request failed ({code}): {body}")]
    Status { code: u16, body: String },

    #[error("Unexpected response shape: {0}")]
    UnexpectedShape(String),

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),
}

impl EndpointError {
    /// True for network-level and status failures, false for malformed payloads.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            EndpointError::RequestFailed(_) | EndpointError::Status { .. }
        )
    }
}

/// Errors that can occur while loading questions or tool tasks.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    #[error("Failed to parse dataset response: {0}")]
    ParseError(String),

    #[error("Invalid dataset item: {0}")]
    InvalidItem(String),

    #[error("Invalid task on line {line}: {reason}")]
    InvalidTaskLine { line: usize, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

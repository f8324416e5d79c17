//! Error types for Courier.

use thiserror::Error;

use crate::service::wire::RunStatus;

/// Primary error type for all Courier operations.
#[derive(Error, Debug)]
pub enum CourierError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unknown tool: {name}")]
    UnknownTool { name: String },

    #[error("Invalid tool arguments: {0}")]
    InvalidArguments(String),

    #[error("Run {run_id} is still active on this thread")]
    RunInProgress { run_id: String },

    #[error("Malformed run state: {0}")]
    MalformedState(String),

    #[error("Transcript has no assistant message to extract")]
    EmptyTranscript,

    #[error("Run ended in terminal status `{status}`")]
    RemoteTerminal { status: RunStatus },

    #[error("Run did not resolve within {elapsed_ms}ms")]
    Timeout { elapsed_ms: u64 },

    #[error("Run cancelled by caller")]
    Cancelled,
}

impl CourierError {
    /// Create an API error from a status code and response body.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Whether this error means the remote run reached a terminal failure
    /// state (as opposed to a local or transport fault).
    pub fn is_remote_terminal(&self) -> bool {
        matches!(self, Self::RemoteTerminal { .. })
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, CourierError>;

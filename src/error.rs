// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipelineError>;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Upstream returned no content: {0}")]
    UpstreamEmpty(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Audit log operation failed for {path}: {source}")]
    AuditLog {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PipelineError {
    /// Transport-level failures are worth a retry on the next poll; the rest are not.
    pub fn is_transient(&self) -> bool {
        matches!(self, PipelineError::Network(_))
    }
}

impl From<reqwest::Error> for PipelineError {
    fn from(err: reqwest::Error) -> Self {
        let err = err.without_url();
        if err.is_decode() {
            PipelineError::Parse(err.to_string())
        } else {
            PipelineError::Network(err.to_string())
        }
    }
}

//! Submission transport errors. Caught per tick, logged, never retried.

use super::error_code::{self, ErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("metrics submission timed out: {url}")]
    Timeout { url: String },

    #[error("failed to connect to metrics server: {url}")]
    ConnectionFailed { url: String, reason: String },

    #[error("failed to submit metrics to {url}: {reason}")]
    Request { url: String, reason: String },

    #[error("failed to encode submission body: {reason}")]
    Encode { reason: String },

    #[error("failed to build HTTP client: {reason}")]
    ClientBuild { reason: String },
}

impl ErrorCode for TransportError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Timeout { .. } => error_code::TRANSPORT_TIMEOUT,
            Self::ConnectionFailed { .. } => error_code::CONNECTION_FAILED,
            Self::Request { .. } | Self::Encode { .. } | Self::ClientBuild { .. } => {
                error_code::TRANSPORT_ERROR
            }
        }
    }
}

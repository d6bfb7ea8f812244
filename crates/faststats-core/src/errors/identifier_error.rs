//! Identifier validation errors.

use super::error_code::{self, ErrorCode};

/// Raised when a chart id or token does not match its pattern.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentifierError {
    #[error("invalid chart id '{value}', must match '{pattern}'")]
    InvalidChartId { value: String, pattern: &'static str },

    /// The token itself is never echoed back.
    #[error("invalid token of length {length}, must match '{pattern}'")]
    InvalidToken { length: usize, pattern: &'static str },
}

impl ErrorCode for IdentifierError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidChartId { .. } => error_code::INVALID_CHART_ID,
            Self::InvalidToken { .. } => error_code::INVALID_TOKEN,
        }
    }
}

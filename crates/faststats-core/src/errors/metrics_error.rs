//! Construction-time errors surfaced synchronously to the host.

use super::error_code::{self, ErrorCode};
use super::{ConfigError, IdentifierError, RegistryError, TransportError};

/// Aggregates setup errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    #[error("identifier error: {0}")]
    Identifier(#[from] IdentifierError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("token must be specified")]
    MissingToken,
}

impl ErrorCode for MetricsError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Identifier(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::Registry(e) => e.error_code(),
            Self::Transport(e) => e.error_code(),
            Self::MissingToken => error_code::MISSING_TOKEN,
        }
    }
}

pub type MetricsResult<T> = Result<T, MetricsError>;

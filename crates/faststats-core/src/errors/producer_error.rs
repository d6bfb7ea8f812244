//! Errors raised by host-supplied chart producers.

use super::error_code::{self, ErrorCode};

/// Boxed error a producer may return.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A chart producer failed. Contained per chart, never fatal to a payload.
#[derive(Debug, thiserror::Error)]
pub enum ProducerError {
    #[error("producer failed: {0}")]
    Failed(#[source] BoxError),

    #[error("producer panicked: {message}")]
    Panicked { message: String },
}

impl ProducerError {
    /// Build a `Panicked` error from a `catch_unwind` payload.
    pub fn from_panic(payload: Box<dyn std::any::Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic payload".to_string()
        };
        Self::Panicked { message }
    }
}

impl ErrorCode for ProducerError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Failed(_) => error_code::PRODUCER_FAILED,
            Self::Panicked { .. } => error_code::PRODUCER_PANICKED,
        }
    }
}

use super::error_code::{self, ErrorCode};

/// Chart registration errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("chart already added: {id}")]
    DuplicateChartId { id: String },
}

impl ErrorCode for RegistryError {
    fn error_code(&self) -> &'static str {
        error_code::DUPLICATE_CHART_ID
    }
}

//! Error handling for FastStats.
//! One error enum per concern, `thiserror` only.

pub mod config_error;
pub mod error_code;
pub mod identifier_error;
pub mod metrics_error;
pub mod producer_error;
pub mod registry_error;
pub mod transport_error;

pub use config_error::ConfigError;
pub use error_code::ErrorCode;
pub use identifier_error::IdentifierError;
pub use metrics_error::{MetricsError, MetricsResult};
pub use producer_error::{BoxError, ProducerError};
pub use registry_error::RegistryError;
pub use transport_error::TransportError;

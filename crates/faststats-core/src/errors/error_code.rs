//! Stable error codes attached to diagnostic events.

pub const INVALID_CHART_ID: &str = "INVALID_CHART_ID";
pub const INVALID_TOKEN: &str = "INVALID_TOKEN";
pub const CONFIG_IO: &str = "CONFIG_IO";
pub const CONFIG_PARSE: &str = "CONFIG_PARSE";
pub const CONFIG_EXISTS: &str = "CONFIG_EXISTS";
pub const DUPLICATE_CHART_ID: &str = "DUPLICATE_CHART_ID";
pub const PRODUCER_FAILED: &str = "PRODUCER_FAILED";
pub const PRODUCER_PANICKED: &str = "PRODUCER_PANICKED";
pub const TRANSPORT_TIMEOUT: &str = "TRANSPORT_TIMEOUT";
pub const CONNECTION_FAILED: &str = "CONNECTION_FAILED";
pub const TRANSPORT_ERROR: &str = "TRANSPORT_ERROR";
pub const MISSING_TOKEN: &str = "MISSING_TOKEN";

/// Maps an error to its stable code.
pub trait ErrorCode {
    fn error_code(&self) -> &'static str;
}

//! Response classification by HTTP status class.

/// What a completed request's status code means for this tick.
///
/// None of the failure classes are retried; the next tick is the only retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseClass {
    /// 200–299.
    Success,
    /// 300–399. Redirects are not followed by the collector protocol.
    Redirect,
    /// 400–499. The request itself was invalid.
    ClientError,
    /// 500–599.
    ServerError,
    /// Anything outside 200–599.
    Unexpected,
}

impl ResponseClass {
    pub fn from_status(status: u16) -> Self {
        match status {
            200..=299 => Self::Success,
            300..=399 => Self::Redirect,
            400..=499 => Self::ClientError,
            500..=599 => Self::ServerError,
            _ => Self::Unexpected,
        }
    }

    pub fn is_success(self) -> bool {
        self == Self::Success
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Redirect => "redirect",
            Self::ClientError => "client_error",
            Self::ServerError => "server_error",
            Self::Unexpected => "unexpected",
        }
    }
}

//! Config store errors. All of them are fatal to facade construction.

use super::error_code::{self, ErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config I/O failed for {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config at {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("config file {path} was created concurrently")]
    AlreadyExists { path: String },

    #[error("failed to serialize config for {path}: {source}")]
    Serialize {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Io { .. } => error_code::CONFIG_IO,
            Self::Parse { .. } | Self::Serialize { .. } => error_code::CONFIG_PARSE,
            Self::AlreadyExists { .. } => error_code::CONFIG_EXISTS,
        }
    }
}

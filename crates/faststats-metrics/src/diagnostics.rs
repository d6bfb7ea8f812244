//! Debug-gated structured log events.
//!
//! The SDK is quiet by default: unless the host or the config file turns
//! debug on, none of these emit anything. Each event carries an `event`
//! field plus the ids, status codes, and error codes needed to diagnose it.

use faststats_core::constants::VERSION;
use faststats_core::errors::{ErrorCode, ProducerError, TransportError};
use faststats_core::Chart;

use crate::classify::ResponseClass;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Diagnostics {
    enabled: bool,
}

impl Diagnostics {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn quiet() -> Self {
        Self::new(false)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn submission_started(&self) {
        if !self.enabled {
            return;
        }
        tracing::info!(
            event = "submission_started",
            sdk_version = VERSION,
            "starting metrics submission"
        );
    }

    pub fn submission_disabled(&self) {
        if !self.enabled {
            return;
        }
        tracing::warn!(
            event = "submission_disabled",
            "metrics disabled, not starting submission"
        );
    }

    pub fn already_submitting(&self) {
        if !self.enabled {
            return;
        }
        tracing::warn!(
            event = "already_submitting",
            "metrics already submitting, not starting again"
        );
    }

    pub fn submission_stopped(&self) {
        if !self.enabled {
            return;
        }
        tracing::info!(event = "submission_stopped", "shutting down metrics submission");
    }

    pub fn worker_spawn_failed(&self, error: &std::io::Error) {
        if !self.enabled {
            return;
        }
        tracing::error!(
            event = "worker_spawn_failed",
            error = %error,
            "failed to spawn metrics submission thread"
        );
    }

    pub fn chart_failed(&self, chart: &Chart, error: &ProducerError) {
        if !self.enabled {
            return;
        }
        tracing::error!(
            event = "chart_failed",
            chart_id = %chart.id(),
            chart_kind = chart.kind().as_str(),
            code = error.error_code(),
            error = %error,
            "failed to build chart data"
        );
    }

    pub fn sending(&self, url: &str, json: &str, compressed_len: usize) {
        if !self.enabled {
            return;
        }
        tracing::info!(
            event = "submission_sending",
            url = %url,
            uncompressed = %json,
            uncompressed_len = json.len(),
            compressed_len = compressed_len,
            "sending metrics"
        );
    }

    pub fn response(&self, status: u16, body: &str, class: ResponseClass) {
        if !self.enabled {
            return;
        }
        let class_name = class.as_str();
        match class {
            ResponseClass::Success => tracing::info!(
                event = "submission_response",
                class = class_name,
                status = status,
                body = %body,
                "metrics submitted"
            ),
            ResponseClass::Redirect => tracing::warn!(
                event = "submission_response",
                class = class_name,
                status = status,
                body = %body,
                "received redirect response from metrics server"
            ),
            ResponseClass::ClientError => tracing::error!(
                event = "submission_response",
                class = class_name,
                status = status,
                body = %body,
                "submitted invalid request to metrics server"
            ),
            ResponseClass::ServerError => tracing::error!(
                event = "submission_response",
                class = class_name,
                status = status,
                body = %body,
                "received server error response from metrics server"
            ),
            ResponseClass::Unexpected => tracing::warn!(
                event = "submission_response",
                class = class_name,
                status = status,
                body = %body,
                "received unexpected response from metrics server"
            ),
        }
    }

    pub fn transport_failed(&self, error: &TransportError) {
        if !self.enabled {
            return;
        }
        match error {
            TransportError::Timeout { url } => tracing::error!(
                event = "submission_timeout",
                code = error.error_code(),
                url = %url,
                "metrics submission timed out"
            ),
            TransportError::ConnectionFailed { url, .. } => tracing::error!(
                event = "submission_connect_failed",
                code = error.error_code(),
                url = %url,
                "failed to connect to metrics server"
            ),
            _ => tracing::error!(
                event = "submission_failed",
                code = error.error_code(),
                error = %error,
                "failed to submit metrics"
            ),
        }
    }

    pub fn encode_failed(&self, reason: &str) {
        if !self.enabled {
            return;
        }
        tracing::error!(
            event = "submission_encode_failed",
            reason = %reason,
            "failed to encode metrics payload"
        );
    }

    pub fn tick_panicked(&self, message: &str) {
        if !self.enabled {
            return;
        }
        tracing::error!(
            event = "submission_panicked",
            message = %message,
            "metrics submission panicked"
        );
    }
}

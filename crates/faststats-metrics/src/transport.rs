//! HTTP transport to the collector.
//!
//! One long-lived blocking client per facade. No retries and no backoff: a
//! failed request is reported once and the next tick is the only retry.

use faststats_core::constants::{CONNECT_TIMEOUT, REQUEST_TIMEOUT, USER_AGENT};
use faststats_core::errors::TransportError;
use faststats_core::Token;
use reqwest::header::{CONTENT_ENCODING, CONTENT_TYPE};

use crate::codec::Encoding;

/// A compressed payload ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRequest {
    pub body: Vec<u8>,
    pub encoding: Encoding,
}

/// Status and body of a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

/// Delivers a submission. Implementations must not retry.
pub trait Transport: Send + Sync {
    fn send(&self, request: SubmissionRequest) -> Result<TransportResponse, TransportError>;

    /// Where requests go, for log messages.
    fn target(&self) -> &str;
}

/// `Transport` over `reqwest::blocking`.
///
/// The blocking client owns an internal runtime, so it must not be created
/// or dropped from inside an async runtime context.
#[derive(Debug)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    url: String,
    token: Token,
}

impl HttpTransport {
    pub fn new(url: impl Into<String>, token: Token) -> Result<Self, TransportError> {
        let client = reqwest::blocking::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::none())
            .http1_only()
            .build()
            .map_err(|e| TransportError::ClientBuild {
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            url: url.into(),
            token,
        })
    }

    fn map_error(&self, err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout {
                url: self.url.clone(),
            }
        } else if err.is_connect() {
            TransportError::ConnectionFailed {
                url: self.url.clone(),
                reason: err.to_string(),
            }
        } else {
            TransportError::Request {
                url: self.url.clone(),
                reason: err.to_string(),
            }
        }
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: SubmissionRequest) -> Result<TransportResponse, TransportError> {
        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_ENCODING, request.encoding.content_encoding())
            .header(CONTENT_TYPE, "application/octet-stream")
            .bearer_auth(self.token.expose())
            .body(request.body)
            .send()
            .map_err(|e| self.map_error(e))?;

        let status = response.status().as_u16();
        let body = response.text().map_err(|e| self.map_error(e))?;
        Ok(TransportResponse { status, body })
    }

    fn target(&self) -> &str {
        &self.url
    }
}

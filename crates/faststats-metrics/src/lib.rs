//! # faststats-metrics
//!
//! Embeddable telemetry client. Hosts register charts on a [`Metrics`] facade;
//! a single background worker periodically evaluates them, compresses the
//! JSON payload, and POSTs it to the collector. Submission is fire-and-forget:
//! nothing that happens inside a tick reaches the host.

pub mod classify;
pub mod codec;
pub mod diagnostics;
pub mod environment;
pub mod facade;
pub mod payload;
pub mod registry;
pub mod submitter;
pub mod tracing_setup;
pub mod transport;

pub use classify::ResponseClass;
pub use codec::Encoding;
pub use diagnostics::Diagnostics;
pub use environment::EnvironmentFacts;
pub use facade::{Metrics, MetricsBuilder};
pub use payload::{Payload, PayloadBuilder};
pub use registry::ChartRegistry;
pub use submitter::{SubmissionOutcome, Submitter, SubmitterOptions};
pub use transport::{HttpTransport, SubmissionRequest, Transport, TransportResponse};

pub use faststats_core::{Chart, ChartId, MetricsConfig, MetricsError, MetricsResult, Token};

//! `Metrics` facade and its builder: the surface platform adapters talk to.

use std::path::Path;
use std::sync::Arc;

use faststats_core::constants::{
    DEFAULT_COLLECTOR_URL, DEFAULT_INITIAL_DELAY, DEFAULT_SUBMISSION_PERIOD,
};
use faststats_core::errors::RegistryError;
use faststats_core::{Chart, MetricsConfig, MetricsError, MetricsResult, Token};

use crate::codec::Encoding;
use crate::payload::Payload;
use crate::registry::ChartRegistry;
use crate::submitter::{SubmissionOutcome, Submitter, SubmitterOptions};
use crate::transport::{HttpTransport, Transport};

/// One telemetry client: a chart registry plus its background submitter.
///
/// Adapters register charts, call [`start`](Self::start) once the host is up
/// and [`shutdown`](Self::shutdown) on teardown. Nothing that goes wrong
/// inside a submission is reported back here.
pub struct Metrics {
    registry: Arc<ChartRegistry>,
    config: MetricsConfig,
    token: Token,
    url: String,
    debug: bool,
    submitter: Submitter,
}

impl Metrics {
    pub fn builder() -> MetricsBuilder {
        MetricsBuilder::new()
    }

    /// Register a chart. Charts added after `start` show up from the next tick.
    pub fn add_chart(&self, chart: Chart) -> Result<(), RegistryError> {
        self.registry.add(chart)
    }

    /// Begin periodic submission: first tick immediately, then every 30 minutes.
    ///
    /// No-op (returns `false`) when disabled in the config or already running.
    pub fn start(&self) -> bool {
        self.submitter
            .start(DEFAULT_INITIAL_DELAY, DEFAULT_SUBMISSION_PERIOD)
    }

    /// Stop periodic submission. Idempotent.
    pub fn shutdown(&self) {
        self.submitter.shutdown();
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Builder debug flag OR config debug flag.
    pub fn is_debug(&self) -> bool {
        self.debug || self.config.debug
    }

    pub fn is_submitting(&self) -> bool {
        self.submitter.is_submitting()
    }

    pub fn config(&self) -> &MetricsConfig {
        &self.config
    }

    pub fn token(&self) -> &Token {
        &self.token
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn chart_count(&self) -> usize {
        self.registry.len()
    }

    /// The payload the next tick would send, built now.
    pub fn build_payload(&self) -> Payload {
        self.submitter.build_payload()
    }

    /// Run one tick on the calling thread, regardless of the schedule.
    pub fn submit_now(&self) -> SubmissionOutcome {
        self.submitter.submit_once()
    }

    /// Ticks run so far, scheduled or manual.
    pub fn ticks(&self) -> u64 {
        self.submitter.ticks()
    }
}

impl std::fmt::Debug for Metrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Metrics")
            .field("config", &self.config)
            .field("url", &self.url)
            .field("debug", &self.debug)
            .field("charts", &self.registry.len())
            .field("submitting", &self.is_submitting())
            .finish()
    }
}

/// Collects charts and settings, then produces a [`Metrics`].
pub struct MetricsBuilder {
    registry: ChartRegistry,
    token: Option<Token>,
    url: String,
    debug: bool,
    encoding: Encoding,
    transport: Option<Arc<dyn Transport>>,
}

impl MetricsBuilder {
    pub fn new() -> Self {
        Self {
            registry: ChartRegistry::new(),
            token: None,
            url: DEFAULT_COLLECTOR_URL.to_string(),
            debug: false,
            encoding: Encoding::default(),
            transport: None,
        }
    }

    pub fn add_chart(self, chart: Chart) -> Result<Self, RegistryError> {
        self.registry.add(chart)?;
        Ok(self)
    }

    pub fn token(mut self, token: Token) -> Self {
        self.token = Some(token);
        self
    }

    /// Override the collector URL.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Send through `transport` instead of an HTTP client for `url`.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Load (or create) the config file at `config_path` and build.
    ///
    /// The token is checked first so a missing token never creates the file.
    pub fn build(self, config_path: impl AsRef<Path>) -> MetricsResult<Metrics> {
        if self.token.is_none() {
            return Err(MetricsError::MissingToken);
        }
        let config = MetricsConfig::load(config_path)?;
        self.build_with_config(config)
    }

    /// Build with an already loaded config; no file is touched.
    pub fn build_with_config(self, config: MetricsConfig) -> MetricsResult<Metrics> {
        let token = self.token.ok_or(MetricsError::MissingToken)?;
        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::new(self.url.clone(), token.clone())?),
        };

        let registry = Arc::new(self.registry);
        let options = SubmitterOptions {
            encoding: self.encoding,
            debug: self.debug,
            environment: None,
        };
        let submitter =
            Submitter::with_options(Arc::clone(&registry), config.clone(), transport, options);

        Ok(Metrics {
            registry,
            config,
            token,
            url: self.url,
            debug: self.debug,
            submitter,
        })
    }
}

impl std::fmt::Debug for MetricsBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricsBuilder")
            .field("charts", &self.registry.len())
            .field("token", &self.token)
            .field("url", &self.url)
            .field("debug", &self.debug)
            .field("encoding", &self.encoding)
            .field("transport", &self.transport.as_ref().map(|t| t.target()))
            .finish()
    }
}

impl Default for MetricsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

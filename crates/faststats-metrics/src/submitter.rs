//! Submitter: owns the single background worker and runs submission ticks.
//!
//! States: idle (no worker) and scheduled (worker alive). A tick runs on the
//! worker thread and the next deadline is only awaited after it returns, so
//! there is never more than one request in flight. Dropping the stop sender
//! ends the worker at its next wake-up; an in-flight request is left to finish
//! on its own timeout.

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use faststats_core::constants::WORKER_THREAD_NAME;
use faststats_core::errors::{ProducerError, TransportError};
use faststats_core::MetricsConfig;

use crate::classify::ResponseClass;
use crate::codec::Encoding;
use crate::diagnostics::Diagnostics;
use crate::environment::EnvironmentFacts;
use crate::payload::{Payload, PayloadBuilder};
use crate::registry::ChartRegistry;
use crate::transport::{SubmissionRequest, Transport};

/// Result of one tick. Logged and returned, never raised.
#[derive(Debug)]
pub enum SubmissionOutcome {
    /// The collector answered 2xx.
    Delivered { status: u16 },
    /// The collector answered with a non-2xx status.
    Rejected { class: ResponseClass, status: u16 },
    /// No response: timeout, refused connection, or another transport error.
    TransportFailed(TransportError),
    /// The payload could not be serialized or compressed.
    EncodeFailed { reason: String },
    /// Something inside the tick panicked.
    Panicked { message: String },
}

impl SubmissionOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered { .. })
    }
}

/// Settings fixed when the submitter is created.
#[derive(Debug, Clone, Default)]
pub struct SubmitterOptions {
    pub encoding: Encoding,
    /// OR-ed with the config's own `debug` flag.
    pub debug: bool,
    /// Detected from the host when `None`.
    pub environment: Option<EnvironmentFacts>,
}

/// Everything a tick needs. Shared between the owner and the worker thread.
struct Pipeline {
    registry: Arc<ChartRegistry>,
    config: MetricsConfig,
    payloads: PayloadBuilder,
    transport: Arc<dyn Transport>,
    encoding: Encoding,
    diagnostics: Diagnostics,
    ticks: AtomicU64,
    // Held for a whole tick: manual and scheduled ticks, and the workers of
    // successive `start` calls, never overlap.
    tick_lock: Mutex<()>,
}

impl Pipeline {
    fn tick(&self) -> SubmissionOutcome {
        let _guard = self.tick_lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.ticks.fetch_add(1, Ordering::Relaxed);
        panic::catch_unwind(AssertUnwindSafe(|| self.submit())).unwrap_or_else(|payload| {
            let message = match ProducerError::from_panic(payload) {
                ProducerError::Panicked { message } => message,
                other => other.to_string(),
            };
            self.diagnostics.tick_panicked(&message);
            SubmissionOutcome::Panicked { message }
        })
    }

    fn submit(&self) -> SubmissionOutcome {
        let payload = self.payloads.build(&self.registry, &self.config);
        let json = match payload.to_json() {
            Ok(json) => json,
            Err(e) => return self.encode_failed(e.to_string()),
        };
        let body = match self.encoding.compress(json.as_bytes()) {
            Ok(body) => body,
            Err(e) => return self.encode_failed(e.to_string()),
        };

        self.diagnostics
            .sending(self.transport.target(), &json, body.len());

        let request = SubmissionRequest {
            body,
            encoding: self.encoding,
        };
        match self.transport.send(request) {
            Ok(response) => {
                let class = ResponseClass::from_status(response.status);
                self.diagnostics
                    .response(response.status, &response.body, class);
                if class.is_success() {
                    SubmissionOutcome::Delivered {
                        status: response.status,
                    }
                } else {
                    SubmissionOutcome::Rejected {
                        class,
                        status: response.status,
                    }
                }
            }
            Err(e) => {
                self.diagnostics.transport_failed(&e);
                SubmissionOutcome::TransportFailed(e)
            }
        }
    }

    fn encode_failed(&self, reason: String) -> SubmissionOutcome {
        self.diagnostics.encode_failed(&reason);
        SubmissionOutcome::EncodeFailed { reason }
    }
}

struct Worker {
    // Dropping the sender (shutdown, or the submitter itself going away)
    // disconnects the channel and stops the loop.
    _stop: Sender<()>,
    handle: JoinHandle<()>,
}

pub struct Submitter {
    pipeline: Arc<Pipeline>,
    worker: Mutex<Option<Worker>>,
}

impl Submitter {
    pub fn new(
        registry: Arc<ChartRegistry>,
        config: MetricsConfig,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self::with_options(registry, config, transport, SubmitterOptions::default())
    }

    pub fn with_options(
        registry: Arc<ChartRegistry>,
        config: MetricsConfig,
        transport: Arc<dyn Transport>,
        options: SubmitterOptions,
    ) -> Self {
        let diagnostics = Diagnostics::new(options.debug || config.debug);
        let environment = options.environment.unwrap_or_else(EnvironmentFacts::detect);
        Self {
            pipeline: Arc::new(Pipeline {
                registry,
                config,
                payloads: PayloadBuilder::new(environment, diagnostics),
                transport,
                encoding: options.encoding,
                diagnostics,
                ticks: AtomicU64::new(0),
                tick_lock: Mutex::new(()),
            }),
            worker: Mutex::new(None),
        }
    }

    /// Arm the worker: first tick after `initial_delay`, then every `period`.
    ///
    /// Returns `false` without doing anything when submission is disabled in
    /// the config or a worker is already running.
    pub fn start(&self, initial_delay: Duration, period: Duration) -> bool {
        let diagnostics = self.pipeline.diagnostics;
        if !self.pipeline.config.enabled {
            diagnostics.submission_disabled();
            return false;
        }

        let mut worker = self.lock_worker();
        if worker.as_ref().is_some_and(|w| !w.handle.is_finished()) {
            diagnostics.already_submitting();
            return false;
        }

        let (stop_tx, stop_rx) = crossbeam_channel::bounded::<()>(1);
        let pipeline = Arc::clone(&self.pipeline);
        let spawned = thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_string())
            .spawn(move || run_worker(&pipeline, &stop_rx, initial_delay, period));

        match spawned {
            Ok(handle) => {
                diagnostics.submission_started();
                *worker = Some(Worker {
                    _stop: stop_tx,
                    handle,
                });
                true
            }
            Err(e) => {
                diagnostics.worker_spawn_failed(&e);
                false
            }
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.lock_worker()
            .as_ref()
            .is_some_and(|w| !w.handle.is_finished())
    }

    /// Stop scheduling further ticks. Safe to call when idle.
    pub fn shutdown(&self) {
        self.pipeline.diagnostics.submission_stopped();
        self.lock_worker().take();
    }

    /// Run one tick on the calling thread. Waits for a scheduled tick that is
    /// already in flight.
    pub fn submit_once(&self) -> SubmissionOutcome {
        self.pipeline.tick()
    }

    /// Ticks run so far, scheduled or manual.
    pub fn ticks(&self) -> u64 {
        self.pipeline.ticks.load(Ordering::Relaxed)
    }

    pub fn build_payload(&self) -> Payload {
        self.pipeline
            .payloads
            .build(&self.pipeline.registry, &self.pipeline.config)
    }

    fn lock_worker(&self) -> MutexGuard<'_, Option<Worker>> {
        self.worker.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn run_worker(
    pipeline: &Pipeline,
    stop: &Receiver<()>,
    initial_delay: Duration,
    period: Duration,
) {
    let mut next = Instant::now() + initial_delay;
    loop {
        match stop.recv_deadline(next) {
            Err(RecvTimeoutError::Timeout) => {
                pipeline.tick();
                next += period;
                // Late ticks run immediately instead of piling up.
                let now = Instant::now();
                if next < now {
                    next = now;
                }
            }
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
        }
    }
}

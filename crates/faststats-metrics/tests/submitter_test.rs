//! Scheduler behavior through an in-memory transport.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use faststats_core::errors::TransportError;
use faststats_core::Chart;
use faststats_metrics::{
    ChartRegistry, Encoding, EnvironmentFacts, MetricsConfig, Payload, ResponseClass,
    SubmissionOutcome, SubmissionRequest, Submitter, SubmitterOptions, Transport,
    TransportResponse,
};
use uuid::Uuid;

const PERIOD: Duration = Duration::from_millis(100);

enum Step {
    Status(u16),
    Timeout,
    Refused,
    Panic,
}

/// Replays scripted results, then answers 200 forever. Records every request.
#[derive(Default)]
struct ScriptedTransport {
    script: Mutex<VecDeque<Step>>,
    sent: Mutex<Vec<(Instant, SubmissionRequest)>>,
}

impl ScriptedTransport {
    fn with_script(steps: impl IntoIterator<Item = Step>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(steps.into_iter().collect()),
            sent: Mutex::default(),
        })
    }

    fn always_ok() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn requests(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    fn send_times(&self) -> Vec<Instant> {
        self.sent.lock().unwrap().iter().map(|(at, _)| *at).collect()
    }

    fn last_request(&self) -> SubmissionRequest {
        self.sent.lock().unwrap().last().unwrap().1.clone()
    }
}

impl Transport for ScriptedTransport {
    fn send(&self, request: SubmissionRequest) -> Result<TransportResponse, TransportError> {
        self.sent.lock().unwrap().push((Instant::now(), request));
        let step = self.script.lock().unwrap().pop_front();
        match step.unwrap_or(Step::Status(200)) {
            Step::Status(status) => Ok(TransportResponse {
                status,
                body: String::new(),
            }),
            Step::Timeout => Err(TransportError::Timeout {
                url: self.target().into(),
            }),
            Step::Refused => Err(TransportError::ConnectionFailed {
                url: self.target().into(),
                reason: "connection refused".into(),
            }),
            Step::Panic => panic!("transport exploded"),
        }
    }

    fn target(&self) -> &str {
        "mock://collector"
    }
}

fn facts() -> EnvironmentFacts {
    EnvironmentFacts {
        rust_version: "1.80.0".into(),
        os_arch: "aarch64".into(),
        os_name: "macos".into(),
        os_version: "14.5".into(),
        core_count: 10,
    }
}

fn submitter_over(
    transport: Arc<dyn Transport>,
    enabled: bool,
    encoding: Encoding,
) -> Submitter {
    let registry = Arc::new(ChartRegistry::new());
    registry
        .add(Chart::boolean("online_mode", || Ok(Some(true))).unwrap())
        .unwrap();
    let config = MetricsConfig::new(Uuid::new_v4(), enabled, false);
    let options = SubmitterOptions {
        encoding,
        environment: Some(facts()),
        ..SubmitterOptions::default()
    };
    Submitter::with_options(registry, config, transport, options)
}

fn submitter_with(transport: Arc<ScriptedTransport>, enabled: bool) -> Submitter {
    submitter_over(transport, enabled, Encoding::Zstd)
}

fn wait_until(timeout: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        thread::sleep(Duration::from_millis(5));
    }
    condition()
}

#[test]
fn status_outcomes_follow_classification() {
    let transport = ScriptedTransport::with_script([
        Step::Status(204),
        Step::Status(302),
        Step::Status(404),
        Step::Status(503),
        Step::Status(101),
    ]);
    let submitter = submitter_with(Arc::clone(&transport), true);

    assert!(matches!(
        submitter.submit_once(),
        SubmissionOutcome::Delivered { status: 204 }
    ));
    for (status, class) in [
        (302, ResponseClass::Redirect),
        (404, ResponseClass::ClientError),
        (503, ResponseClass::ServerError),
        (101, ResponseClass::Unexpected),
    ] {
        match submitter.submit_once() {
            SubmissionOutcome::Rejected { class: c, status: s } => {
                assert_eq!((c, s), (class, status));
            }
            other => panic!("expected Rejected for {status}, got {other:?}"),
        }
    }
    assert_eq!(submitter.ticks(), 5);
    assert_eq!(transport.requests(), 5);
}

#[test]
fn transport_errors_and_panics_are_contained() {
    let transport = ScriptedTransport::with_script([Step::Timeout, Step::Refused, Step::Panic]);
    let submitter = submitter_with(Arc::clone(&transport), true);

    assert!(matches!(
        submitter.submit_once(),
        SubmissionOutcome::TransportFailed(TransportError::Timeout { .. })
    ));
    assert!(matches!(
        submitter.submit_once(),
        SubmissionOutcome::TransportFailed(TransportError::ConnectionFailed { .. })
    ));
    match submitter.submit_once() {
        SubmissionOutcome::Panicked { message } => assert_eq!(message, "transport exploded"),
        other => panic!("expected Panicked, got {other:?}"),
    }
    assert!(submitter.submit_once().is_delivered());
}

#[test]
fn request_body_is_the_compressed_payload() {
    let transport = ScriptedTransport::always_ok();
    let submitter = submitter_over(transport.clone(), true, Encoding::Gzip);

    assert!(submitter.submit_once().is_delivered());

    let request = transport.last_request();
    assert_eq!(request.encoding, Encoding::Gzip);
    let json = Encoding::Gzip.decompress(&request.body).unwrap();
    let payload: Payload = serde_json::from_slice(&json).unwrap();
    assert_eq!(payload, submitter.build_payload());
    assert_eq!(payload.data["online_mode"], serde_json::json!(true));
}

#[test]
fn failed_ticks_are_not_retried_and_the_schedule_continues() {
    let transport =
        ScriptedTransport::with_script([Step::Timeout, Step::Status(500), Step::Refused]);
    let submitter = submitter_with(Arc::clone(&transport), true);

    assert!(submitter.start(Duration::ZERO, PERIOD));
    assert!(
        wait_until(Duration::from_secs(5), || submitter.ticks() >= 5),
        "scheduler stalled after failures"
    );
    submitter.shutdown();
    // Let a tick that raced the shutdown finish.
    thread::sleep(PERIOD / 2);

    // One request per tick: nothing re-sent in between.
    assert_eq!(transport.requests() as u64, submitter.ticks());

    let times = transport.send_times();
    for pair in times.windows(2) {
        let gap = pair[1].duration_since(pair[0]);
        assert!(
            gap >= PERIOD - Duration::from_millis(40),
            "requests {gap:?} apart, expected the period"
        );
    }
}

#[test]
fn second_start_is_a_no_op() {
    let transport = ScriptedTransport::always_ok();
    let submitter = submitter_with(Arc::clone(&transport), true);

    assert!(submitter.start(Duration::ZERO, PERIOD));
    assert!(!submitter.start(Duration::ZERO, PERIOD));
    assert!(submitter.is_submitting());

    thread::sleep(PERIOD * 5 + PERIOD / 2);
    submitter.shutdown();

    // One timer fires ~6 times in this window; two would fire ~12.
    let ticks = submitter.ticks();
    assert!((3..=8).contains(&ticks), "unexpected tick count {ticks}");
}

#[test]
fn disabled_config_never_starts() {
    let transport = ScriptedTransport::always_ok();
    let submitter = submitter_with(Arc::clone(&transport), false);

    assert!(!submitter.start(Duration::ZERO, PERIOD));
    assert!(!submitter.is_submitting());
    thread::sleep(PERIOD * 2);
    assert_eq!(submitter.ticks(), 0);
    assert_eq!(transport.requests(), 0);
}

#[test]
fn shutdown_is_idempotent_and_stops_ticks() {
    let transport = ScriptedTransport::always_ok();
    let submitter = submitter_with(Arc::clone(&transport), true);

    submitter.shutdown();
    assert!(submitter.start(Duration::ZERO, PERIOD));
    assert!(wait_until(Duration::from_secs(2), || submitter.ticks() >= 1));

    submitter.shutdown();
    submitter.shutdown();
    assert!(!submitter.is_submitting());

    thread::sleep(PERIOD / 2);
    let settled = submitter.ticks();
    thread::sleep(PERIOD * 3);
    assert_eq!(submitter.ticks(), settled);
}

#[test]
fn can_restart_after_shutdown() {
    let transport = ScriptedTransport::always_ok();
    let submitter = submitter_with(Arc::clone(&transport), true);

    assert!(submitter.start(Duration::from_secs(60), PERIOD));
    submitter.shutdown();
    assert!(submitter.start(Duration::ZERO, PERIOD));
    assert!(wait_until(Duration::from_secs(2), || submitter.ticks() >= 1));
    submitter.shutdown();
}

#[test]
fn initial_delay_is_respected() {
    let transport = ScriptedTransport::always_ok();
    let submitter = submitter_with(Arc::clone(&transport), true);

    assert!(submitter.start(Duration::from_millis(300), PERIOD));
    thread::sleep(Duration::from_millis(100));
    assert_eq!(submitter.ticks(), 0);
    assert!(wait_until(Duration::from_secs(2), || submitter.ticks() >= 1));
    submitter.shutdown();
}

#[test]
fn worker_survives_a_panicking_tick() {
    let transport = ScriptedTransport::with_script([Step::Panic]);
    let submitter = submitter_with(Arc::clone(&transport), true);

    assert!(submitter.start(Duration::ZERO, PERIOD));
    assert!(wait_until(Duration::from_secs(2), || submitter.ticks() >= 3));
    assert!(submitter.is_submitting());
    submitter.shutdown();
}

#[test]
fn dropping_the_submitter_stops_the_worker() {
    let transport = ScriptedTransport::always_ok();
    let submitter = submitter_with(Arc::clone(&transport), true);
    assert!(submitter.start(Duration::ZERO, PERIOD));
    assert!(wait_until(Duration::from_secs(2), || transport.requests() >= 1));

    drop(submitter);
    thread::sleep(PERIOD / 2);
    let settled = transport.requests();
    thread::sleep(PERIOD * 3);
    assert_eq!(transport.requests(), settled);
}

/// Holds every request for a while and remembers the most requests seen at once.
#[derive(Default)]
struct SlowTransport {
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    sent: AtomicUsize,
}

impl SlowTransport {
    const HOLD: Duration = Duration::from_millis(300);

    fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    fn sent(&self) -> usize {
        self.sent.load(Ordering::SeqCst)
    }
}

impl Transport for SlowTransport {
    fn send(&self, _request: SubmissionRequest) -> Result<TransportResponse, TransportError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        thread::sleep(Self::HOLD);
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.sent.fetch_add(1, Ordering::SeqCst);
        Ok(TransportResponse {
            status: 200,
            body: String::new(),
        })
    }

    fn target(&self) -> &str {
        "mock://slow"
    }
}

#[test]
fn manual_tick_waits_for_the_scheduled_one() {
    let transport = Arc::new(SlowTransport::default());
    let submitter = submitter_over(transport.clone(), true, Encoding::Zstd);

    assert!(submitter.start(Duration::ZERO, Duration::from_secs(60)));
    thread::sleep(Duration::from_millis(50));

    assert!(submitter.submit_once().is_delivered());
    submitter.shutdown();

    assert_eq!(transport.sent(), 2);
    assert_eq!(transport.peak(), 1);
}

#[test]
fn restart_waits_for_the_previous_workers_request() {
    let transport = Arc::new(SlowTransport::default());
    let submitter = submitter_over(transport.clone(), true, Encoding::Zstd);

    assert!(submitter.start(Duration::ZERO, Duration::from_secs(60)));
    thread::sleep(Duration::from_millis(50));
    submitter.shutdown();
    assert!(submitter.start(Duration::ZERO, Duration::from_secs(60)));

    assert!(wait_until(Duration::from_secs(3), || transport.sent() >= 2));
    submitter.shutdown();
    assert_eq!(transport.peak(), 1);
}

use std::time::Duration;

/// SDK version reported in diagnostics.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Collector endpoint used when the host does not override it.
pub const DEFAULT_COLLECTOR_URL: &str = "https://metrics.faststats.dev/v1/collect";

/// `User-Agent` header sent with every submission.
pub const USER_AGENT: &str = "FastStats Metrics";

/// TCP connect timeout for a submission.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(3);

/// Overall timeout for a submission request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(3);

/// Compression level for request bodies (zstd and gzip alike).
pub const COMPRESSION_LEVEL: i32 = 6;

/// Delay before the first tick after `start()`.
pub const DEFAULT_INITIAL_DELAY: Duration = Duration::ZERO;

/// Interval between ticks.
pub const DEFAULT_SUBMISSION_PERIOD: Duration = Duration::from_secs(30 * 60);

/// Name of the background submission thread.
pub const WORKER_THREAD_NAME: &str = "faststats-submitter";

/// Directory created under the host's plugins root.
pub const CONFIG_DIR_NAME: &str = "faststats";

/// Config file name inside [`CONFIG_DIR_NAME`].
pub const CONFIG_FILE_NAME: &str = "config.json";

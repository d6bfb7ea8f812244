//! Fixed host facts included in every payload.

use std::thread;

use serde_json::{Map, Value};

const UNKNOWN: &str = "unknown";

/// Runtime and OS facts. Detected once per facade; they do not change while
/// the process runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentFacts {
    pub rust_version: String,
    pub os_arch: String,
    pub os_name: String,
    pub os_version: String,
    pub core_count: usize,
}

impl EnvironmentFacts {
    pub fn detect() -> Self {
        Self {
            rust_version: env!("FASTSTATS_RUSTC_VERSION").to_string(),
            os_arch: std::env::consts::ARCH.to_string(),
            os_name: std::env::consts::OS.to_string(),
            os_version: sysinfo::System::os_version().unwrap_or_else(|| UNKNOWN.to_string()),
            core_count: thread::available_parallelism().map_or(1, |n| n.get()),
        }
    }

    /// Write the facts into a payload's `data` object.
    pub fn write_into(&self, data: &mut Map<String, Value>) {
        data.insert("rust_version".into(), Value::from(self.rust_version.as_str()));
        data.insert("os_arch".into(), Value::from(self.os_arch.as_str()));
        data.insert("os_name".into(), Value::from(self.os_name.as_str()));
        data.insert("os_version".into(), Value::from(self.os_version.as_str()));
        data.insert("core_count".into(), Value::from(self.core_count));
    }
}

//! # faststats-core
//!
//! Foundation crate for the FastStats metrics SDK.
//! Defines identifiers, chart variants, the persisted config, errors, and constants.
//! `faststats-metrics` builds the registry, submitter, and facade on top of it.

pub mod chart;
pub mod config;
pub mod constants;
pub mod errors;
pub mod identifiers;

// Re-export the most commonly used types at the crate root.
pub use chart::{Chart, ChartKind, RawValue};
pub use config::MetricsConfig;
pub use errors::{MetricsError, MetricsResult};
pub use identifiers::{ChartId, Token};

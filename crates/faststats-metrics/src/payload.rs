//! Payload assembly: environment facts + chart values + server id.

use faststats_core::MetricsConfig;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::diagnostics::Diagnostics;
use crate::environment::EnvironmentFacts;
use crate::registry::ChartRegistry;

/// `{"server_id": "<uuid>", "data": {...}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    pub server_id: Uuid,
    pub data: Map<String, Value>,
}

impl Payload {
    /// Compact JSON text, as compressed and sent.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Builds payloads from a registry snapshot.
///
/// One failing chart never aborts the payload: its error is logged against
/// the chart id and the chart is simply absent from `data`.
#[derive(Debug, Clone)]
pub struct PayloadBuilder {
    environment: EnvironmentFacts,
    diagnostics: Diagnostics,
}

impl PayloadBuilder {
    pub fn new(environment: EnvironmentFacts, diagnostics: Diagnostics) -> Self {
        Self {
            environment,
            diagnostics,
        }
    }

    pub fn build(&self, registry: &ChartRegistry, config: &MetricsConfig) -> Payload {
        let mut data = Map::new();
        self.environment.write_into(&mut data);

        for chart in registry.snapshot() {
            match chart.data() {
                Ok(Some(value)) => {
                    data.insert(chart.id().to_string(), value);
                }
                Ok(None) => {}
                Err(e) => self.diagnostics.chart_failed(&chart, &e),
            }
        }

        Payload {
            server_id: config.server_id,
            data,
        }
    }

    pub fn environment(&self) -> &EnvironmentFacts {
        &self.environment
    }
}

//! ChartRegistry: concurrent chart set keyed by id via DashMap.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use faststats_core::errors::RegistryError;
use faststats_core::{Chart, ChartId};

/// Thread-safe set of charts. Adds may race with a submission snapshot.
#[derive(Debug, Default)]
pub struct ChartRegistry {
    charts: DashMap<ChartId, Arc<Chart>>,
}

impl ChartRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a chart. Fails if a chart with the same id is already present.
    pub fn add(&self, chart: Chart) -> Result<(), RegistryError> {
        match self.charts.entry(chart.id().clone()) {
            Entry::Occupied(existing) => Err(RegistryError::DuplicateChartId {
                id: existing.key().to_string(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(Arc::new(chart));
                Ok(())
            }
        }
    }

    /// Weakly consistent copy of the current charts, in no particular order.
    ///
    /// Shard locks are only held while cloning the `Arc`s, so producers run
    /// without blocking concurrent `add` calls.
    pub fn snapshot(&self) -> Vec<Arc<Chart>> {
        self.charts.iter().map(|entry| Arc::clone(entry.value())).collect()
    }

    pub fn contains(&self, id: &ChartId) -> bool {
        self.charts.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.charts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }
}

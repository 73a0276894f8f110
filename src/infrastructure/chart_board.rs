// In-memory chart board - latest render of every pipeline, read by the HTTP API
use crate::application::chart_renderer::ChartRenderer;
use crate::domain::chart::{ChartData, ChartHandle};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

#[derive(Debug, Clone)]
pub struct RenderedChart {
    pub chart: Arc<ChartData>,
    pub generation: u64,
    pub last_updated: Option<String>,
}

#[derive(Debug, Default)]
pub struct ChartBoard {
    charts: RwLock<BTreeMap<String, RenderedChart>>,
    generation: AtomicU64,
}

impl ChartBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<RenderedChart> {
        self.charts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    /// All rendered charts, ordered by id.
    pub fn list(&self) -> Vec<RenderedChart> {
        self.charts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect()
    }
}

impl ChartRenderer for ChartBoard {
    fn render(&self, chart: ChartData) -> ChartHandle {
        let generation = self.generation.fetch_add(1, Ordering::Relaxed) + 1;
        let chart = Arc::new(chart);

        self.charts
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(
                chart.id.clone(),
                RenderedChart {
                    chart: chart.clone(),
                    generation,
                    last_updated: None,
                },
            );

        tracing::debug!(chart = %chart.id, generation, points = chart.labels.len(), "chart rendered");
        ChartHandle::new(generation, chart)
    }

    fn publish_freshness(&self, handle: &ChartHandle, last_updated: String) {
        let mut charts = self.charts.write().unwrap_or_else(PoisonError::into_inner);
        match charts.get_mut(handle.id()) {
            Some(rendered) if rendered.generation == handle.generation => {
                rendered.last_updated = Some(last_updated);
            }
            _ => {
                tracing::debug!(
                    chart = %handle.id(),
                    generation = handle.generation,
                    "stale chart handle, freshness dropped"
                );
            }
        }
    }
}

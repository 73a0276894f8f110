// Renderer trait - where normalized charts are handed over for display
use crate::domain::chart::{ChartData, ChartHandle};

pub trait ChartRenderer: Send + Sync {
    /// Replace the displayed chart with the same id and return a handle to
    /// what is now displayed.
    fn render(&self, chart: ChartData) -> ChartHandle;

    /// Attach a "last updated" text to a render. Ignored if the chart has
    /// been rendered again since `handle` was issued.
    fn publish_freshness(&self, handle: &ChartHandle, last_updated: String);
}

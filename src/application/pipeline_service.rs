// Pipeline service - one fetch → normalize → render → report cycle
use crate::application::chart_renderer::ChartRenderer;
use crate::application::csv_source::{CsvSource, FetchError};
use crate::application::normalizer::normalize;
use crate::domain::chart::{AxisData, AxisPosition, ChartData, SeriesData};
use crate::domain::freshness::last_updated;
use crate::domain::series::NormalizedSeries;
use crate::infrastructure::config::PipelineConfig;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineReport {
    pub pipeline: String,
    pub rows: usize,
    pub skipped: usize,
    pub last_updated: String,
}

#[derive(Debug)]
pub enum CycleOutcome {
    Completed(Vec<PipelineReport>),
    /// The previous cycle was still running; nothing was fetched.
    Busy,
    /// The fetch failed; displayed charts were left as they were.
    FetchFailed(FetchError),
}

#[derive(Clone)]
pub struct PipelineService {
    source: Arc<dyn CsvSource>,
    renderer: Arc<dyn ChartRenderer>,
    pipelines: Arc<Vec<PipelineConfig>>,
    in_flight: Arc<AtomicBool>,
}

/// Clears the in-flight flag when the cycle ends, however it ends.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl PipelineService {
    pub fn new(
        source: Arc<dyn CsvSource>,
        renderer: Arc<dyn ChartRenderer>,
        pipelines: Vec<PipelineConfig>,
    ) -> Self {
        Self {
            source,
            renderer,
            pipelines: Arc::new(pipelines),
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    pub async fn run_cycle(&self) -> CycleOutcome {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            return CycleOutcome::Busy;
        }
        let _guard = InFlightGuard(&self.in_flight);
        let start_time = Instant::now();

        let text = match self.source.fetch().await {
            Ok(text) => text,
            Err(e) => return CycleOutcome::FetchFailed(e),
        };

        let reports: Vec<PipelineReport> = self
            .pipelines
            .iter()
            .map(|pipeline| self.refresh_pipeline(pipeline, &text))
            .collect();

        tracing::debug!(
            pipelines = reports.len(),
            duration_ms = start_time.elapsed().as_millis() as u64,
            "refresh cycle complete"
        );
        CycleOutcome::Completed(reports)
    }

    fn refresh_pipeline(&self, pipeline: &PipelineConfig, text: &str) -> PipelineReport {
        let data = normalize(text, pipeline);
        if data.is_empty() {
            tracing::warn!(pipeline = %pipeline.id, "no valid rows in CSV");
        }

        let rows = data.len();
        let skipped = data.skipped.len();
        let handle = self.renderer.render(build_chart(pipeline, data));
        let freshness = last_updated(&handle);
        self.renderer.publish_freshness(&handle, freshness.clone());

        PipelineReport {
            pipeline: pipeline.id.clone(),
            rows,
            skipped,
            last_updated: freshness,
        }
    }
}

/// Attach display metadata from the pipeline to normalized values.
pub fn build_chart(pipeline: &PipelineConfig, data: NormalizedSeries) -> ChartData {
    let NormalizedSeries { labels, series, .. } = data;

    let series = pipeline
        .series
        .iter()
        .zip(series)
        .map(|(config, values)| SeriesData {
            id: config.id.clone(),
            name: config.name.clone(),
            unit: config.unit.clone(),
            color: config.color.clone(),
            axis: config.axis.clone(),
            values: values.values,
        })
        .collect();

    let axes = pipeline
        .axes
        .iter()
        .map(|axis| {
            let position = match axis.position.as_str() {
                "right" => AxisPosition::Right,
                _ => AxisPosition::Left,
            };
            AxisData::new(
                axis.id.clone(),
                axis.title.clone(),
                position,
                axis.y_min,
                axis.y_max,
            )
        })
        .collect();

    ChartData::new(
        pipeline.id.clone(),
        pipeline.title.clone(),
        labels,
        series,
        axes,
    )
}

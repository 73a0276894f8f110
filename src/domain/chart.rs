// Chart domain models
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisPosition {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisData {
    pub id: String,
    pub title: String,
    pub position: AxisPosition,
    pub y_min: Option<f64>,
    pub y_max: Option<f64>,
}

impl AxisData {
    pub fn new(
        id: String,
        title: String,
        position: AxisPosition,
        y_min: Option<f64>,
        y_max: Option<f64>,
    ) -> Self {
        Self {
            id,
            title,
            position,
            y_min,
            y_max,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesData {
    pub id: String,
    pub name: String,
    pub unit: Option<String>,
    pub color: Option<String>,
    pub axis: String,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub id: String,
    pub title: String,
    pub labels: Vec<String>,
    pub series: Vec<SeriesData>,
    pub axes: Vec<AxisData>,
}

impl ChartData {
    pub fn new(
        id: String,
        title: String,
        labels: Vec<String>,
        series: Vec<SeriesData>,
        axes: Vec<AxisData>,
    ) -> Self {
        Self {
            id,
            title,
            labels,
            series,
            axes,
        }
    }

    pub fn last_label(&self) -> Option<&str> {
        self.labels.last().map(String::as_str)
    }
}

/// Handle to a chart as it was rendered. Returned by the renderer and handed
/// on to whoever reports on that render.
#[derive(Debug, Clone)]
pub struct ChartHandle {
    pub generation: u64,
    chart: Arc<ChartData>,
}

impl ChartHandle {
    pub fn new(generation: u64, chart: Arc<ChartData>) -> Self {
        Self { generation, chart }
    }

    pub fn id(&self) -> &str {
        &self.chart.id
    }

    pub fn chart(&self) -> &ChartData {
        &self.chart
    }
}

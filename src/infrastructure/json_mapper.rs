// Mapper to convert rendered charts to JSON views for the browser
use crate::domain::chart::{AxisData, AxisPosition, SeriesData};
use crate::infrastructure::chart_board::RenderedChart;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ChartSummaryView {
    pub id: String,
    pub title: String,
    pub points: usize,
    pub last_updated: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChartView {
    pub id: String,
    pub title: String,
    pub generation: u64,
    pub last_updated: Option<String>,
    pub labels: Vec<String>,
    pub series: Vec<SeriesView>,
    pub axes: Vec<AxisView>,
}

/// NaN values serialize as `null`, which chart libraries draw as a gap.
#[derive(Debug, Serialize)]
pub struct SeriesView {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub axis: String,
    pub values: Vec<f64>,
}

#[derive(Debug, Serialize)]
pub struct AxisView {
    pub id: String,
    pub title: String,
    pub position: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

pub fn chart_to_summary(rendered: &RenderedChart) -> ChartSummaryView {
    ChartSummaryView {
        id: rendered.chart.id.clone(),
        title: rendered.chart.title.clone(),
        points: rendered.chart.labels.len(),
        last_updated: rendered.last_updated.clone(),
    }
}

pub fn chart_to_view(rendered: &RenderedChart) -> ChartView {
    let chart = &rendered.chart;
    ChartView {
        id: chart.id.clone(),
        title: chart.title.clone(),
        generation: rendered.generation,
        last_updated: rendered.last_updated.clone(),
        labels: chart.labels.clone(),
        series: chart.series.iter().map(series_to_view).collect(),
        axes: chart.axes.iter().map(axis_to_view).collect(),
    }
}

fn series_to_view(series: &SeriesData) -> SeriesView {
    SeriesView {
        id: series.id.clone(),
        name: series.name.clone(),
        unit: series.unit.clone(),
        color: series.color.clone(),
        axis: series.axis.clone(),
        values: series.values.clone(),
    }
}

fn axis_to_view(axis: &AxisData) -> AxisView {
    let position = match axis.position {
        AxisPosition::Left => "left",
        AxisPosition::Right => "right",
    };

    AxisView {
        id: axis.id.clone(),
        title: axis.title.clone(),
        position,
        min: axis.y_min,
        max: axis.y_max,
    }
}

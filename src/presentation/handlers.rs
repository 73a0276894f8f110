// HTTP request handlers
use crate::infrastructure::json_mapper::{
    chart_to_summary, chart_to_view, ChartSummaryView, ChartView,
};
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use std::sync::Arc;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/charts", get(list_charts))
        .route("/charts/:id", get(get_chart))
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// List every chart rendered so far
pub async fn list_charts(State(state): State<Arc<AppState>>) -> Json<Vec<ChartSummaryView>> {
    Json(state.board.list().iter().map(chart_to_summary).collect())
}

/// Latest render of one chart
pub async fn get_chart(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<ChartView>, StatusCode> {
    match state.board.get(&id) {
        Some(rendered) => Ok(Json(chart_to_view(&rendered))),
        None => {
            tracing::debug!(chart = %id, "chart not rendered yet");
            Err(StatusCode::NOT_FOUND)
        }
    }
}

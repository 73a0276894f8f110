// Application state for HTTP handlers
use crate::infrastructure::chart_board::ChartBoard;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub board: Arc<ChartBoard>,
}

// Presentation layer - HTTP API read by the browser dashboard
pub mod app_state;
pub mod handlers;

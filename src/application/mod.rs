// Application layer - Refresh cycle use cases and their seams
pub mod chart_renderer;
pub mod csv_source;
pub mod normalizer;
pub mod pipeline_service;
pub mod refresh;

#[cfg(test)]
pub(crate) mod fixtures;

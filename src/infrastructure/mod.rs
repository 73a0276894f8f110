// Infrastructure layer - External dependencies and adapters
pub mod chart_board;
pub mod config;
pub mod http_csv_source;
pub mod json_mapper;

// Domain layer - Station readings and chart models
pub mod chart;
pub mod column_index;
pub mod compass;
pub mod freshness;
pub mod series;

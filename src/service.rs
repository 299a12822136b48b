pub mod aggregator;
pub mod alerts;
pub mod pacing;
pub mod period;
pub mod portfolio;
pub mod refresh;
pub mod sort_filter;

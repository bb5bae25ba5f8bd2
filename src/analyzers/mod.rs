pub mod flux_analyzer;

pub use flux_analyzer::{AggregateRow, AggregateTable, FluxAnalyzer, FluxStatistics};

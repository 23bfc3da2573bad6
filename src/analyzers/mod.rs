pub mod summary_analyzer;

pub use summary_analyzer::{DatasetSummary, SummaryAnalyzer};

use arrow::record_batch::RecordBatch;

use crate::error::Result;
use crate::models::frame::drop_columns;
use crate::processors::stage::{CleaningStage, StageOutput, StageReport};
use crate::utils::constants::UNUSED_COLUMNS;
use tracing::info;

/// Drops administrative metadata, raw or adjusted monetary variants and
/// helper columns. Must be the last stage.
pub struct ColumnPruner {
    columns: Vec<String>,
}

impl ColumnPruner {
    pub fn new() -> Self {
        Self {
            columns: UNUSED_COLUMNS.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}

impl Default for ColumnPruner {
    fn default() -> Self {
        Self::new()
    }
}

impl CleaningStage for ColumnPruner {
    fn name(&self) -> &'static str {
        "pruner"
    }

    fn apply(&self, batch: RecordBatch) -> Result<StageOutput> {
        let mut report = StageReport::new(self.name());
        let names: Vec<&str> = self.columns.iter().map(String::as_str).collect();
        let (batch, dropped) = drop_columns(&batch, &names)?;
        report.columns_dropped = dropped;

        info!(
            "Dropped {} unused columns: {:?}",
            report.columns_dropped.len(),
            report.columns_dropped
        );
        Ok(StageOutput::new(batch, report))
    }
}

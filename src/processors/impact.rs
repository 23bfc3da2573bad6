use arrow::record_batch::RecordBatch;

use crate::error::Result;
use crate::models::frame::with_column;
use crate::processors::coerce::to_float;
use crate::processors::stage::{CleaningStage, StageOutput, StageReport};
use crate::utils::constants::IMPACT_COLUMNS;
use tracing::{info, warn};

/// Coerces human-impact counts to numbers. No clipping: magnitudes are
/// trusted, only the format is repaired.
pub struct ImpactNormalizer {
    columns: Vec<String>,
}

impl ImpactNormalizer {
    pub fn new() -> Self {
        Self {
            columns: IMPACT_COLUMNS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Default for ImpactNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl CleaningStage for ImpactNormalizer {
    fn name(&self) -> &'static str {
        "impact"
    }

    fn apply(&self, mut batch: RecordBatch) -> Result<StageOutput> {
        let mut report = StageReport::new(self.name());

        for name in &self.columns {
            let Some(column) = batch.column_by_name(name) else {
                continue;
            };
            let coerced = to_float(column)?;
            report.nulled(name, coerced.nulled);
            batch = with_column(&batch, name, coerced.array)?;
            report.wrote(name);
        }

        if report.total_nulled() > 0 {
            warn!(
                "Unparseable impact counts set to null: {:?}",
                report.nulled_values
            );
        }
        info!("Impact columns normalized: {:?}", report.columns_written);
        Ok(StageOutput::new(batch, report))
    }
}

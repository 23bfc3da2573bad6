use arrow::record_batch::RecordBatch;

use crate::error::Result;
use crate::models::frame::with_column;
use crate::processors::coerce::to_float;
use crate::processors::stage::{CleaningStage, StageOutput, StageReport};
use crate::utils::constants::{MONETARY_COLUMNS, MONETARY_SUFFIX};
use tracing::{info, warn};

/// Converts `"<Label> ('000 US$)"` columns to numeric values stored under the
/// clean name. Values stay in thousands of US$.
///
/// A table that was already cleaned has no raw column left; the clean column
/// itself is then re-coerced, which leaves numeric values unchanged.
pub struct MonetaryNormalizer {
    columns: Vec<(String, String)>,
}

impl MonetaryNormalizer {
    pub fn new() -> Self {
        Self {
            columns: MONETARY_COLUMNS
                .iter()
                .map(|(label, clean)| (format!("{}{}", label, MONETARY_SUFFIX), clean.to_string()))
                .collect(),
        }
    }

    /// Raw/clean name pairs this stage handles.
    pub fn columns(&self) -> &[(String, String)] {
        &self.columns
    }
}

impl Default for MonetaryNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl CleaningStage for MonetaryNormalizer {
    fn name(&self) -> &'static str {
        "monetary"
    }

    fn apply(&self, mut batch: RecordBatch) -> Result<StageOutput> {
        let mut report = StageReport::new(self.name());

        for (raw, clean) in &self.columns {
            let source = match batch.column_by_name(raw) {
                Some(column) => {
                    info!("Cleaning monetary column: {}; cleaned as {}", raw, clean);
                    column
                }
                None => match batch.column_by_name(clean) {
                    Some(column) => column,
                    None => continue,
                },
            };

            let coerced = to_float(source)?;
            report.nulled(clean, coerced.nulled);
            batch = with_column(&batch, clean, coerced.array)?;
            report.wrote(clean);
        }

        if report.total_nulled() > 0 {
            warn!(
                "Unparseable monetary values set to null: {:?}",
                report.nulled_values
            );
        }
        info!("Monetary columns normalized: {:?}", report.columns_written);
        Ok(StageOutput::new(batch, report))
    }
}

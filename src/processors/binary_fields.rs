use std::sync::Arc;

use arrow::array::{new_null_array, Array, ArrayRef, BooleanArray};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;

use crate::error::Result;
use crate::models::frame::{is_text, with_column};
use crate::processors::coerce::to_text;
use crate::processors::stage::{CleaningStage, StageOutput, StageReport};
use crate::utils::constants::BINARY_COLUMNS;
use tracing::{info, warn};

/// Maps literal `"Yes"`/`"No"` flags to booleans; anything else is null.
pub struct BinaryFieldNormalizer {
    columns: Vec<String>,
}

impl BinaryFieldNormalizer {
    pub fn new() -> Self {
        Self {
            columns: BINARY_COLUMNS.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn map_flag(value: Option<&str>) -> Option<bool> {
        match value {
            Some("Yes") => Some(true),
            Some("No") => Some(false),
            _ => None,
        }
    }

    fn map_column(column: &ArrayRef) -> Result<ArrayRef> {
        Ok(match column.data_type() {
            DataType::Boolean => Arc::clone(column),
            _ if is_text(column) => {
                let flags: BooleanArray = to_text(column)?.iter().map(Self::map_flag).collect();
                Arc::new(flags)
            }
            _ => new_null_array(&DataType::Boolean, column.len()),
        })
    }
}

impl Default for BinaryFieldNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl CleaningStage for BinaryFieldNormalizer {
    fn name(&self) -> &'static str {
        "binary_fields"
    }

    fn apply(&self, mut batch: RecordBatch) -> Result<StageOutput> {
        let mut report = StageReport::new(self.name());

        for name in &self.columns {
            let Some(column) = batch.column_by_name(name) else {
                continue;
            };

            let flags = Self::map_column(column)?;
            let before = column.len() - column.null_count();
            let after = flags.len() - flags.null_count();
            report.nulled(name, before.saturating_sub(after));

            batch = with_column(&batch, name, flags)?;
            report.wrote(name);
        }

        if report.total_nulled() > 0 {
            warn!(
                "Unrecognized yes/no tokens set to null: {:?}",
                report.nulled_values
            );
        }
        info!("Binary fields normalized: {:?}", report.columns_written);
        Ok(StageOutput::new(batch, report))
    }
}

use std::sync::Arc;

use arrow::array::StringArray;
use arrow::compute::is_not_null;
use arrow::record_batch::RecordBatch;

use crate::error::Result;
use crate::models::frame::with_column;
use crate::processors::coerce::to_text;
use crate::processors::stage::{CleaningStage, StageOutput, StageReport};
use crate::utils::constants::{
    COL_DIS_NO, COL_EXTERNAL_IDS, COL_HAS_EXTERNAL_IDS, COL_SEQUENCE_ID, COL_YEAR_ID,
};
use tracing::{info, warn};

/// Splits `DisNo` (`YYYY-NNNN-ISO`) into year and sequence parts and flags
/// rows carrying external identifiers.
///
/// Extraction is positional and does not validate the identifier; rows that
/// do not look like `YYYY-NNNN-...` are only counted.
pub struct IdentifierNormalizer;

impl IdentifierNormalizer {
    pub fn new() -> Self {
        Self
    }

    pub fn year_part(dis_no: &str) -> Option<String> {
        non_empty(dis_no.chars().take(4).collect())
    }

    pub fn sequence_part(dis_no: &str) -> Option<String> {
        non_empty(dis_no.chars().skip(5).take(4).collect())
    }

    pub fn is_well_formed(dis_no: &str) -> bool {
        let chars: Vec<char> = dis_no.chars().collect();
        chars.len() > 10
            && chars[..4].iter().all(char::is_ascii_digit)
            && chars[4] == '-'
            && chars[5..9].iter().all(char::is_ascii_digit)
            && chars[9] == '-'
    }
}

impl Default for IdentifierNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl CleaningStage for IdentifierNormalizer {
    fn name(&self) -> &'static str {
        "identifiers"
    }

    fn apply(&self, mut batch: RecordBatch) -> Result<StageOutput> {
        let mut report = StageReport::new(self.name());

        if let Some(column) = batch.column_by_name(COL_DIS_NO) {
            let ids = to_text(column)?;
            let years: StringArray = ids.iter().map(|id| id.and_then(Self::year_part)).collect();
            let sequences: StringArray = ids
                .iter()
                .map(|id| id.and_then(Self::sequence_part))
                .collect();
            report.malformed_identifiers = ids
                .iter()
                .flatten()
                .filter(|id| !Self::is_well_formed(id))
                .count();

            batch = with_column(&batch, COL_YEAR_ID, Arc::new(years))?;
            batch = with_column(&batch, COL_SEQUENCE_ID, Arc::new(sequences))?;
            report.wrote(COL_YEAR_ID);
            report.wrote(COL_SEQUENCE_ID);

            if report.malformed_identifiers > 0 {
                warn!(
                    "{} disaster identifiers do not match YYYY-NNNN-XXX; parts extracted positionally",
                    report.malformed_identifiers
                );
            }
        }

        if let Some(column) = batch.column_by_name(COL_EXTERNAL_IDS) {
            let flags = is_not_null(column.as_ref())?;
            batch = with_column(&batch, COL_HAS_EXTERNAL_IDS, Arc::new(flags))?;
            report.wrote(COL_HAS_EXTERNAL_IDS);
        }

        info!("Identifiers normalized: wrote {:?}", report.columns_written);
        Ok(StageOutput::new(batch, report))
    }
}

fn non_empty(s: String) -> Option<String> {
    (!s.is_empty()).then_some(s)
}

use std::sync::Arc;

use arrow::array::{Array, StringArray};
use arrow::record_batch::RecordBatch;

use crate::error::Result;
use crate::models::frame::with_column;
use crate::processors::coerce::to_text;
use crate::processors::stage::{CleaningStage, StageOutput, StageReport};
use crate::utils::constants::{COL_COUNTRY, COL_ISO};
use crate::utils::countries::country_name;
use tracing::{info, warn};

/// Rewrites `Country` from the ISO-3 code. The source's free-text country
/// name is never kept: unmapped or missing codes give a null country.
pub struct CountryNormalizer {
    lookup: fn(&str) -> Option<&'static str>,
}

impl CountryNormalizer {
    pub fn new() -> Self {
        Self {
            lookup: country_name,
        }
    }

    /// Use a different code table, e.g. for tests or a newer catalogue release.
    pub fn with_lookup(lookup: fn(&str) -> Option<&'static str>) -> Self {
        Self { lookup }
    }
}

impl Default for CountryNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl CleaningStage for CountryNormalizer {
    fn name(&self) -> &'static str {
        "countries"
    }

    fn apply(&self, batch: RecordBatch) -> Result<StageOutput> {
        let mut report = StageReport::new(self.name());

        let Some(iso) = batch.column_by_name(COL_ISO) else {
            return Ok(StageOutput::new(batch, report));
        };
        let codes = to_text(iso)?;

        let names: StringArray = codes
            .iter()
            .map(|code| {
                code.and_then(|c| {
                    let resolved = (self.lookup)(c);
                    if resolved.is_none() {
                        report.unmapped_iso.insert(c.trim().to_ascii_uppercase());
                    }
                    resolved
                })
            })
            .collect();

        let previously_named = batch
            .column_by_name(COL_COUNTRY)
            .map(|c| c.len() - c.null_count())
            .unwrap_or(0);
        let resolved = names.len() - names.null_count();
        report.nulled(COL_COUNTRY, previously_named.saturating_sub(resolved));

        let batch = with_column(&batch, COL_COUNTRY, Arc::new(names))?;
        report.wrote(COL_COUNTRY);

        if !report.unmapped_iso.is_empty() {
            warn!(
                "ISO codes with no country mapping (country left null): {:?}",
                report.unmapped_iso
            );
        }
        info!("Countries resolved from ISO codes for {} rows", resolved);
        Ok(StageOutput::new(batch, report))
    }
}

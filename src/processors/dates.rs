use std::sync::Arc;

use arrow::array::{Date32Array, Int64Array};
use arrow::datatypes::Date32Type;
use arrow::record_batch::RecordBatch;
use chrono::NaiveDate;

use crate::error::Result;
use crate::models::frame::{date_column, has_column, int_column, with_column};
use crate::processors::coerce::to_integer;
use crate::processors::stage::{CleaningStage, StageOutput, StageReport};
use crate::utils::constants::{COL_DURATION_DAYS, COL_END_DATE, COL_START_DATE, DATE_PARTS};
use tracing::{info, warn};

/// Builds `StartDate`/`EndDate` from separate year, month and day columns and
/// derives `DurationDays` where both ends resolve.
pub struct DateNormalizer;

impl DateNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Missing month or day default to 1; a missing year gives no date.
    pub fn build_date(year: Option<i64>, month: Option<i64>, day: Option<i64>) -> Option<NaiveDate> {
        let year = i32::try_from(year?).ok()?;
        let month = u32::try_from(month.unwrap_or(1)).ok()?;
        let day = u32::try_from(day.unwrap_or(1)).ok()?;
        NaiveDate::from_ymd_opt(year, month, day)
    }
}

impl Default for DateNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl CleaningStage for DateNormalizer {
    fn name(&self) -> &'static str {
        "dates"
    }

    fn apply(&self, mut batch: RecordBatch) -> Result<StageOutput> {
        let mut report = StageReport::new(self.name());

        for (prefix, parts, date_column_name) in DATE_PARTS {
            if !parts.iter().all(|p| has_column(&batch, p)) {
                continue;
            }

            for part in parts {
                let Some(column) = batch.column_by_name(part) else {
                    continue;
                };
                let coerced = to_integer(column)?;
                report.nulled(part, coerced.nulled);
                batch = with_column(&batch, part, coerced.array)?;
                report.wrote(part);
            }

            let (Some(years), Some(months), Some(days)) = (
                int_column(&batch, parts[0]),
                int_column(&batch, parts[1]),
                int_column(&batch, parts[2]),
            ) else {
                continue;
            };

            let mut unresolved = 0;
            let dates: Date32Array = years
                .iter()
                .zip(months.iter().zip(days.iter()))
                .map(|(y, (m, d))| {
                    let date = Self::build_date(y, m, d);
                    if y.is_some() && date.is_none() {
                        unresolved += 1;
                    }
                    date.map(Date32Type::from_naive_date)
                })
                .collect();

            report.nulled(date_column_name, unresolved);
            if unresolved > 0 {
                warn!(
                    "{} {} dates could not be built from their parts and were left null",
                    unresolved,
                    prefix.to_lowercase()
                );
            }

            batch = with_column(&batch, date_column_name, Arc::new(dates))?;
            report.wrote(date_column_name);
        }

        let starts = date_column(&batch, COL_START_DATE);
        let ends = date_column(&batch, COL_END_DATE);
        if let (Some(starts), Some(ends)) = (starts, ends) {
            // Date32 values are day counts, so their difference is the duration
            let durations: Int64Array = starts
                .iter()
                .zip(ends.iter())
                .map(|(start, end)| Some(i64::from(end?) - i64::from(start?)))
                .collect();

            report.negative_durations = durations.iter().flatten().filter(|d| *d < 0).count();
            if report.negative_durations > 0 {
                warn!(
                    "{} events end before they start; negative durations kept as-is",
                    report.negative_durations
                );
            }

            batch = with_column(&batch, COL_DURATION_DAYS, Arc::new(durations))?;
            report.wrote(COL_DURATION_DAYS);
        }

        info!("Dates normalized: wrote {:?}", report.columns_written);
        Ok(StageOutput::new(batch, report))
    }
}

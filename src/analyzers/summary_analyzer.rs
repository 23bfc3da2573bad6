use crate::error::Result;
use crate::models::frame::{float_column, int_column};
use crate::models::DisasterRecord;
use crate::readers::TableReader;
use crate::utils::constants::{COL_START_YEAR, COL_TOTAL_DAMAGE, COL_TOTAL_DEATHS};
use arrow::compute::{max, min, sum};
use arrow::record_batch::RecordBatch;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use tracing::warn;
use validator::Validate;

/// Headline statistics over a cleaned dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSummary {
    pub total_records: usize,
    pub year_range: Option<(i64, i64)>,
    pub distinct_countries: usize,
    /// Event counts per disaster type, most frequent first.
    pub events_by_type: Vec<(String, usize)>,
    pub total_deaths: f64,
    pub total_damage: f64,
    pub records_with_duration: usize,
    pub negative_durations: usize,
    pub invalid_records: usize,
}

pub struct SummaryAnalyzer;

impl SummaryAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze_file(&self, path: &Path) -> Result<DatasetSummary> {
        let batch = TableReader::new().read_cleaned(path)?;
        Ok(self.analyze(&batch))
    }

    pub fn analyze(&self, batch: &RecordBatch) -> DatasetSummary {
        let records = DisasterRecord::from_batch(batch);

        let year_range =
            int_column(batch, COL_START_YEAR).and_then(|years| Some((min(years)?, max(years)?)));
        let column_total = |name: &str| float_column(batch, name).and_then(sum).unwrap_or(0.0);

        let mut countries = HashSet::new();
        let mut by_type: BTreeMap<String, usize> = BTreeMap::new();
        let mut records_with_duration = 0;
        let mut negative_durations = 0;
        let mut invalid_records = 0;

        for record in &records {
            if let Some(country) = &record.country {
                countries.insert(country.as_str());
            }
            if let Some(kind) = &record.disaster_type {
                *by_type.entry(kind.clone()).or_default() += 1;
            }
            if record.duration_days.is_some() {
                records_with_duration += 1;
            }
            if record.has_negative_duration() {
                negative_durations += 1;
            }
            if record.validate().is_err() {
                invalid_records += 1;
            }
        }

        if negative_durations > 0 {
            warn!("{} records end before they start", negative_durations);
        }

        let mut events_by_type: Vec<(String, usize)> = by_type.into_iter().collect();
        events_by_type.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        DatasetSummary {
            total_records: records.len(),
            year_range,
            distinct_countries: countries.len(),
            events_by_type,
            total_deaths: column_total(COL_TOTAL_DEATHS),
            total_damage: column_total(COL_TOTAL_DAMAGE),
            records_with_duration,
            negative_durations,
            invalid_records,
        }
    }
}

impl Default for SummaryAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetSummary {
    pub fn summary(&self) -> String {
        let years = match self.year_range {
            Some((min, max)) => format!("{} to {}", min, max),
            None => "unknown".to_string(),
        };

        let mut summary = format!(
            "Records: {} total\n\
            Years: {}\n\
            Countries: {}\n\
            Total deaths: {:.0}\n\
            Total damage: {:.0} ('000 US$)\n\
            Durations: {} computed, {} negative\n\
            Invalid records: {}",
            self.total_records,
            years,
            self.distinct_countries,
            self.total_deaths,
            self.total_damage,
            self.records_with_duration,
            self.negative_durations,
            self.invalid_records,
        );

        if !self.events_by_type.is_empty() {
            summary.push_str("\n\nEvents by type:");
            for (kind, count) in &self.events_by_type {
                summary.push_str(&format!("\n  {:<24} {:>6}", kind, count));
            }
        }
        summary
    }
}

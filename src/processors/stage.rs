use arrow::record_batch::RecordBatch;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::error::Result;

/// One normalization step: takes the working batch and hands back the
/// transformed batch with a record of what it changed.
pub trait CleaningStage {
    fn name(&self) -> &'static str;

    fn apply(&self, batch: RecordBatch) -> Result<StageOutput>;
}

#[derive(Debug)]
pub struct StageOutput {
    pub batch: RecordBatch,
    pub report: StageReport,
}

impl StageOutput {
    pub fn new(batch: RecordBatch, report: StageReport) -> Self {
        Self { batch, report }
    }
}

/// Provenance of the decisions a stage made.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StageReport {
    pub stage: String,
    pub columns_written: Vec<String>,
    pub columns_dropped: Vec<String>,
    /// Non-null inputs that became null, per column
    pub nulled_values: BTreeMap<String, usize>,
    pub unmapped_iso: BTreeSet<String>,
    pub malformed_identifiers: usize,
    pub negative_durations: usize,
}

impl StageReport {
    pub fn new(stage: &str) -> Self {
        Self {
            stage: stage.to_string(),
            ..Default::default()
        }
    }

    pub fn wrote(&mut self, column: &str) {
        if !self.columns_written.iter().any(|c| c == column) {
            self.columns_written.push(column.to_string());
        }
    }

    pub fn nulled(&mut self, column: &str, count: usize) {
        if count > 0 {
            *self.nulled_values.entry(column.to_string()).or_default() += count;
        }
    }

    pub fn total_nulled(&self) -> usize {
        self.nulled_values.values().sum()
    }
}

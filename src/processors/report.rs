use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

use crate::error::Result;
use crate::processors::stage::StageReport;

/// Everything the pipeline decided during one run, in stage order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CleaningReport {
    pub input_rows: usize,
    pub input_columns: usize,
    pub output_rows: usize,
    pub output_columns: Vec<String>,
    pub stages: Vec<StageReport>,
    pub elapsed_ms: u128,
}

impl CleaningReport {
    pub fn stage(&self, name: &str) -> Option<&StageReport> {
        self.stages.iter().find(|s| s.stage == name)
    }

    pub fn unmapped_iso_codes(&self) -> BTreeSet<String> {
        self.stages
            .iter()
            .flat_map(|s| s.unmapped_iso.iter().cloned())
            .collect()
    }

    pub fn total_nulled(&self) -> usize {
        self.stages.iter().map(StageReport::total_nulled).sum()
    }

    pub fn negative_durations(&self) -> usize {
        self.stages.iter().map(|s| s.negative_durations).sum()
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    pub fn summary(&self) -> String {
        let mut summary = String::new();

        summary.push_str("=== Cleaning Report ===\n");
        summary.push_str(&format!(
            "Input: {} rows x {} columns\n",
            self.input_rows, self.input_columns
        ));
        summary.push_str(&format!(
            "Output: {} rows x {} columns\n",
            self.output_rows,
            self.output_columns.len()
        ));
        summary.push_str(&format!("Elapsed: {} ms\n", self.elapsed_ms));

        summary.push_str("\nStages:\n");
        for stage in &self.stages {
            summary.push_str(&format!(
                "  {:<14} wrote {:>2}, dropped {:>2}, nulled {}\n",
                stage.stage,
                stage.columns_written.len(),
                stage.columns_dropped.len(),
                stage.total_nulled()
            ));
        }

        let unmapped = self.unmapped_iso_codes();
        if !unmapped.is_empty() {
            let codes: Vec<&str> = unmapped.iter().map(String::as_str).collect();
            summary.push_str(&format!("\nUnmapped ISO codes: {}\n", codes.join(", ")));
        }
        if self.negative_durations() > 0 {
            summary.push_str(&format!(
                "Negative durations: {}\n",
                self.negative_durations()
            ));
        }

        summary
    }
}

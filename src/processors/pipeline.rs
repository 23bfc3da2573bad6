use std::time::Instant;

use arrow::record_batch::RecordBatch;

use crate::error::{ProcessingError, Result};
use crate::models::frame::{column_names, is_empty, rename_columns};
use crate::processors::binary_fields::BinaryFieldNormalizer;
use crate::processors::countries::CountryNormalizer;
use crate::processors::dates::DateNormalizer;
use crate::processors::identifiers::IdentifierNormalizer;
use crate::processors::impact::ImpactNormalizer;
use crate::processors::monetary::MonetaryNormalizer;
use crate::processors::pruner::ColumnPruner;
use crate::processors::report::CleaningReport;
use crate::processors::schema_validator::SchemaValidator;
use crate::processors::stage::CleaningStage;
use crate::utils::headers::canonicalize_headers;
use crate::utils::progress::ProgressReporter;
use tracing::{debug, error, info};

/// Successful pipeline output.
#[derive(Debug, Clone)]
pub struct CleanedDataset {
    pub batch: RecordBatch,
    pub report: CleaningReport,
}

/// Runs the schema gate and then every stage, in order, over a private copy
/// of the input batch.
pub struct CleaningPipeline {
    validator: SchemaValidator,
    stages: Vec<Box<dyn CleaningStage>>,
}

impl CleaningPipeline {
    /// Standard stage order. Countries are resolved before the pruner runs.
    pub fn new() -> Self {
        Self {
            validator: SchemaValidator::new(),
            stages: vec![
                Box::new(IdentifierNormalizer::new()),
                Box::new(BinaryFieldNormalizer::new()),
                Box::new(CountryNormalizer::new()),
                Box::new(DateNormalizer::new()),
                Box::new(MonetaryNormalizer::new()),
                Box::new(ImpactNormalizer::new()),
                Box::new(ColumnPruner::new()),
            ],
        }
    }

    pub fn with_stages(validator: SchemaValidator, stages: Vec<Box<dyn CleaningStage>>) -> Self {
        Self { validator, stages }
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    pub fn validator(&self) -> &SchemaValidator {
        &self.validator
    }

    /// Canonicalize headers and run only the schema gate.
    pub fn check_schema(&self, raw: &RecordBatch) -> Result<()> {
        self.validator.validate(&working_copy(raw)?)
    }

    pub fn run(&self, raw: &RecordBatch) -> Result<CleanedDataset> {
        self.run_with_progress(raw, None)
    }

    /// Clean `raw` without mutating it. Failures are logged here and returned
    /// as errors; nothing is partially cleaned on a schema failure.
    pub fn run_with_progress(
        &self,
        raw: &RecordBatch,
        progress: Option<&ProgressReporter>,
    ) -> Result<CleanedDataset> {
        let started = Instant::now();

        if is_empty(raw) {
            error!("Error in data cleaning process: input table is empty");
            return Err(ProcessingError::EmptyInput);
        }

        info!(
            "Starting data cleaning process with {} records",
            raw.num_rows()
        );
        debug!("Columns in input table: {:?}", column_names(raw));

        let mut batch = working_copy(raw)?;
        self.validator.validate(&batch)?;

        let mut report = CleaningReport {
            input_rows: raw.num_rows(),
            input_columns: raw.num_columns(),
            ..Default::default()
        };

        for stage in &self.stages {
            let name = stage.name();
            debug!("Running stage '{}'", name);

            let output = stage.apply(batch).map_err(|e| {
                error!("Error in data cleaning stage '{}': {}", name, e);
                ProcessingError::Stage {
                    stage: name,
                    message: e.to_string(),
                }
            })?;

            batch = output.batch;
            report.stages.push(output.report);
            if let Some(progress) = progress {
                progress.stage_done(name);
            }
        }

        report.output_rows = batch.num_rows();
        report.output_columns = column_names(&batch);
        report.elapsed_ms = started.elapsed().as_millis();

        info!(
            "Cleaning completed. Final shape: ({}, {})",
            batch.num_rows(),
            batch.num_columns()
        );
        debug!("Columns in cleaned table: {:?}", report.output_columns);

        Ok(CleanedDataset { batch, report })
    }
}

impl Default for CleaningPipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Copy of `raw` with canonical column names; column buffers are shared.
fn working_copy(raw: &RecordBatch) -> Result<RecordBatch> {
    let names = column_names(raw);
    rename_columns(raw, canonicalize_headers(names.iter().map(String::as_str)))
}

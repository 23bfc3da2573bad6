use crate::error::Result;
use arrow::csv::WriterBuilder;
use arrow::record_batch::RecordBatch;
use std::fs::File;
use std::path::Path;
use tracing::info;

/// Persists a batch as comma-delimited text: header row, empty cell for
/// null, ISO dates, `true`/`false` booleans.
pub struct CsvTableWriter;

impl CsvTableWriter {
    pub fn new() -> Self {
        Self
    }

    pub fn write_batch(&self, batch: &RecordBatch, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = File::create(path)?;
        let mut writer = WriterBuilder::new()
            .with_header(true)
            .with_delimiter(b',')
            .build(file);
        writer.write(batch)?;

        info!(
            "Wrote {} rows x {} columns to {}",
            batch.num_rows(),
            batch.num_columns(),
            path.display()
        );
        Ok(())
    }
}

impl Default for CsvTableWriter {
    fn default() -> Self {
        Self::new()
    }
}

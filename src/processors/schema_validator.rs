use arrow::record_batch::RecordBatch;

use crate::error::{ProcessingError, Result};
use crate::models::frame::has_column;
use crate::utils::constants::MANDATORY_COLUMNS;
use tracing::{debug, error};

/// Gate run before any transformation: identity, classification, location
/// and time columns must all be present.
pub struct SchemaValidator {
    required: Vec<String>,
}

impl SchemaValidator {
    pub fn new() -> Self {
        Self {
            required: MANDATORY_COLUMNS.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn with_required(required: &[&str]) -> Self {
        Self {
            required: required.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn required(&self) -> &[String] {
        &self.required
    }

    /// Required columns absent from `batch`, in declaration order.
    pub fn missing_columns(&self, batch: &RecordBatch) -> Vec<String> {
        self.required
            .iter()
            .filter(|c| !has_column(batch, c))
            .cloned()
            .collect()
    }

    pub fn validate(&self, batch: &RecordBatch) -> Result<()> {
        let missing = self.missing_columns(batch);
        if missing.is_empty() {
            debug!("Schema check passed for {} columns", batch.num_columns());
            return Ok(());
        }

        error!("Missing required columns: {:?}", missing);
        Err(ProcessingError::Schema { missing })
    }
}

impl Default for SchemaValidator {
    fn default() -> Self {
        Self::new()
    }
}

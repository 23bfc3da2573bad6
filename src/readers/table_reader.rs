use crate::error::{ProcessingError, Result};
use crate::models::frame::{batch_from_columns, column_names};
use crate::utils::constants::*;
use crate::utils::headers::unique_headers;
use arrow::array::{ArrayRef, StringArray};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use std::borrow::Cow;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Reads delimited text into an arrow `RecordBatch`.
///
/// Raw extracts keep their original headers and every column is text; the
/// pipeline canonicalizes names itself. Repeated headers get a numeric
/// suffix so no column is lost. Cleaned files are re-typed from the known
/// output schema.
pub struct TableReader {
    delimiter: u8,
}

impl TableReader {
    pub fn new() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER as u8,
        }
    }

    pub fn with_delimiter(delimiter: char) -> Result<Self> {
        if !delimiter.is_ascii() {
            return Err(ProcessingError::Config(format!(
                "Delimiter must be a single ASCII character, got '{}'",
                delimiter
            )));
        }
        Ok(Self {
            delimiter: delimiter as u8,
        })
    }

    /// Read a raw extract; every column is text, empty cells are null.
    pub fn read_raw(&self, path: &Path) -> Result<RecordBatch> {
        info!("Reading data from {}", path.display());
        let bytes = std::fs::read(path)?;
        let batch = self.parse(&decode(&bytes))?;
        info!(
            "Successfully read {} records with {} columns",
            batch.num_rows(),
            batch.num_columns()
        );
        Ok(batch)
    }

    /// Reload a cleaned dataset written by `CsvTableWriter`.
    pub fn read_cleaned(&self, path: &Path) -> Result<RecordBatch> {
        let raw = self.read_raw(path)?;
        let columns = column_names(&raw)
            .into_iter()
            .zip(raw.columns())
            .map(|(name, column)| {
                let typed = match cleaned_column_type(&name) {
                    DataType::Utf8 => Arc::clone(column),
                    data_type => cast(column, &data_type)?,
                };
                Ok((name, typed))
            })
            .collect::<Result<Vec<_>>>()?;
        batch_from_columns(columns)
    }

    /// Parse decoded delimited text.
    pub fn parse(&self, text: &str) -> Result<RecordBatch> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(text.as_bytes());

        let raw_headers = reader.headers()?.clone();
        if raw_headers.is_empty() {
            return batch_from_columns(Vec::new());
        }
        let headers = unique_headers(raw_headers.iter());

        let mut values: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];
        let mut ragged_rows = 0usize;

        for record in reader.records() {
            let record = record?;
            if record.len() != headers.len() {
                ragged_rows += 1;
            }
            for (i, column) in values.iter_mut().enumerate() {
                let cell = record.get(i).filter(|s| !s.is_empty()).map(str::to_string);
                column.push(cell);
            }
        }

        if ragged_rows > 0 {
            warn!(
                "{} rows had a field count different from the header ({}); padded or truncated",
                ragged_rows,
                headers.len()
            );
        }
        debug!("Columns read: {:?}", headers);

        batch_from_columns(
            headers
                .into_iter()
                .zip(values)
                .map(|(name, cells)| (name, Arc::new(StringArray::from(cells)) as ArrayRef))
                .collect(),
        )
    }
}

impl Default for TableReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Arrow type of a column in the cleaned output, by name.
pub fn cleaned_column_type(name: &str) -> DataType {
    match name {
        COL_START_DATE | COL_END_DATE => DataType::Date32,
        COL_START_YEAR | COL_START_MONTH | COL_START_DAY | COL_END_YEAR | COL_END_MONTH
        | COL_END_DAY | COL_DURATION_DAYS => DataType::Int64,
        COL_HAS_EXTERNAL_IDS => DataType::Boolean,
        n if IMPACT_COLUMNS.contains(&n) => DataType::Float64,
        n if MONETARY_COLUMNS.iter().any(|(_, clean)| *clean == n) => DataType::Float64,
        n if BINARY_COLUMNS.contains(&n) => DataType::Boolean,
        _ => DataType::Utf8,
    }
}

/// Decode file bytes: BOM first, then strict UTF-8, then Windows-1252.
fn decode(bytes: &[u8]) -> Cow<'_, str> {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        let (text, had_errors) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        if had_errors {
            warn!("Input contains byte sequences invalid in {}", encoding.name());
        }
        return text;
    }

    match UTF_8.decode_without_bom_handling_and_without_replacement(bytes) {
        Some(text) => text,
        None => {
            warn!("Input is not valid UTF-8; decoding as Windows-1252");
            WINDOWS_1252.decode_without_bom_handling(bytes).0
        }
    }
}

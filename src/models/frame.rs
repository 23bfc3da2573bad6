//! Helpers over arrow `RecordBatch`, the working table of the pipeline.
//!
//! Every column is nullable and column names are unique. Batches are
//! immutable, so "modifying" helpers return a new batch that shares the
//! untouched column buffers.

use std::collections::HashSet;
use std::sync::Arc;

use arrow::array::{
    Array, ArrayRef, AsArray, BooleanArray, Date32Array, Float64Array, Int64Array, StringArray,
};
use arrow::datatypes::{DataType, Date32Type, Field, Float64Type, Int64Type, Schema};
use arrow::record_batch::{RecordBatch, RecordBatchOptions};

use crate::error::{ProcessingError, Result};

/// Build a batch from named columns, rejecting duplicate names and columns
/// whose length disagrees with the first one.
pub fn batch_from_columns(columns: Vec<(String, ArrayRef)>) -> Result<RecordBatch> {
    let n_rows = columns.first().map_or(0, |(_, array)| array.len());
    let mut seen = HashSet::new();
    let mut fields = Vec::with_capacity(columns.len());
    let mut arrays = Vec::with_capacity(columns.len());

    for (name, array) in columns {
        if array.len() != n_rows {
            return Err(ProcessingError::ColumnLength {
                expected: n_rows,
                actual: array.len(),
                column: name,
            });
        }
        if !seen.insert(name.clone()) {
            return Err(ProcessingError::DuplicateColumn(name));
        }
        fields.push(Field::new(name, array.data_type().clone(), true));
        arrays.push(array);
    }

    let options = RecordBatchOptions::new().with_row_count(Some(n_rows));
    Ok(RecordBatch::try_new_with_options(
        Arc::new(Schema::new(fields)),
        arrays,
        &options,
    )?)
}

/// Replace the column called `name` in place, or append it.
pub fn with_column(batch: &RecordBatch, name: &str, array: ArrayRef) -> Result<RecordBatch> {
    if batch.num_columns() > 0 && array.len() != batch.num_rows() {
        return Err(ProcessingError::ColumnLength {
            column: name.to_string(),
            expected: batch.num_rows(),
            actual: array.len(),
        });
    }

    let mut columns = named_columns(batch);
    match columns.iter_mut().find(|(n, _)| n == name) {
        Some(slot) => slot.1 = array,
        None => columns.push((name.to_string(), array)),
    }
    batch_from_columns(columns)
}

/// Drop every listed column that exists; also returns the names actually dropped.
pub fn drop_columns(batch: &RecordBatch, names: &[&str]) -> Result<(RecordBatch, Vec<String>)> {
    let schema = batch.schema();
    let mut keep = Vec::with_capacity(schema.fields().len());
    let mut dropped = Vec::new();

    for (i, field) in schema.fields().iter().enumerate() {
        if names.contains(&field.name().as_str()) {
            dropped.push(field.name().clone());
        } else {
            keep.push(i);
        }
    }

    Ok((batch.project(&keep)?, dropped))
}

/// Same columns under new names, in order.
pub fn rename_columns(batch: &RecordBatch, names: Vec<String>) -> Result<RecordBatch> {
    batch_from_columns(names.into_iter().zip(batch.columns().iter().cloned()).collect())
}

pub fn column_names(batch: &RecordBatch) -> Vec<String> {
    batch
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect()
}

pub fn has_column(batch: &RecordBatch, name: &str) -> bool {
    batch.column_by_name(name).is_some()
}

pub fn is_empty(batch: &RecordBatch) -> bool {
    batch.num_rows() == 0 || batch.num_columns() == 0
}

pub fn text_column<'a>(batch: &'a RecordBatch, name: &str) -> Option<&'a StringArray> {
    batch.column_by_name(name)?.as_string_opt::<i32>()
}

pub fn int_column<'a>(batch: &'a RecordBatch, name: &str) -> Option<&'a Int64Array> {
    batch.column_by_name(name)?.as_primitive_opt::<Int64Type>()
}

pub fn float_column<'a>(batch: &'a RecordBatch, name: &str) -> Option<&'a Float64Array> {
    batch.column_by_name(name)?.as_primitive_opt::<Float64Type>()
}

pub fn bool_column<'a>(batch: &'a RecordBatch, name: &str) -> Option<&'a BooleanArray> {
    batch.column_by_name(name)?.as_boolean_opt()
}

pub fn date_column<'a>(batch: &'a RecordBatch, name: &str) -> Option<&'a Date32Array> {
    batch.column_by_name(name)?.as_primitive_opt::<Date32Type>()
}

/// All-text batch from string cells; handy for building fixtures.
pub fn text_batch<S: AsRef<str>>(columns: &[(&str, Vec<Option<S>>)]) -> Result<RecordBatch> {
    batch_from_columns(
        columns
            .iter()
            .map(|(name, cells)| {
                let array: StringArray = cells.iter().map(cell).collect();
                (name.to_string(), Arc::new(array) as ArrayRef)
            })
            .collect(),
    )
}

/// Whether a column holds text, the type of every raw cell.
pub fn is_text(array: &ArrayRef) -> bool {
    matches!(array.data_type(), DataType::Utf8 | DataType::LargeUtf8)
}

fn cell<S: AsRef<str>>(value: &Option<S>) -> Option<&str> {
    value.as_ref().map(AsRef::as_ref)
}

fn named_columns(batch: &RecordBatch) -> Vec<(String, ArrayRef)> {
    column_names(batch)
        .into_iter()
        .zip(batch.columns().iter().cloned())
        .collect()
}

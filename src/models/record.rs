use arrow::array::Array;
use arrow::record_batch::RecordBatch;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::frame::{bool_column, date_column, float_column, int_column, text_column};
use crate::utils::constants::*;

/// Typed view of one row of the cleaned table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct DisasterRecord {
    #[validate(length(min = 1))]
    pub dis_no: Option<String>,
    pub disaster_group: Option<String>,
    pub disaster_type: Option<String>,
    pub region: Option<String>,

    #[validate(length(equal = 3))]
    pub iso: Option<String>,
    pub country: Option<String>,

    pub start_year: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub duration_days: Option<i64>,

    #[validate(range(min = 0.0))]
    pub total_deaths: Option<f64>,
    #[validate(range(min = 0.0))]
    pub total_affected: Option<f64>,
    #[validate(range(min = 0.0))]
    pub total_damage: Option<f64>,

    pub historic: Option<bool>,
}

impl DisasterRecord {
    /// Extract every row of a cleaned batch. Columns that are absent or of an
    /// unexpected type read as null.
    pub fn from_batch(batch: &RecordBatch) -> Vec<DisasterRecord> {
        let text = |name: &str, row: usize| {
            text_column(batch, name)
                .filter(|a| a.is_valid(row))
                .map(|a| a.value(row).to_string())
        };
        let integer = |name: &str, row: usize| {
            int_column(batch, name)
                .filter(|a| a.is_valid(row))
                .map(|a| a.value(row))
        };
        let float = |name: &str, row: usize| {
            float_column(batch, name)
                .filter(|a| a.is_valid(row))
                .map(|a| a.value(row))
        };
        let date = |name: &str, row: usize| {
            date_column(batch, name)
                .filter(|a| a.is_valid(row))
                .and_then(|a| a.value_as_date(row))
        };

        (0..batch.num_rows())
            .map(|row| DisasterRecord {
                dis_no: text(COL_DIS_NO, row),
                disaster_group: text(COL_DISASTER_GROUP, row),
                disaster_type: text(COL_DISASTER_TYPE, row),
                region: text(COL_REGION, row),
                iso: text(COL_ISO, row),
                country: text(COL_COUNTRY, row),
                start_year: integer(COL_START_YEAR, row),
                start_date: date(COL_START_DATE, row),
                end_date: date(COL_END_DATE, row),
                duration_days: integer(COL_DURATION_DAYS, row),
                total_deaths: float(COL_TOTAL_DEATHS, row),
                total_affected: float(COL_TOTAL_AFFECTED, row),
                total_damage: float(COL_TOTAL_DAMAGE, row),
                historic: bool_column(batch, COL_HISTORIC)
                    .filter(|a| a.is_valid(row))
                    .map(|a| a.value(row)),
            })
            .collect()
    }

    pub fn has_negative_duration(&self) -> bool {
        self.duration_days.is_some_and(|d| d < 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::frame::{batch_from_columns, text_batch, with_column};
    use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
    use std::sync::Arc;

    #[test]
    fn test_from_batch_reads_typed_columns() {
        let batch = batch_from_columns(vec![
            (COL_DIS_NO.to_string(), Arc::new(StringArray::from(vec!["2010-0017-HTI"])) as ArrayRef),
            (COL_ISO.to_string(), Arc::new(StringArray::from(vec!["HTI"])) as ArrayRef),
            (COL_TOTAL_DEATHS.to_string(), Arc::new(Float64Array::from(vec![222570.0])) as ArrayRef),
            (COL_DURATION_DAYS.to_string(), Arc::new(Int64Array::from(vec![-2])) as ArrayRef),
        ])
        .unwrap();

        let records = DisasterRecord::from_batch(&batch);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].iso.as_deref(), Some("HTI"));
        assert_eq!(records[0].total_deaths, Some(222570.0));
        assert_eq!(records[0].country, None);
        assert!(records[0].has_negative_duration());
        assert!(records[0].validate().is_ok());
    }

    #[test]
    fn test_validation_flags_bad_values() {
        let batch = text_batch(&[(COL_ISO, vec![Some("HAITI")])]).unwrap();
        let batch = with_column(
            &batch,
            COL_TOTAL_DEATHS,
            Arc::new(Float64Array::from(vec![Some(-1.0)])),
        )
        .unwrap();

        let record = &DisasterRecord::from_batch(&batch)[0];
        assert!(record.validate().is_err());
    }

    #[test]
    fn test_text_cells_in_numeric_columns_read_as_null() {
        let batch = text_batch(&[(COL_TOTAL_DEATHS, vec![Some("12")])]).unwrap();
        assert_eq!(DisasterRecord::from_batch(&batch)[0].total_deaths, None);
    }
}

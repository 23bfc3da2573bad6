//! Column-wide type coercion. Values that cannot be represented in the target
//! type become null; the caller gets the count of such losses.
//!
//! Text goes through the locale-aware parsers in `utils::numeric`; other
//! types use arrow's cast kernels.

use std::sync::Arc;

use arrow::array::{new_null_array, Array, ArrayRef, AsArray, Float64Array, Int64Array, StringArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type, Int64Type};

use crate::error::Result;
use crate::utils::numeric::{parse_integer, parse_number};

/// Coerced column plus the number of non-null inputs that turned null.
pub struct Coerced {
    pub array: ArrayRef,
    pub nulled: usize,
}

pub fn to_float(array: &ArrayRef) -> Result<Coerced> {
    let values: ArrayRef = match array.data_type() {
        DataType::Float64 => Arc::clone(array),
        DataType::Utf8 | DataType::LargeUtf8 => {
            let parsed: Float64Array = to_text(array)?.iter().map(|s| s.and_then(parse_number)).collect();
            Arc::new(parsed)
        }
        dt if dt.is_numeric() => cast(array, &DataType::Float64)?,
        _ => new_null_array(&DataType::Float64, array.len()),
    };
    Ok(finish(array, values))
}

pub fn to_integer(array: &ArrayRef) -> Result<Coerced> {
    let values: ArrayRef = match array.data_type() {
        DataType::Int64 => Arc::clone(array),
        DataType::Utf8 | DataType::LargeUtf8 => {
            let parsed: Int64Array = to_text(array)?.iter().map(|s| s.and_then(parse_integer)).collect();
            Arc::new(parsed)
        }
        dt if dt.is_integer() => cast(array, &DataType::Int64)?,
        dt if dt.is_floating() => {
            let floats = cast(array, &DataType::Float64)?;
            let whole: Int64Array = floats
                .as_primitive::<Float64Type>()
                .unary_opt::<_, Int64Type>(|v| (v.is_finite() && v.fract() == 0.0).then_some(v as i64));
            Arc::new(whole)
        }
        _ => new_null_array(&DataType::Int64, array.len()),
    };
    Ok(finish(array, values))
}

/// Text view of any column; non-text values are rendered by arrow's cast.
pub fn to_text(array: &ArrayRef) -> Result<StringArray> {
    let text = match array.data_type() {
        DataType::Utf8 => Arc::clone(array),
        _ => cast(array, &DataType::Utf8)?,
    };
    Ok(text.as_string::<i32>().clone())
}

fn finish(input: &ArrayRef, output: ArrayRef) -> Coerced {
    let before = input.len() - input.null_count();
    let after = output.len() - output.null_count();
    Coerced {
        array: output,
        nulled: before.saturating_sub(after),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{BooleanArray, Date32Array};

    fn text(values: Vec<Option<&str>>) -> ArrayRef {
        Arc::new(StringArray::from(values))
    }

    #[test]
    fn test_text_to_float_counts_losses() {
        let coerced = to_float(&text(vec![Some("1,500"), Some("N/A"), None])).unwrap();
        assert_eq!(
            coerced.array.as_primitive::<Float64Type>(),
            &Float64Array::from(vec![Some(1500.0), None, None])
        );
        assert_eq!(coerced.nulled, 1);
    }

    #[test]
    fn test_float_is_stable() {
        let floats: ArrayRef = Arc::new(Float64Array::from(vec![Some(12.5), None]));
        let coerced = to_float(&floats).unwrap();
        assert_eq!(&coerced.array, &floats);
        assert_eq!(coerced.nulled, 0);
    }

    #[test]
    fn test_unrelated_types_become_null() {
        let flags: ArrayRef = Arc::new(BooleanArray::from(vec![Some(true), None]));
        let coerced = to_float(&flags).unwrap();
        assert_eq!(coerced.array.null_count(), 2);
        assert_eq!(coerced.nulled, 1);
    }

    #[test]
    fn test_to_integer() {
        let coerced = to_integer(&text(vec![Some("2010"), Some("2010.0"), Some("June")])).unwrap();
        assert_eq!(
            coerced.array.as_primitive::<Int64Type>(),
            &Int64Array::from(vec![Some(2010), Some(2010), None])
        );
        assert_eq!(coerced.nulled, 1);

        let floats: ArrayRef = Arc::new(Float64Array::from(vec![Some(3.0), Some(3.5)]));
        let whole = to_integer(&floats).unwrap();
        assert_eq!(
            whole.array.as_primitive::<Int64Type>(),
            &Int64Array::from(vec![Some(3), None])
        );
    }

    #[test]
    fn test_to_text_renders() {
        let ints: ArrayRef = Arc::new(Int64Array::from(vec![Some(7), None]));
        assert_eq!(to_text(&ints).unwrap(), StringArray::from(vec![Some("7"), None]));

        let dates: ArrayRef = Arc::new(Date32Array::from(vec![Some(14621)]));
        assert_eq!(to_text(&dates).unwrap().value(0), "2010-01-12");
    }
}

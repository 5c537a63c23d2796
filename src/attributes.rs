// 🏛️ Column Types - closed set of cast targets
// Every cast goes through one typed conversion per target

use crate::error::{EtlError, Result};
use crate::frame;
use crate::parser;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// COLUMN TYPE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    Integer,
    Float,
    String,
    Timestamp,
}

impl ColumnType {
    pub fn name(&self) -> &'static str {
        match self {
            ColumnType::Integer => "integer",
            ColumnType::Float => "float",
            ColumnType::String => "string",
            ColumnType::Timestamp => "timestamp",
        }
    }

    /// Type family of a polars dtype, `None` for anything outside the four
    pub fn of(dtype: &DataType) -> Option<ColumnType> {
        match dtype {
            dt if dt.is_integer() => Some(ColumnType::Integer),
            dt if dt.is_float() => Some(ColumnType::Float),
            DataType::String => Some(ColumnType::String),
            DataType::Datetime(_, _) | DataType::Date => Some(ColumnType::Timestamp),
            _ => None,
        }
    }

    pub fn dtype(&self) -> DataType {
        match self {
            ColumnType::Integer => DataType::Int64,
            ColumnType::Float => DataType::Float64,
            ColumnType::String => DataType::String,
            ColumnType::Timestamp => frame::timestamp_dtype(),
        }
    }

    /// Lenient cast: values that cannot be cast become null
    pub fn cast_lenient(&self, column: &Column) -> Result<Column> {
        let name = column.name().as_str();
        let source = column.dtype();

        let cast = match (self, source) {
            (ColumnType::String, _) => frame::text_column(name, frame::text_values(column)?),
            (ColumnType::Integer, DataType::String) => {
                let values: Vec<Option<i64>> = parse_each(column, integer_from_text)?;
                Series::new(name.into(), values).into_column()
            }
            (ColumnType::Float, DataType::String) => {
                let values: Vec<Option<f64>> = parse_each(column, parser::parse_float)?;
                Series::new(name.into(), values).into_column()
            }
            (ColumnType::Timestamp, DataType::String) => {
                frame::timestamp_column(name, parse_each(column, parser::parse_timestamp)?)?
            }
            // Bare numbers carry no calendar meaning
            (ColumnType::Timestamp, dt) if frame::is_numeric(dt) => {
                Series::full_null(name.into(), column.len(), &self.dtype()).into_column()
            }
            // Float → integer truncates toward zero; out-of-range values become null
            _ => column.cast(&self.dtype())?,
        };

        Ok(cast)
    }

    /// Strict cast: the first value lost in the cast is an error naming the column
    pub fn cast_strict(&self, column: &Column) -> Result<Column> {
        let cast = self.cast_lenient(column)?;

        let before = column.as_materialized_series().is_null();
        let after = cast.as_materialized_series().is_null();
        let lost = (&before)
            .into_iter()
            .zip(&after)
            .position(|(was, now)| was == Some(false) && now == Some(true));

        if let Some(row) = lost {
            let value = frame::text_values(column)?
                .into_iter()
                .nth(row)
                .flatten()
                .unwrap_or_default();
            return Err(EtlError::TypeConversion {
                column: column.name().to_string(),
                value,
                target: self.name().to_string(),
            });
        }

        Ok(cast)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColumnType {
    type Err = EtlError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "int" | "int64" | "integer" => Ok(ColumnType::Integer),
            "float" | "float64" | "double" | "real" => Ok(ColumnType::Float),
            "str" | "string" | "text" | "object" => Ok(ColumnType::String),
            "datetime" | "datetime64" | "timestamp" | "date" => Ok(ColumnType::Timestamp),
            _ => Err(EtlError::UnsupportedType {
                requested: s.to_string(),
            }),
        }
    }
}

// ============================================================================
// TEXT CONVERSIONS
// ============================================================================

fn parse_each<T>(column: &Column, parse: impl Fn(&str) -> Option<T>) -> Result<Vec<Option<T>>> {
    Ok(frame::text_values(column)?
        .into_iter()
        .map(|v| v.as_deref().and_then(&parse))
        .collect())
}

/// Integer text, or a whole float that fits in i64 ("7.0" → 7, "1e30" → none)
fn integer_from_text(raw: &str) -> Option<i64> {
    parser::parse_integer(raw).or_else(|| {
        parser::parse_float(raw)
            .filter(|v| v.fract() == 0.0 && v.abs() < i64::MAX as f64)
            .map(|v| v as i64)
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn text(values: &[Option<&str>]) -> Column {
        Series::new("Value".into(), values).into_column()
    }

    fn ints(column: &Column) -> Vec<Option<i64>> {
        column.as_materialized_series().i64().unwrap().into_iter().collect()
    }

    #[test]
    fn test_parse_type_names() {
        assert_eq!("int".parse::<ColumnType>().unwrap(), ColumnType::Integer);
        assert_eq!("Float".parse::<ColumnType>().unwrap(), ColumnType::Float);
        assert_eq!("str".parse::<ColumnType>().unwrap(), ColumnType::String);
        assert_eq!("datetime".parse::<ColumnType>().unwrap(), ColumnType::Timestamp);
    }

    #[test]
    fn test_unsupported_type_is_rejected() {
        let err = "complex128".parse::<ColumnType>().unwrap_err();
        assert!(matches!(err, EtlError::UnsupportedType { .. }));
        assert!(err.to_string().contains("complex128"));
    }

    #[test]
    fn test_type_of_dtype() {
        assert_eq!(ColumnType::of(&DataType::Int64), Some(ColumnType::Integer));
        assert_eq!(ColumnType::of(&DataType::Float64), Some(ColumnType::Float));
        assert_eq!(ColumnType::of(&DataType::String), Some(ColumnType::String));
        assert_eq!(ColumnType::of(&frame::timestamp_dtype()), Some(ColumnType::Timestamp));
        assert_eq!(ColumnType::of(&DataType::Boolean), None);
    }

    #[test]
    fn test_cast_text_to_integer() {
        let column = text(&[Some(" 42 "), Some("7.0"), Some("abc"), None]);
        let cast = ColumnType::Integer.cast_lenient(&column).unwrap();
        assert_eq!(ints(&cast), vec![Some(42), Some(7), None, None]);
    }

    #[test]
    fn test_cast_text_to_integer_rejects_out_of_range_floats() {
        let column = text(&[Some("1e30"), Some("-1e30"), Some("9.3e18")]);
        let cast = ColumnType::Integer.cast_lenient(&column).unwrap();
        assert_eq!(ints(&cast), vec![None, None, None]);

        let err = ColumnType::Integer.cast_strict(&column).unwrap_err();
        assert!(err.to_string().contains("1e30"));
    }

    #[test]
    fn test_cast_float_to_integer_truncates() {
        let column = Series::new("Price".into(), &[3.9, -2.5]).into_column();
        let cast = ColumnType::Integer.cast_strict(&column).unwrap();
        assert_eq!(ints(&cast), vec![Some(3), Some(-2)]);
    }

    #[test]
    fn test_cast_to_string_and_float() {
        let column = Series::new("Count".into(), &[5i64]).into_column();

        let as_text = ColumnType::String.cast_lenient(&column).unwrap();
        assert_eq!(frame::text_values(&as_text).unwrap(), vec![Some("5".to_string())]);

        let as_float = ColumnType::Float.cast_lenient(&column).unwrap();
        assert_eq!(as_float.dtype(), &DataType::Float64);
    }

    #[test]
    fn test_strict_conversion_names_column_and_value() {
        let column = Series::new("SaleDate".into(), &["2024-01-06", "soon"]).into_column();
        let err = ColumnType::Timestamp.cast_strict(&column).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("SaleDate"));
        assert!(msg.contains("soon"));
    }

    #[test]
    fn test_lenient_conversion_coerces_to_null() {
        let column = text(&[Some("soon"), Some("2024-01-06")]);
        let cast = ColumnType::Timestamp.cast_lenient(&column).unwrap();
        assert!(frame::is_timestamp(&cast));
        assert_eq!(cast.null_count(), 1);
    }
}

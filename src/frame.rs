// 📋 Frame I/O - polars DataFrames in and out of CSV, typed column access
//
// Timestamps live in Datetime(µs) columns and render back to text as
// `YYYY-MM-DD` at midnight, `YYYY-MM-DD HH:MM:SS` otherwise.

use crate::error::{EtlError, Result};
use crate::parser::{self, NullMarkers};
use chrono::{DateTime, NaiveDateTime};
use polars::prelude::*;
use std::fs;
use std::io::Cursor;
use std::path::Path;

pub const TIME_UNIT: TimeUnit = TimeUnit::Microseconds;

pub fn timestamp_dtype() -> DataType {
    DataType::Datetime(TIME_UNIT, None)
}

// ============================================================================
// COLUMN ACCESS
// ============================================================================

pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names().iter().map(|name| name.to_string()).collect()
}

pub fn has_column(df: &DataFrame, name: &str) -> bool {
    df.get_column_names().iter().any(|c| c.as_str() == name)
}

/// Column by name, or `ColumnNotFound` naming it
pub fn column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
    if !has_column(df, name) {
        return Err(EtlError::column_not_found(name));
    }
    Ok(df.column(name)?)
}

/// Fails on the first absent name
pub fn require_columns(df: &DataFrame, names: &[&str]) -> Result<()> {
    match names.iter().find(|name| !has_column(df, name)) {
        Some(missing) => Err(EtlError::column_not_found(missing)),
        None => Ok(()),
    }
}

pub fn is_timestamp(column: &Column) -> bool {
    matches!(column.dtype(), DataType::Datetime(_, _))
}

pub fn is_numeric(dtype: &DataType) -> bool {
    dtype.is_integer() || dtype.is_float()
}

// ============================================================================
// TIMESTAMP + TEXT COLUMNS
// ============================================================================

pub fn timestamp_column(name: &str, values: Vec<Option<NaiveDateTime>>) -> Result<Column> {
    let micros: Vec<Option<i64>> = values
        .into_iter()
        .map(|v| v.map(|ts| ts.and_utc().timestamp_micros()))
        .collect();
    let series = Series::new(name.into(), micros).cast(&timestamp_dtype())?;
    Ok(series.into_column())
}

/// Values of a Datetime column as naive timestamps
pub fn timestamps(column: &Column) -> Result<Vec<Option<NaiveDateTime>>> {
    let micros = column.cast(&timestamp_dtype())?.cast(&DataType::Int64)?;
    let values = micros
        .as_materialized_series()
        .i64()?
        .into_iter()
        .map(|v| v.and_then(DateTime::from_timestamp_micros).map(|dt| dt.naive_utc()))
        .collect();
    Ok(values)
}

pub fn text_column(name: &str, values: Vec<Option<String>>) -> Column {
    Series::new(name.into(), values).into_column()
}

/// Every value rendered as text; nulls stay `None`
pub fn text_values(column: &Column) -> Result<Vec<Option<String>>> {
    if is_timestamp(column) {
        return Ok(timestamps(column)?
            .into_iter()
            .map(|ts| ts.map(|ts| parser::format_timestamp(&ts)))
            .collect());
    }

    let text = column.cast(&DataType::String)?;
    let values = text
        .as_materialized_series()
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect();
    Ok(values)
}

/// Copy of `df` with every timestamp column replaced by its text rendering
pub fn render_timestamps(df: &DataFrame) -> Result<DataFrame> {
    let mut out = df.clone();
    for column in df.get_columns().iter().filter(|c| is_timestamp(c)) {
        let name = column.name().to_string();
        out.with_column(text_column(&name, text_values(column)?))?;
    }
    Ok(out)
}

// ============================================================================
// CSV I/O
// ============================================================================

pub fn read_csv(path: &Path, markers: NullMarkers) -> Result<DataFrame> {
    let bytes = fs::read(path).map_err(|e| EtlError::storage(path.display(), e))?;
    read_csv_bytes(&bytes, markers).map_err(|e| EtlError::storage(path.display(), e))
}

/// Headers are kept verbatim; column types are inferred from every row
pub fn read_csv_bytes(bytes: &[u8], markers: NullMarkers) -> PolarsResult<DataFrame> {
    let parse_options = CsvParseOptions::default().with_null_values(markers.null_values());

    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .with_parse_options(parse_options)
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()
}

/// Write with a header row and no index column. Creates parent directories.
pub fn write_csv(df: &DataFrame, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| EtlError::storage(parent.display(), e))?;
    }

    let mut out = render_timestamps(df)?;
    let mut file = fs::File::create(path).map_err(|e| EtlError::storage(path.display(), e))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut out)
        .map_err(|e| EtlError::storage(path.display(), e))
}

#[cfg(test)]
pub(crate) fn texts(df: &DataFrame, name: &str) -> Vec<String> {
    text_values(df.column(name).unwrap())
        .unwrap()
        .into_iter()
        .map(Option::unwrap_or_default)
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================

// 🧽 Data Scrubber - reusable, chainable cleaning operations over one DataFrame
//
// The scrubber owns its frame. Every mutating operation consumes the
// scrubber and hands it back, so a pipeline reads as one chain:
//
//     let cleaned = DataScrubber::new(df)
//         .trim_column_names()?
//         .remove_duplicate_rows()?
//         .trim_strings("Name")?
//         .into_frame();
//
// Column-targeted operations validate their column names before mutating.

use crate::attributes::ColumnType;
use crate::data_quality::{ConsistencyReport, DataSummary};
use crate::deduplication;
use crate::error::{EtlError, Result};
use crate::frame;
use crate::parser;
use crate::states;
use chrono::{Duration, Local, NaiveDateTime};
use polars::prelude::*;
use std::collections::HashSet;
use std::fmt;
use tracing::debug;

/// Default horizon for [`DataScrubber::filter_date_outliers`]
pub const DEFAULT_FUTURE_YEARS: u32 = 1;

/// Name of the column added by [`DataScrubber::add_state_code_column`]
pub const STATE_CODE_COLUMN: &str = "StateCode";

// ============================================================================
// FILL VALUE
// ============================================================================

/// Replacement for nulls in [`DataScrubber::handle_missing_data`]
#[derive(Debug, Clone, PartialEq)]
pub enum FillValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl FillValue {
    fn numeric(&self) -> Option<Expr> {
        match self {
            FillValue::Int(v) => Some(lit(*v)),
            FillValue::Float(v) => Some(lit(*v)),
            FillValue::Text(_) => None,
        }
    }
}

impl fmt::Display for FillValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FillValue::Int(v) => write!(f, "{}", v),
            FillValue::Float(v) => write!(f, "{}", v),
            FillValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for FillValue {
    fn from(s: &str) -> Self {
        FillValue::Text(s.to_string())
    }
}

impl From<i64> for FillValue {
    fn from(v: i64) -> Self {
        FillValue::Int(v)
    }
}

impl From<f64> for FillValue {
    fn from(v: f64) -> Self {
        FillValue::Float(v)
    }
}

// ============================================================================
// SCRUBBER
// ============================================================================

/// Owned builder over one `DataFrame`.
///
/// A failed operation consumes the scrubber and its frame is dropped with it.
/// Callers that need the data after an error should clone the scrubber first;
/// polars columns are reference-counted, so the clone does not copy the data.
#[derive(Debug, Clone)]
pub struct DataScrubber {
    df: DataFrame,
}

impl DataScrubber {
    pub fn new(df: DataFrame) -> Self {
        DataScrubber { df }
    }

    pub fn frame(&self) -> &DataFrame {
        &self.df
    }

    pub fn into_frame(self) -> DataFrame {
        self.df
    }

    // ========================================================================
    // AUDITS (no mutation)
    // ========================================================================

    /// Null counts per column and duplicate-row count, informational only
    pub fn check_consistency_before(&self) -> Result<ConsistencyReport> {
        ConsistencyReport::of(&self.df)
    }

    /// Same audit, but any remaining null or duplicate row is an error
    pub fn check_consistency_after(&self) -> Result<ConsistencyReport> {
        let report = ConsistencyReport::of(&self.df)?;

        if report.total_nulls() > 0 {
            return Err(EtlError::consistency(format!(
                "Data still contains {} null values after cleaning (columns: {})",
                report.total_nulls(),
                report.columns_with_nulls().join(", ")
            )));
        }
        if report.duplicate_count > 0 {
            return Err(EtlError::consistency(format!(
                "Data still contains {} duplicate records after cleaning",
                report.duplicate_count
            )));
        }

        Ok(report)
    }

    /// Fail if any value of `column` appears more than once
    pub fn check_unique_key(&self, column: &str) -> Result<()> {
        let key = frame::column(&self.df, column)?;
        let distinct = deduplication::distinct_rows(&self.df.select([column])?)?.height();
        if distinct == self.df.height() {
            return Ok(());
        }

        let mut seen = HashSet::new();
        let first = frame::text_values(key)?
            .into_iter()
            .find(|v| !seen.insert(v.clone()))
            .flatten()
            .unwrap_or_else(|| "null".to_string());

        Err(EtlError::consistency(format!(
            "Key column '{}' has {} repeated values (first: '{}')",
            column,
            self.df.height() - distinct,
            first
        )))
    }

    /// Structural summary + descriptive statistics, for logging
    pub fn inspect_data(&self) -> Result<DataSummary> {
        DataSummary::of(&self.df)
    }

    /// Case-insensitive, trimmed lookup; unknown names give "State not found"
    pub fn map_state_name_to_code(state_name: &str) -> &'static str {
        states::state_code(state_name)
    }

    // ========================================================================
    // COLUMN OPERATIONS
    // ========================================================================

    /// Cast every value; the first value that cannot be cast is an error
    pub fn convert_column_type(mut self, column: &str, target: ColumnType) -> Result<Self> {
        let cast = target.cast_strict(frame::column(&self.df, column)?)?;
        self.df.with_column(cast)?;
        Ok(self)
    }

    /// Cast every value; values that cannot be cast become null
    pub fn coerce_column_type(mut self, column: &str, target: ColumnType) -> Result<Self> {
        let cast = target.cast_lenient(frame::column(&self.df, column)?)?;
        self.df.with_column(cast)?;
        Ok(self)
    }

    pub fn drop_columns(mut self, columns: &[&str]) -> Result<Self> {
        frame::require_columns(&self.df, columns)?;
        let keep: Vec<String> = frame::column_names(&self.df)
            .into_iter()
            .filter(|name| !columns.contains(&name.as_str()))
            .collect();
        self.df = self.df.select(keep)?;
        Ok(self)
    }

    pub fn rename_columns(mut self, mapping: &[(&str, &str)]) -> Result<Self> {
        let old: Vec<&str> = mapping.iter().map(|(from, _)| *from).collect();
        frame::require_columns(&self.df, &old)?;

        let renamed: Vec<String> = frame::column_names(&self.df)
            .into_iter()
            .map(|name| match mapping.iter().find(|(from, _)| *from == name) {
                Some((_, to)) => to.to_string(),
                None => name,
            })
            .collect();
        self.df.set_column_names(renamed)?;
        Ok(self)
    }

    /// Keep exactly `columns`, in that order. A subset drops the rest.
    pub fn reorder_columns(mut self, columns: &[&str]) -> Result<Self> {
        frame::require_columns(&self.df, columns)?;
        self.df = self.df.select(columns.iter().copied())?;
        Ok(self)
    }

    /// Trim whitespace around every header
    pub fn trim_column_names(mut self) -> Result<Self> {
        let trimmed: Vec<String> = frame::column_names(&self.df)
            .iter()
            .map(|name| name.trim().to_string())
            .collect();
        self.df.set_column_names(trimmed)?;
        Ok(self)
    }

    pub fn trim_strings(self, column: &str) -> Result<Self> {
        self.format_strings(column, |e| e.str().strip_chars(lit(NULL)))
    }

    pub fn lower_and_trim_strings(self, column: &str) -> Result<Self> {
        self.format_strings(column, |e| e.str().to_lowercase().str().strip_chars(lit(NULL)))
    }

    pub fn upper_and_trim_strings(self, column: &str) -> Result<Self> {
        self.format_strings(column, |e| e.str().to_uppercase().str().strip_chars(lit(NULL)))
    }

    /// Only String columns are rewritten; other dtypes pass through
    fn format_strings<F>(mut self, column: &str, f: F) -> Result<Self>
    where
        F: FnOnce(Expr) -> Expr,
    {
        if frame::column(&self.df, column)?.dtype() == &DataType::String {
            self.df = self
                .df
                .clone()
                .lazy()
                .with_column(f(col(column)).alias(column))
                .collect()?;
        }
        Ok(self)
    }

    /// Add `"Standard" + column` holding each value parsed as a timestamp.
    /// The source column is left as is.
    pub fn parse_date_column(mut self, column: &str) -> Result<Self> {
        let source = frame::column(&self.df, column)?;

        let parsed: Vec<Option<NaiveDateTime>> = if frame::is_timestamp(source) {
            frame::timestamps(source)?
        } else {
            frame::text_values(source)?
                .into_iter()
                .map(|value| match value {
                    None => Ok(None),
                    Some(raw) => parser::parse_timestamp(&raw)
                        .map(Some)
                        .ok_or_else(|| EtlError::invalid_date(column, &raw)),
                })
                .collect::<Result<_>>()?
        };

        let standard = frame::timestamp_column(&format!("Standard{}", column), parsed)?;
        self.df.with_column(standard)?;
        Ok(self)
    }

    /// Derive [`STATE_CODE_COLUMN`] from the state names in `column`
    pub fn add_state_code_column(mut self, column: &str) -> Result<Self> {
        let codes: Vec<&str> = frame::text_values(frame::column(&self.df, column)?)?
            .iter()
            .map(|name| name.as_deref().map_or(states::STATE_NOT_FOUND, states::state_code))
            .collect();

        self.df.with_column(Series::new(STATE_CODE_COLUMN.into(), codes))?;
        Ok(self)
    }

    // ========================================================================
    // ROW OPERATIONS
    // ========================================================================

    /// Keep rows whose ISO-8601 value in `column` lies in [lower, upper],
    /// with a horizon of [`DEFAULT_FUTURE_YEARS`] past today
    pub fn filter_date_outliers(self, column: &str, lower: &str, upper: &str) -> Result<Self> {
        self.filter_date_outliers_within(column, lower, upper, DEFAULT_FUTURE_YEARS)
    }

    /// Unparsable values and values later than now + `future_years` count as
    /// missing and their rows are dropped; the survivors are then kept only
    /// inside [lower, upper] inclusive. The column ends up holding timestamps.
    pub fn filter_date_outliers_within(
        mut self,
        column: &str,
        lower: &str,
        upper: &str,
        future_years: u32,
    ) -> Result<Self> {
        let lower_ts =
            parser::parse_iso_timestamp(lower).ok_or_else(|| EtlError::invalid_date(column, lower))?;
        let upper_ts =
            parser::parse_iso_timestamp(upper).ok_or_else(|| EtlError::invalid_date(column, upper))?;

        let horizon = Local::now().naive_local() + Duration::days(365 * i64::from(future_years));

        let source = frame::column(&self.df, column)?;
        let parsed: Vec<Option<NaiveDateTime>> = if frame::is_timestamp(source) {
            frame::timestamps(source)?
        } else if source.dtype() == &DataType::String {
            frame::text_values(source)?
                .iter()
                .map(|v| v.as_deref().and_then(parser::parse_iso_timestamp))
                .collect()
        } else {
            vec![None; source.len()]
        };
        let parsed: Vec<Option<NaiveDateTime>> = parsed
            .into_iter()
            .map(|ts| ts.filter(|ts| *ts <= horizon))
            .collect();

        let keep: BooleanChunked = parsed
            .iter()
            .map(|ts| matches!(ts, Some(ts) if *ts >= lower_ts && *ts <= upper_ts))
            .collect();

        self.df.with_column(frame::timestamp_column(column, parsed)?)?;

        let before = self.df.height();
        self.df = self.df.filter(&keep)?;
        debug!(column, removed = before - self.df.height(), "filtered date outliers");

        Ok(self)
    }

    /// Keep rows whose numeric value in `column` lies in [lower, upper].
    /// Non-numeric values are outside every range.
    pub fn filter_numeric_outliers(mut self, column: &str, lower: f64, upper: f64) -> Result<Self> {
        let values = ColumnType::Float.cast_lenient(frame::column(&self.df, column)?)?;
        let keep: BooleanChunked = values
            .as_materialized_series()
            .f64()?
            .into_iter()
            .map(|v| v.is_some_and(|v| v >= lower && v <= upper))
            .collect();

        let before = self.df.height();
        self.df = self.df.filter(&keep)?;
        debug!(column, removed = before - self.df.height(), "filtered numeric outliers");

        Ok(self)
    }

    /// `drop` removes every row holding a null; otherwise a `fill_value`
    /// replaces every null. With both set, `drop` wins. With neither, no-op.
    ///
    /// A numeric fill keeps numeric columns numeric. Any other combination
    /// turns the affected column into text.
    pub fn handle_missing_data(mut self, drop: bool, fill_value: Option<FillValue>) -> Result<Self> {
        if drop {
            let names = frame::column_names(&self.df);
            self.df = self.without_nulls_in(&names)?;
            return Ok(self);
        }

        let Some(fill) = fill_value else {
            return Ok(self);
        };

        let mut df = self.df.clone();
        let mut fills = Vec::new();
        for column in self.df.get_columns().iter().filter(|c| c.null_count() > 0) {
            let name = column.name().as_str();
            match fill.numeric() {
                Some(value) if frame::is_numeric(column.dtype()) => {
                    fills.push(col(name).fill_null(value).alias(name));
                }
                _ => {
                    if frame::is_timestamp(column) {
                        df.with_column(frame::text_column(name, frame::text_values(column)?))?;
                    }
                    fills.push(
                        col(name)
                            .cast(DataType::String)
                            .fill_null(lit(fill.to_string()))
                            .alias(name),
                    );
                }
            }
        }

        if !fills.is_empty() {
            self.df = df.lazy().with_columns(fills).collect()?;
        }
        Ok(self)
    }

    /// Drop rows that are null in any of `columns`
    pub fn drop_rows_missing(mut self, columns: &[&str]) -> Result<Self> {
        frame::require_columns(&self.df, columns)?;
        let names: Vec<String> = columns.iter().map(|c| c.to_string()).collect();

        let before = self.df.height();
        self.df = self.without_nulls_in(&names)?;
        debug!(removed = before - self.df.height(), "dropped rows missing required keys");

        Ok(self)
    }

    fn without_nulls_in(&self, columns: &[String]) -> Result<DataFrame> {
        let mask = columns
            .iter()
            .map(|name| col(name.as_str()).is_not_null())
            .reduce(|all, next| all.and(next));

        match mask {
            Some(mask) => Ok(self.df.clone().lazy().filter(mask).collect()?),
            None => Ok(self.df.clone()),
        }
    }

    /// Exact all-column duplicates; first occurrence kept
    pub fn remove_duplicate_rows(mut self) -> Result<Self> {
        self.df = deduplication::distinct_rows(&self.df)?;
        Ok(self)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::texts;

    fn customers() -> DataFrame {
        df!(
            "CustomerID" => [1001i64, 1002, 1003],
            "Name" => ["  Alice ", "Bob", "Cara"],
            "Region" => [Some("East"), None, Some("West")],
            "BirthYear" => [1850i64, 1999, 2030]
        )
        .unwrap()
    }

    fn dated(values: &[&str]) -> DataFrame {
        df!("SaleDate" => values).unwrap()
    }

    #[test]
    fn test_remove_duplicate_rows_is_idempotent() {
        let df = df!(
            "CustomerID" => [1001i64, 1002, 1002, 1003],
            "Region" => [Some("East"), None, None, Some("West")]
        )
        .unwrap();

        let once = DataScrubber::new(df).remove_duplicate_rows().unwrap();
        let twice = once.clone().remove_duplicate_rows().unwrap();

        assert_eq!(once.frame().height(), 3);
        assert!(once.frame().equals_missing(twice.frame()));
    }

    #[test]
    fn test_missing_column_named_in_every_targeted_operation() {
        let s = || DataScrubber::new(customers());
        let missing = "Ghost";

        let errors = vec![
            s().convert_column_type(missing, ColumnType::Integer).unwrap_err(),
            s().coerce_column_type(missing, ColumnType::Float).unwrap_err(),
            s().drop_columns(&["Name", missing]).unwrap_err(),
            s().filter_date_outliers(missing, "2020-01-01", "2025-01-01").unwrap_err(),
            s().filter_numeric_outliers(missing, 0.0, 1.0).unwrap_err(),
            s().trim_strings(missing).unwrap_err(),
            s().lower_and_trim_strings(missing).unwrap_err(),
            s().upper_and_trim_strings(missing).unwrap_err(),
            s().add_state_code_column(missing).unwrap_err(),
            s().parse_date_column(missing).unwrap_err(),
            s().rename_columns(&[("Name", "N"), (missing, "G")]).unwrap_err(),
            s().reorder_columns(&["Name", missing]).unwrap_err(),
            s().drop_rows_missing(&[missing]).unwrap_err(),
            s().check_unique_key(missing).unwrap_err(),
        ];

        for err in errors {
            assert!(
                matches!(&err, EtlError::ColumnNotFound { column } if column == missing),
                "unexpected error: {}",
                err
            );
            assert!(err.to_string().contains(missing));
        }
    }

    #[test]
    fn test_failed_operation_leaves_earlier_clone_intact() {
        let scrubber = DataScrubber::new(customers());
        let backup = scrubber.clone();

        assert!(scrubber.drop_columns(&["Name", "Ghost"]).is_err());

        assert_eq!(frame::column_names(backup.frame()), ["CustomerID", "Name", "Region", "BirthYear"]);
        assert!(backup.frame().equals_missing(&customers()));
    }

    #[test]
    fn test_map_state_name_to_code() {
        assert_eq!(DataScrubber::map_state_name_to_code("  California "), "CA");
        assert_eq!(DataScrubber::map_state_name_to_code("Atlantis"), "State not found");
    }

    #[test]
    fn test_filter_numeric_outliers_birth_year() {
        let df = DataScrubber::new(customers())
            .filter_numeric_outliers("BirthYear", 1900.0, 2025.0)
            .unwrap()
            .into_frame();

        assert_eq!(df.height(), 1);
        assert_eq!(texts(&df, "BirthYear"), vec!["1999"]);
    }

    #[test]
    fn test_filter_numeric_outliers_is_inclusive() {
        let df = df!("BirthYear" => [Some("1900"), Some("2025.0"), Some("1950"), Some("abc"), None]).unwrap();
        let df = DataScrubber::new(df)
            .filter_numeric_outliers("BirthYear", 1900.0, 2025.0)
            .unwrap()
            .into_frame();

        assert_eq!(texts(&df, "BirthYear"), vec!["1900", "2025.0", "1950"]);
    }

    #[test]
    fn test_filter_date_outliers() {
        let df = dated(&["2019-12-31", "2021-06-01", "not-a-date", "2099-01-01"]);
        let df = DataScrubber::new(df)
            .filter_date_outliers("SaleDate", "2020-01-01", "2025-01-01")
            .unwrap()
            .into_frame();

        assert_eq!(df.height(), 1);
        assert_eq!(texts(&df, "SaleDate"), vec!["2021-06-01"]);
        assert!(frame::is_timestamp(df.column("SaleDate").unwrap()));
    }

    #[test]
    fn test_filter_date_outliers_drops_far_future_even_inside_bounds() {
        let df = dated(&["2021-06-01", "2090-01-01"]);
        let df = DataScrubber::new(df)
            .filter_date_outliers_within("SaleDate", "2000-01-01", "2100-01-01", 1)
            .unwrap()
            .into_frame();

        assert_eq!(df.height(), 1);
    }

    #[test]
    fn test_filter_date_outliers_rejects_bad_bounds() {
        let err = DataScrubber::new(dated(&["2021-06-01"]))
            .filter_date_outliers("SaleDate", "last tuesday", "2025-01-01")
            .unwrap_err();

        assert!(matches!(err, EtlError::InvalidDate { .. }));
        assert!(err.to_string().contains("last tuesday"));
    }

    #[test]
    fn test_check_after_fails_on_remaining_null() {
        let scrubber = DataScrubber::new(customers()).remove_duplicate_rows().unwrap();

        // Before-check only reports
        let report = scrubber.check_consistency_before().unwrap();
        assert_eq!(report.total_nulls(), 1);

        let err = scrubber.check_consistency_after().unwrap_err();
        assert!(matches!(err, EtlError::Consistency { .. }));
        assert!(err.to_string().contains("Region"));
    }

    #[test]
    fn test_check_after_fails_on_duplicates() {
        let df = df!("A" => [1i64, 1]).unwrap();
        let err = DataScrubber::new(df).check_consistency_after().unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_check_after_passes_once_filled() {
        let scrubber = DataScrubber::new(customers())
            .handle_missing_data(false, Some("N/A".into()))
            .unwrap();
        let report = scrubber.check_consistency_after().unwrap();

        assert!(report.is_clean());
        assert_eq!(texts(scrubber.frame(), "Region"), vec!["East", "N/A", "West"]);
    }

    #[test]
    fn test_fill_keeps_numeric_columns_numeric() {
        let df = df!(
            "Stock" => [Some(3i64), None],
            "Note" => [Some("x"), None]
        )
        .unwrap();

        let numeric = DataScrubber::new(df.clone())
            .handle_missing_data(false, Some(0i64.into()))
            .unwrap()
            .into_frame();
        assert_eq!(numeric.column("Stock").unwrap().dtype(), &DataType::Int64);
        assert_eq!(texts(&numeric, "Stock"), vec!["3", "0"]);
        assert_eq!(texts(&numeric, "Note"), vec!["x", "0"]);

        let text = DataScrubber::new(df)
            .handle_missing_data(false, Some("N/A".into()))
            .unwrap()
            .into_frame();
        assert_eq!(texts(&text, "Stock"), vec!["3", "N/A"]);
    }

    #[test]
    fn test_handle_missing_data_modes() {
        let dropped = DataScrubber::new(customers())
            .handle_missing_data(true, None)
            .unwrap();
        assert_eq!(dropped.frame().height(), 2);

        // drop wins over fill
        let both = DataScrubber::new(customers())
            .handle_missing_data(true, Some("N/A".into()))
            .unwrap();
        assert!(both.frame().equals_missing(dropped.frame()));

        let neither = DataScrubber::new(customers())
            .handle_missing_data(false, None)
            .unwrap();
        assert!(neither.frame().equals_missing(&customers()));
    }

    #[test]
    fn test_string_formatting() {
        let df = DataScrubber::new(customers())
            .trim_strings("Name")
            .unwrap()
            .upper_and_trim_strings("Region")
            .unwrap()
            .into_frame();
        assert_eq!(texts(&df, "Name"), vec!["Alice", "Bob", "Cara"]);
        assert_eq!(texts(&df, "Region"), vec!["EAST", "", "WEST"]);
        assert_eq!(df.column("Region").unwrap().null_count(), 1);

        let lowered = DataScrubber::new(df)
            .lower_and_trim_strings("Name")
            .unwrap()
            .into_frame();
        assert_eq!(texts(&lowered, "Name"), vec!["alice", "bob", "cara"]);
    }

    #[test]
    fn test_string_ops_skip_numeric_columns() {
        let df = DataScrubber::new(customers())
            .trim_strings("CustomerID")
            .unwrap()
            .into_frame();
        assert_eq!(df.column("CustomerID").unwrap().dtype(), &DataType::Int64);
    }

    #[test]
    fn test_parse_date_column_adds_standard_column() {
        let df = df!("JoinDate" => ["2023-01-15", "2/3/2022"]).unwrap();
        let df = DataScrubber::new(df)
            .parse_date_column("JoinDate")
            .unwrap()
            .into_frame();

        assert_eq!(frame::column_names(&df), ["JoinDate", "StandardJoinDate"]);
        assert_eq!(texts(&df, "JoinDate"), vec!["2023-01-15", "2/3/2022"]);
        assert_eq!(texts(&df, "StandardJoinDate"), vec!["2023-01-15", "2022-02-03"]);
    }

    #[test]
    fn test_parse_date_column_rejects_garbage() {
        let df = df!("JoinDate" => ["someday"]).unwrap();
        let err = DataScrubber::new(df).parse_date_column("JoinDate").unwrap_err();
        assert!(matches!(err, EtlError::InvalidDate { .. }));
    }

    #[test]
    fn test_add_state_code_column() {
        let df = df!("State" => [Some(" texas"), Some("Narnia"), None]).unwrap();
        let df = DataScrubber::new(df)
            .add_state_code_column("State")
            .unwrap()
            .into_frame();

        assert_eq!(texts(&df, STATE_CODE_COLUMN), vec!["TX", "State not found", "State not found"]);
    }

    #[test]
    fn test_convert_and_coerce() {
        let df = dated(&["2024-03-01", "??"]);

        let err = DataScrubber::new(df.clone())
            .convert_column_type("SaleDate", ColumnType::Timestamp)
            .unwrap_err();
        assert!(matches!(err, EtlError::TypeConversion { .. }));

        let coerced = DataScrubber::new(df)
            .coerce_column_type("SaleDate", ColumnType::Timestamp)
            .unwrap()
            .drop_rows_missing(&["SaleDate"])
            .unwrap()
            .into_frame();
        assert_eq!(coerced.height(), 1);
    }

    #[test]
    fn test_trim_column_names_rename_and_reorder() {
        let df = df!(" CustomerID " => [1i64], "Name  " => ["A"], "Extra" => [0i64]).unwrap();
        let df = DataScrubber::new(df)
            .trim_column_names()
            .unwrap()
            .rename_columns(&[("Name", "FullName")])
            .unwrap()
            .drop_columns(&["Extra"])
            .unwrap()
            .reorder_columns(&["FullName", "CustomerID"])
            .unwrap()
            .into_frame();

        assert_eq!(frame::column_names(&df), ["FullName", "CustomerID"]);
    }

    #[test]
    fn test_check_unique_key() {
        let scrubber = DataScrubber::new(customers());
        assert!(scrubber.check_unique_key("CustomerID").is_ok());

        let df = df!("CustomerID" => [7i64, 7, 8], "Name" => ["A", "B", "C"]).unwrap();
        let err = DataScrubber::new(df).check_unique_key("CustomerID").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("1 repeated"));
        assert!(msg.contains("'7'"));
    }

    #[test]
    fn test_inspect_data_does_not_mutate() {
        let scrubber = DataScrubber::new(customers());
        let summary = scrubber.inspect_data().unwrap();

        assert_eq!(summary.row_count, 3);
        assert!(scrubber.frame().equals_missing(&customers()));
    }
}

// ✅ Data Quality - consistency audit + structural/statistical summary
// The consistency report is the pipeline's correctness gate; the summary
// is diagnostic only.

use crate::attributes::ColumnType;
use crate::deduplication;
use crate::error::Result;
use crate::frame;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// CONSISTENCY REPORT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NullCount {
    pub column: String,
    pub nulls: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsistencyReport {
    pub row_count: usize,
    pub null_counts: Vec<NullCount>,
    pub duplicate_count: usize,
}

impl ConsistencyReport {
    pub fn of(df: &DataFrame) -> Result<Self> {
        let null_counts = df
            .get_columns()
            .iter()
            .map(|column| NullCount {
                column: column.name().to_string(),
                nulls: column.null_count(),
            })
            .collect();

        Ok(ConsistencyReport {
            row_count: df.height(),
            null_counts,
            duplicate_count: deduplication::count_duplicates(df)?,
        })
    }

    pub fn total_nulls(&self) -> usize {
        self.null_counts.iter().map(|n| n.nulls).sum()
    }

    /// Columns that still hold at least one null
    pub fn columns_with_nulls(&self) -> Vec<&str> {
        self.null_counts
            .iter()
            .filter(|n| n.nulls > 0)
            .map(|n| n.column.as_str())
            .collect()
    }

    pub fn is_clean(&self) -> bool {
        self.total_nulls() == 0 && self.duplicate_count == 0
    }

    pub fn summary(&self) -> String {
        format!(
            "{} rows, {} nulls across {} columns, {} duplicate rows",
            self.row_count,
            self.total_nulls(),
            self.columns_with_nulls().len(),
            self.duplicate_count
        )
    }
}

// ============================================================================
// DATA SUMMARY (info + describe)
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub name: String,
    /// "integer", "float", "string", "timestamp", or the raw polars dtype
    pub dtype: String,
    pub non_null: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnStats {
    pub name: String,
    pub count: usize,
    pub mean: f64,
    pub std: Option<f64>,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataSummary {
    pub row_count: usize,
    pub columns: Vec<ColumnInfo>,
    /// Descriptive statistics for numeric columns only
    pub statistics: Vec<ColumnStats>,
}

impl DataSummary {
    pub fn of(df: &DataFrame) -> Result<Self> {
        let mut columns = Vec::with_capacity(df.width());
        let mut statistics = Vec::new();

        for column in df.get_columns() {
            let dtype = ColumnType::of(column.dtype())
                .map_or_else(|| column.dtype().to_string(), |t| t.name().to_string());

            if frame::is_numeric(column.dtype()) {
                if let Some(stats) = describe(column)? {
                    statistics.push(stats);
                }
            }

            columns.push(ColumnInfo {
                name: column.name().to_string(),
                dtype,
                non_null: column.len() - column.null_count(),
            });
        }

        Ok(DataSummary {
            row_count: df.height(),
            columns,
            statistics,
        })
    }

    /// Structural part: one line per column
    pub fn info(&self) -> String {
        let mut out = format!(
            "{} entries, {} columns\n",
            self.row_count,
            self.columns.len()
        );
        for (idx, col) in self.columns.iter().enumerate() {
            out.push_str(&format!(
                "{:>3}  {:<24} {:>8} non-null  {}\n",
                idx, col.name, col.non_null, col.dtype
            ));
        }
        out
    }

    /// Statistical part: one line per numeric column
    pub fn describe(&self) -> String {
        let mut out = format!(
            "{:<24} {:>8} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12}\n",
            "", "count", "mean", "std", "min", "25%", "50%", "75%", "max"
        );
        for s in &self.statistics {
            let std = s.std.map_or_else(|| "NaN".to_string(), |v| format!("{:.3}", v));
            out.push_str(&format!(
                "{:<24} {:>8} {:>12.3} {:>12} {:>12.3} {:>12.3} {:>12.3} {:>12.3} {:>12.3}\n",
                s.name, s.count, s.mean, std, s.min, s.q25, s.median, s.q75, s.max
            ));
        }
        out
    }
}

impl fmt::Display for DataSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}", self.info(), self.describe())
    }
}

/// count/mean/std/min/quartiles/max over the non-null values, as `describe` reports them
fn describe(column: &Column) -> Result<Option<ColumnStats>> {
    let values = column.cast(&DataType::Float64)?;
    let ca = values.as_materialized_series().f64()?;

    let count = ca.len() - ca.null_count();
    if count == 0 {
        return Ok(None);
    }

    Ok(Some(ColumnStats {
        name: column.name().to_string(),
        count,
        mean: ca.mean().unwrap_or(f64::NAN),
        // Sample standard deviation (n - 1)
        std: ca.std(1).filter(|v| v.is_finite()),
        min: ca.min().unwrap_or(f64::NAN),
        q25: quantile(ca, 0.25)?,
        median: ca.median().unwrap_or(f64::NAN),
        q75: quantile(ca, 0.75)?,
        max: ca.max().unwrap_or(f64::NAN),
    }))
}

fn quantile(ca: &Float64Chunked, q: f64) -> Result<f64> {
    Ok(ca.quantile(q, QuantileMethod::Linear)?.unwrap_or(f64::NAN))
}

// ============================================================================
// TESTS
// ============================================================================

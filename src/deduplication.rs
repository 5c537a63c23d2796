// 🔍 Row Deduplication - exact, all-column duplicate detection
// Rows compare on every column; nulls compare equal to each other.
// Float columns are normalised first so -0.0 and 0.0 are the same value,
// timestamps compare on their full microsecond value.

use crate::error::Result;
use polars::prelude::*;

/// Lazy view of `df` with float columns normalised for comparison
pub fn normalized(df: &DataFrame) -> LazyFrame {
    let floats: Vec<Expr> = df
        .get_columns()
        .iter()
        .filter(|c| c.dtype().is_float())
        .map(|c| {
            let name = c.name().as_str();
            // IEEE addition: -0.0 + 0.0 == +0.0
            (col(name) + lit(0.0)).alias(name)
        })
        .collect();

    if floats.is_empty() {
        df.clone().lazy()
    } else {
        df.clone().lazy().with_columns(floats)
    }
}

/// Rows with exact duplicates removed; first occurrence kept, order preserved
pub fn distinct_rows(df: &DataFrame) -> Result<DataFrame> {
    if df.width() == 0 {
        return Ok(df.clone());
    }

    Ok(normalized(df)
        .unique_stable(None, UniqueKeepStrategy::First)
        .collect()?)
}

/// Number of rows that repeat an earlier row
pub fn count_duplicates(df: &DataFrame) -> Result<usize> {
    Ok(df.height() - distinct_rows(df)?.height())
}

// 🔎 Value Parsing - raw text → typed values
// NA markers for the CSV reader, numeric and ISO-8601/lenient timestamp parsing

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use polars::prelude::NullValues;

// ============================================================================
// NA MARKERS
// ============================================================================

/// Spellings treated as "missing" when a raw extract is read.
/// The empty string is always missing and is not listed here.
pub const NA_VALUES: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// How a reader decides that a raw field is missing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullMarkers {
    /// Empty fields and every spelling in [`NA_VALUES`]
    Standard,
    /// Only empty fields (used when reloading prepared files)
    EmptyOnly,
}

impl NullMarkers {
    pub fn is_null(&self, raw: &str) -> bool {
        if raw.is_empty() {
            return true;
        }
        match self {
            NullMarkers::Standard => NA_VALUES.contains(&raw),
            NullMarkers::EmptyOnly => false,
        }
    }

    /// Extra null spellings handed to the polars CSV reader.
    /// Empty fields are read as null either way.
    pub fn null_values(&self) -> Option<NullValues> {
        match self {
            NullMarkers::Standard => Some(NullValues::AllColumns(
                NA_VALUES.iter().map(|v| (*v).into()).collect(),
            )),
            NullMarkers::EmptyOnly => None,
        }
    }
}

// ============================================================================
// NUMBERS
// ============================================================================

pub fn parse_integer(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}

pub fn parse_float(raw: &str) -> Option<f64> {
    let value = raw.trim().parse::<f64>().ok()?;
    if value.is_finite() {
        Some(value)
    } else {
        None
    }
}

// ============================================================================
// TIMESTAMPS
// ============================================================================

const ISO_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const LENIENT_DATETIME_FORMATS: &[&str] = &["%m/%d/%Y %H:%M:%S", "%m/%d/%Y %H:%M", "%Y/%m/%d %H:%M:%S"];

const LENIENT_DATE_FORMATS: &[&str] = &["%m/%d/%Y", "%Y/%m/%d", "%d-%b-%Y", "%B %d, %Y"];

/// Parse a strict ISO-8601 date or datetime.
///
/// Offsets are normalised to UTC and dropped, so every result is naive.
pub fn parse_iso_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }

    for format in ISO_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN))
}

/// Parse ISO-8601 first, then the common US/slash layouts found in raw extracts
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    if let Some(dt) = parse_iso_timestamp(raw) {
        return Some(dt);
    }

    let raw = raw.trim();

    for format in LENIENT_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }

    LENIENT_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
        .map(|d| d.and_time(NaiveTime::MIN))
}

/// Render a timestamp for CSV/SQLite: date only when the time is midnight
pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    if ts.time() == NaiveTime::MIN {
        ts.format("%Y-%m-%d").to_string()
    } else {
        ts.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

// ============================================================================
// TESTS
// ============================================================================

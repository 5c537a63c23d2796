// ❌ Error Model - every failure is fatal to the current run
// Column errors always carry the offending column name

use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Column name '{column}' not found in the dataset")]
    ColumnNotFound { column: String },

    #[error("Invalid date in '{column}': '{value}' is not a valid ISO-8601 timestamp")]
    InvalidDate { column: String, value: String },

    #[error("Consistency check failed: {message}")]
    Consistency { message: String },

    #[error("Unsupported column type '{requested}' (expected integer, float, string or timestamp)")]
    UnsupportedType { requested: String },

    #[error("Cannot convert '{value}' in column '{column}' to {target}")]
    TypeConversion {
        column: String,
        value: String,
        target: String,
    },

    #[error("Storage error on '{target}': {source}")]
    Storage {
        target: String,
        #[source]
        source: StorageSource,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("DataFrame operation failed: {0}")]
    Frame(#[from] PolarsError),
}

/// Underlying I/O failure behind an [`EtlError::Storage`]
#[derive(Error, Debug)]
pub enum StorageSource {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Polars(#[from] PolarsError),

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    #[error("{0}")]
    Schema(String),
}

impl EtlError {
    pub fn column_not_found(column: &str) -> Self {
        EtlError::ColumnNotFound {
            column: column.to_string(),
        }
    }

    pub fn invalid_date(column: &str, value: &str) -> Self {
        EtlError::InvalidDate {
            column: column.to_string(),
            value: value.to_string(),
        }
    }

    pub fn consistency(message: impl Into<String>) -> Self {
        EtlError::Consistency {
            message: message.into(),
        }
    }

    /// Wrap a polars/sqlite/io error with the file or table it happened on
    pub fn storage(target: impl std::fmt::Display, source: impl Into<StorageSource>) -> Self {
        EtlError::Storage {
            target: target.to_string(),
            source: source.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;

// Smart Sales ETL - Core Library
// Scrubber, per-entity pipelines and warehouse loader, shared by the CLI and tests

pub mod error;
pub mod parser;
pub mod frame;          // polars CSV I/O and column access
pub mod attributes;     // Column types and conversions
pub mod deduplication;  // Exact duplicate rows
pub mod data_quality;   // Consistency reports, summaries, statistics
pub mod states;         // US state name → code
pub mod scrubber;       // DataScrubber
pub mod entities;       // Per-entity pipelines
pub mod schema;         // Warehouse DDL
pub mod db;             // Warehouse loader
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use error::{EtlError, Result, StorageSource};
pub use parser::NullMarkers;
pub use attributes::ColumnType;
pub use data_quality::{ConsistencyReport, DataSummary, ColumnStats, NullCount};
pub use scrubber::{DataScrubber, FillValue};
pub use states::{state_code, STATE_NOT_FOUND};
pub use entities::{prepare_all, PipelineReport};
pub use schema::TableSchema;
pub use db::{load_prepared, load_warehouse, open_warehouse, LoadReport};
pub use config::EtlConfig;
pub use logging::init_logging;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

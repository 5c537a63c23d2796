// 🧾 Sales pipeline
//
// Unparsable SaleDate values are coerced to missing and dropped together with
// rows missing any key; StateCode is derived from the free-text State.

use super::{post_clean_audit, pre_clean_audit, run_pipeline, Cleaned, PipelineReport, FILL_VALUE};
use crate::attributes::ColumnType;
use crate::config::EtlConfig;
use crate::error::Result;
use crate::scrubber::DataScrubber;
use polars::prelude::DataFrame;

pub const ENTITY: &str = "sales";
pub const RAW_FILE: &str = "sales_data.csv";
pub const PREPARED_FILE: &str = "sales_data_prepared.csv";

const REQUIRED: [&str; 4] = ["CustomerID", "TransactionID", "ProductID", "SaleDate"];

pub fn clean(df: DataFrame) -> Result<Cleaned> {
    let scrubber = DataScrubber::new(df)
        .trim_column_names()?
        .remove_duplicate_rows()?
        .coerce_column_type("SaleDate", ColumnType::Timestamp)?
        .drop_rows_missing(&REQUIRED)?;

    let before = pre_clean_audit(ENTITY, &scrubber)?;

    let scrubber = scrubber
        .handle_missing_data(false, Some(FILL_VALUE.into()))?
        .add_state_code_column("State")?;

    let after = post_clean_audit(ENTITY, &scrubber, Some("TransactionID"))?;

    Ok(Cleaned {
        frame: scrubber.into_frame(),
        before,
        after,
    })
}

pub fn prepare(config: &EtlConfig) -> Result<PipelineReport> {
    run_pipeline(
        ENTITY,
        &config.raw_file(RAW_FILE),
        &config.prepared_file(PREPARED_FILE),
        clean,
    )
}

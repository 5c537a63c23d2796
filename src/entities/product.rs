// 📦 Products pipeline - ProductID and ProductName are required

use super::{post_clean_audit, pre_clean_audit, run_pipeline, Cleaned, PipelineReport, FILL_VALUE};
use crate::config::EtlConfig;
use crate::error::Result;
use crate::scrubber::DataScrubber;
use polars::prelude::DataFrame;

pub const ENTITY: &str = "products";
pub const RAW_FILE: &str = "products_data.csv";
pub const PREPARED_FILE: &str = "products_data_prepared.csv";

const REQUIRED: [&str; 2] = ["ProductID", "ProductName"];

pub fn clean(df: DataFrame) -> Result<Cleaned> {
    let scrubber = DataScrubber::new(df)
        .trim_column_names()?
        .remove_duplicate_rows()?
        .trim_strings("ProductName")?
        .drop_rows_missing(&REQUIRED)?;

    let before = pre_clean_audit(ENTITY, &scrubber)?;

    let scrubber = scrubber.handle_missing_data(false, Some(FILL_VALUE.into()))?;

    let after = post_clean_audit(ENTITY, &scrubber, Some("ProductID"))?;

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

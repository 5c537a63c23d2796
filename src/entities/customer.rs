// 👤 Customers pipeline
//
// CustomerID and Name are required; JoinDate gains a parsed StandardJoinDate,
// BirthYear is bounded to [1900, 2025], ReferringCustomer is trimmed.

use super::{post_clean_audit, pre_clean_audit, run_pipeline, Cleaned, PipelineReport, FILL_VALUE};
use crate::config::EtlConfig;
use crate::error::Result;
use crate::scrubber::DataScrubber;
use polars::prelude::DataFrame;

pub const ENTITY: &str = "customers";
pub const RAW_FILE: &str = "customers_data.csv";
pub const PREPARED_FILE: &str = "customers_data_prepared.csv";

const REQUIRED: [&str; 2] = ["CustomerID", "Name"];
const BIRTH_YEAR_RANGE: (f64, f64) = (1900.0, 2025.0);

pub fn clean(df: DataFrame) -> Result<Cleaned> {
    let scrubber = DataScrubber::new(df)
        .trim_column_names()?
        .remove_duplicate_rows()?
        .trim_strings("Name")?
        .drop_rows_missing(&REQUIRED)?;

    let before = pre_clean_audit(ENTITY, &scrubber)?;

    let scrubber = scrubber
        .handle_missing_data(false, Some(FILL_VALUE.into()))?
        .parse_date_column("JoinDate")?
        .filter_numeric_outliers("BirthYear", BIRTH_YEAR_RANGE.0, BIRTH_YEAR_RANGE.1)?
        .trim_strings("ReferringCustomer")?;

    let after = post_clean_audit(ENTITY, &scrubber, Some("CustomerID"))?;

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

// Generic pipeline for dimension extracts without entity-specific rules:
// header normalization, deduplication, sentinel fill.

use super::{post_clean_audit, pre_clean_audit, run_pipeline, Cleaned, PipelineReport, FILL_VALUE};
use crate::config::EtlConfig;
use crate::error::Result;
use crate::scrubber::DataScrubber;
use polars::prelude::DataFrame;

pub fn clean(entity: &str, df: DataFrame) -> Result<Cleaned> {
    let scrubber = DataScrubber::new(df)
        .trim_column_names()?
        .remove_duplicate_rows()?;

    let before = pre_clean_audit(entity, &scrubber)?;

    let scrubber = scrubber.handle_missing_data(false, Some(FILL_VALUE.into()))?;

    let after = post_clean_audit(entity, &scrubber, None)?;

    Ok(Cleaned {
        frame: scrubber.into_frame(),
        before,
        after,
    })
}

/// `<stem>.csv` → `<stem>_prepared.csv`
pub fn prepare(config: &EtlConfig, stem: &str) -> Result<PipelineReport> {
    run_pipeline(
        stem,
        &config.raw_file(&format!("{}.csv", stem)),
        &config.prepared_file(&format!("{}_prepared.csv", stem)),
        |df| clean(stem, df),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::test_support;
    use crate::frame::{self, texts};
    use crate::parser::NullMarkers;
    use polars::prelude::*;

    #[test]
    fn test_clean_generic() {
        let df = frame::read_csv_bytes(test_support::SUPPLIERS.as_bytes(), NullMarkers::Standard)
            .unwrap();
        let cleaned = clean("suppliers", df).unwrap();

        // deduplicated before the audit runs
        assert_eq!(cleaned.before.duplicate_count, 0);
        assert_eq!(cleaned.before.total_nulls(), 1);
        assert_eq!(cleaned.frame.height(), 3);
        assert_eq!(texts(&cleaned.frame, "SupplierName"), vec!["Acme", "N/A", "Globex"]);
    }

    #[test]
    fn test_fill_can_create_duplicates_that_fail_the_gate() {
        // Distinct before the fill, identical after it
        let df = df!(
            "StoreID" => [1i64, 1],
            "StoreName" => [None, Some("N/A")]
        )
        .unwrap();
        assert!(clean("stores", df).is_err());
    }

    #[test]
    fn test_prepare_names_output_after_stem() {
        let (_dir, config) =
            test_support::data_root(&[("campaigns_data.csv", test_support::CAMPAIGNS)]);

        let report = prepare(&config, "campaigns_data").unwrap();
        assert!(report.output.ends_with("campaigns_data_prepared.csv"));
        assert_eq!(report.rows_written, 2);
    }
}

// Per-entity pipelines
// Each pipeline reads one raw extract, runs a fixed scrubber chain, asserts
// the post-clean invariants, and writes one prepared file.

pub mod customer;
pub mod generic;
pub mod product;
pub mod sale;

use crate::config::EtlConfig;
use crate::data_quality::ConsistencyReport;
use crate::error::Result;
use crate::frame;
use crate::parser::NullMarkers;
use crate::scrubber::DataScrubber;
use polars::prelude::DataFrame;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Sentinel written into every value still missing after the required-key filter
pub const FILL_VALUE: &str = "N/A";

/// Dimension extracts that only get the generic treatment
pub const GENERIC_DATASETS: [&str; 3] = ["suppliers_data", "stores_data", "campaigns_data"];

/// Output of a pipeline's pure cleaning step
#[derive(Debug, Clone)]
pub struct Cleaned {
    pub frame: DataFrame,
    pub before: ConsistencyReport,
    pub after: ConsistencyReport,
}

#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    pub entity: String,
    pub rows_read: usize,
    pub rows_written: usize,
    pub output: PathBuf,
    pub before: ConsistencyReport,
    pub after: ConsistencyReport,
}

impl PipelineReport {
    pub fn summary(&self) -> String {
        format!(
            "{}: {} rows read, {} rows written to {}",
            self.entity,
            self.rows_read,
            self.rows_written,
            self.output.display()
        )
    }
}

// ============================================================================
// SHARED STEPS
// ============================================================================

/// Informational audit + inspection before the typed transformations
pub(crate) fn pre_clean_audit(entity: &str, scrubber: &DataScrubber) -> Result<ConsistencyReport> {
    let report = scrubber.check_consistency_before()?;
    info!(entity, "Before cleaning: {}", report.summary());
    debug!(entity, report = %report_json(&report), "Consistency before cleaning");

    let summary = scrubber.inspect_data()?;
    debug!(entity, "Inspection:\n{}", summary);

    Ok(report)
}

/// Hard gate: no nulls, no duplicate rows, and (if given) a unique key
pub(crate) fn post_clean_audit(
    entity: &str,
    scrubber: &DataScrubber,
    key: Option<&str>,
) -> Result<ConsistencyReport> {
    let report = scrubber.check_consistency_after()?;
    if let Some(key) = key {
        scrubber.check_unique_key(key)?;
    }
    info!(entity, "After cleaning: {}", report.summary());
    debug!(entity, report = %report_json(&report), "Consistency after cleaning");
    Ok(report)
}

fn report_json(report: &ConsistencyReport) -> String {
    serde_json::to_string(report).unwrap_or_default()
}

/// Read raw → clean → write prepared
pub(crate) fn run_pipeline<F>(entity: &str, raw: &Path, prepared: &Path, clean: F) -> Result<PipelineReport>
where
    F: FnOnce(DataFrame) -> Result<Cleaned>,
{
    let df = frame::read_csv(raw, NullMarkers::Standard)?;
    let rows_read = df.height();

    let cleaned = clean(df)?;
    frame::write_csv(&cleaned.frame, prepared)?;
    info!(entity, path = %prepared.display(), "Data saved");

    Ok(PipelineReport {
        entity: entity.to_string(),
        rows_read,
        rows_written: cleaned.frame.height(),
        output: prepared.to_path_buf(),
        before: cleaned.before,
        after: cleaned.after,
    })
}

fn banner(title: &str) {
    info!("========================");
    info!("{}", title);
    info!("========================");
}

/// Prepare every extract the warehouse needs, in a fixed order
pub fn prepare_all(config: &EtlConfig) -> Result<Vec<PipelineReport>> {
    banner("STARTING data preparation");

    let mut reports = Vec::new();

    banner("Starting CUSTOMERS prep");
    reports.push(customer::prepare(config)?);

    banner("Starting PRODUCTS prep");
    reports.push(product::prepare(config)?);

    banner("Starting SALES prep");
    reports.push(sale::prepare(config)?);

    for stem in GENERIC_DATASETS {
        banner(&format!("Starting {} prep", stem.to_uppercase()));
        reports.push(generic::prepare(config, stem)?);
    }

    for report in &reports {
        info!("{}", report.summary());
    }
    banner("FINISHED data preparation");

    Ok(reports)
}

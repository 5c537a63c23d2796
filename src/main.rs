use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;
use uuid::Uuid;

use smart_sales_etl::{
    init_logging, load_warehouse, prepare_all, EtlConfig, LoadReport, PipelineReport, VERSION,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Smart-sales ETL: clean raw extracts and load the SQLite warehouse", long_about = None)]
struct Cli {
    #[command(flatten)]
    options: Options,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Args, Debug, Default)]
struct Options {
    /// TOML config file (raw_dir, prepared_dir, warehouse_path, enforce_foreign_keys)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Data root holding raw/, prepared/ and dw/
    #[arg(long, global = true, conflicts_with = "config")]
    data_dir: Option<PathBuf>,

    /// Enforce foreign keys and load dimensions before facts
    #[arg(long, global = true)]
    enforce_foreign_keys: bool,

    /// Print the run summary as JSON on stdout
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Clean every raw extract into the prepared directory
    Prepare,
    /// Truncate and reload the warehouse from the prepared directory
    Load,
    /// Prepare, then load (default)
    Run,
}

/// Everything one invocation did
#[derive(Debug, Serialize)]
struct RunSummary {
    run_id: Uuid,
    version: &'static str,
    prepared: Vec<PipelineReport>,
    load: Option<LoadReport>,
}

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let config = resolve_config(&cli.options)?;
    let command = cli.command.unwrap_or(Command::Run);

    let run_id = Uuid::new_v4();
    let span = tracing::info_span!("etl", %run_id);
    let _guard = span.enter();

    info!(version = VERSION, ?command, "🛒 Smart Sales ETL");
    info!(
        raw = %config.raw_dir.display(),
        prepared = %config.prepared_dir.display(),
        warehouse = %config.warehouse_path.display(),
        enforce_foreign_keys = config.enforce_foreign_keys,
        "Configuration"
    );

    let mut summary = RunSummary {
        run_id,
        version: VERSION,
        prepared: Vec::new(),
        load: None,
    };

    if matches!(command, Command::Prepare | Command::Run) {
        summary.prepared = prepare_all(&config).context("Data preparation failed")?;
        info!("✓ Prepared {} datasets", summary.prepared.len());
    }

    if matches!(command, Command::Load | Command::Run) {
        info!("🗄️  Loading warehouse...");
        let report = load_warehouse(&config).context("Warehouse load failed")?;
        for table in &report.tables {
            info!(
                table = %table.table,
                inserted = table.rows_inserted,
                total = table.rows_in_table,
                "✓ Loaded"
            );
        }
        summary.load = Some(report);
    }

    if cli.options.json {
        let json = serde_json::to_string_pretty(&summary).context("Failed to render run summary")?;
        println!("{}", json);
    }

    info!("🎉 ETL complete");
    Ok(())
}

fn resolve_config(options: &Options) -> Result<EtlConfig> {
    let mut config = match (&options.config, &options.data_dir) {
        (Some(path), _) => EtlConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        (None, Some(dir)) => EtlConfig::from_data_dir(dir),
        (None, None) => EtlConfig::default(),
    };

    if options.enforce_foreign_keys {
        config.enforce_foreign_keys = true;
    }

    Ok(config)
}

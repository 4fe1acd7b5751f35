pub mod cli;
pub mod data;
pub mod describe;
pub mod filter;
pub mod load;
pub mod table;

use std::{env, sync::OnceLock};

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, info};

use crate::cli::{Cli, Commands};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("csv_triage", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Filter(args) => handle_filter(&args),
        Commands::Describe(args) => handle_describe(&args),
    }
}

fn handle_filter(args: &cli::FilterArgs) -> Result<()> {
    let delimiter = load::resolve_delimiter(&args.input, args.delimiter);
    let dataset = load::load_dataset(&args.input, delimiter)
        .with_context(|| format!("Loading dataset from {:?}", args.input))?;

    let (filtered, report) = filter::filter_columns(&dataset, args.missing_threshold);

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(report.records()).context("Serializing removal report")?
        );
    } else {
        table::print_table(&filter::FilterReport::headers(), &report.to_rows());
    }

    if let Some(output) = &args.output {
        load::write_dataset(&filtered, output, delimiter)
            .with_context(|| format!("Writing filtered dataset to {output:?}"))?;
    }
    info!(
        "Removed {} of {} column(s); {} retained",
        report.len(),
        dataset.column_count(),
        filtered.column_count()
    );
    Ok(())
}

fn handle_describe(args: &cli::DescribeArgs) -> Result<()> {
    let delimiter = load::resolve_delimiter(&args.input, args.delimiter);
    let dataset = load::load_dataset(&args.input, delimiter)
        .with_context(|| format!("Loading dataset from {:?}", args.input))?;

    let summary = describe::describe(&dataset);
    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(summary.rows()).context("Serializing summary")?
        );
    } else {
        table::print_table(&summary.headers(), &summary.to_rows());
    }
    info!(
        "Summarized {} column(s) across {} row(s)",
        summary.rows().len(),
        dataset.row_count()
    );
    Ok(())
}

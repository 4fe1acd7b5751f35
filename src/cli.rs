use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about = "Triage and summarize tabular CSV datasets", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Drop columns with excessive missing values or unnamed headers and
    /// report the removals
    Filter(FilterArgs),
    /// Produce a descriptive summary of every column, numeric and
    /// non-numeric
    Describe(DescribeArgs),
}

#[derive(Debug, Args)]
pub struct FilterArgs {
    /// Input CSV file to triage
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Destination for the filtered dataset (report only if omitted)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
    /// Fraction of rows that must be missing before a column is dropped
    #[arg(long = "missing-threshold", default_value_t = crate::filter::DEFAULT_MISSING_THRESHOLD)]
    pub missing_threshold: f64,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Emit the removal report as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct DescribeArgs {
    /// Input CSV file to summarize
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Emit the summary as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

fn parse_delimiter(raw: &str) -> Result<u8, String> {
    match raw {
        "tab" | "\\t" => Ok(b'\t'),
        value if value.chars().count() == 1 => Ok(value.bytes().next().unwrap()),
        other => Err(format!(
            "Delimiter must be a single character or 'tab', got '{other}'"
        )),
    }
}

use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

use crate::config::{ReportConfig, DEFAULT_INPUT, DEFAULT_OUTPUT};
use crate::domain::{DateRange, DATE_FORMAT};

#[derive(Parser, Debug)]
#[command(
    name = "buildercount",
    about = "Count blocks per builder per day from a Parquet dataset and write a JSON summary",
    version,
    long_about = None
)]
pub struct Args {
    /// Parquet file with `date` and `builder` columns
    #[arg(short, long, default_value = DEFAULT_INPUT)]
    pub input: PathBuf,

    /// Destination JSON file (overwritten)
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// First day to include (YYYY-MM-DD)
    #[arg(long, default_value = "2023-05-19", value_parser = parse_date)]
    pub start: NaiveDate,

    /// Last day to include (YYYY-MM-DD)
    #[arg(long, default_value = "2023-06-19", value_parser = parse_date)]
    pub end: NaiveDate,

    /// Number of leading builder characters used for grouping
    #[arg(long, default_value_t = crate::domain::DEFAULT_BUILDER_WIDTH)]
    pub builder_width: usize,

    /// Do not print the grouped table and summary
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn to_config(&self) -> anyhow::Result<ReportConfig> {
        crate::utils::validate_args(self)?;
        Ok(ReportConfig {
            input: self.input.clone(),
            output: self.output.clone(),
            range: DateRange::new(self.start, self.end)?,
            builder_width: self.builder_width,
        })
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|e| format!("expected YYYY-MM-DD, got '{value}': {e}"))
}

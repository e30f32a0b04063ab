use std::path::PathBuf;

use crate::domain::{DateRange, DEFAULT_BUILDER_WIDTH};

pub const DEFAULT_INPUT: &str = "eth_data.parquet.gzip";
pub const DEFAULT_OUTPUT: &str = "output.json";

/// Everything a report run needs; built from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub range: DateRange,
    pub builder_width: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            range: DateRange::default(),
            builder_width: DEFAULT_BUILDER_WIDTH,
        }
    }
}

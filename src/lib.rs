pub mod aggregate;
pub mod args;
pub mod config;
pub mod domain;
pub mod error;
pub mod filter;
pub mod loader;
pub mod output;
pub mod report;
pub mod stats;
pub mod utils;

pub use args::Args;
pub use config::ReportConfig;
pub use domain::{DateRange, GroupCount, GroupKey, Record};
pub use error::{FilterError, LoadError, OutputError, ReportError};
pub use report::{build_report, run_report};
pub use stats::{ReportResult, RunSummary};

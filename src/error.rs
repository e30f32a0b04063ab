use std::io;
use std::path::PathBuf;
use std::string::FromUtf8Error;

use arrow::datatypes::DataType;
use arrow::error::ArrowError;
use chrono::NaiveDate;
use parquet::errors::ParquetError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Input file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to open {}: {source}", path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("Parquet read error for {}: {source}", path.display())]
    Parquet { path: PathBuf, source: ParquetError },

    #[error("Arrow read error for {}: {source}", path.display())]
    Arrow { path: PathBuf, source: ArrowError },

    #[error("Column '{column}' not found in {}", path.display())]
    MissingColumn { path: PathBuf, column: String },

    #[error("Column '{column}' in {} has unsupported type {data_type}", path.display())]
    UnsupportedType {
        path: PathBuf,
        column: String,
        data_type: DataType,
    },
}

#[derive(Debug, Error)]
pub enum FilterError {
    #[error("Malformed date at row {row}: {value:?}")]
    MalformedDate { row: usize, value: String },

    #[error("Start date {start} is after end date {end}")]
    InvertedRange { start: NaiveDate, end: NaiveDate },
}

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to create {}: {source}", path.display())]
    Create { path: PathBuf, source: io::Error },

    #[error("Failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Report is not valid UTF-8: {0}")]
    Encoding(#[from] FromUtf8Error),
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error(transparent)]
    Output(#[from] OutputError),
}

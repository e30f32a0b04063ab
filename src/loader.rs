use std::fs::File;
use std::path::Path;
use std::time::Instant;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Date32Type, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ProjectionMask;
use tracing::{debug, info};

use crate::domain::{RawDate, RawRecord};
use crate::error::LoadError;

pub const DATE_COLUMN: &str = "date";
pub const BUILDER_COLUMN: &str = "builder";

/// In-memory rows of the two columns the report consumes.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BuilderTable {
    pub rows: Vec<RawRecord>,
}

impl BuilderTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl From<Vec<RawRecord>> for BuilderTable {
    fn from(rows: Vec<RawRecord>) -> Self {
        Self { rows }
    }
}

pub fn load_table(path: &Path) -> Result<BuilderTable, LoadError> {
    let start_time = Instant::now();
    info!(action = "start", component = "loader", path = ?path, "Loading builder dataset");

    if !path.exists() {
        return Err(LoadError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let reader_builder =
        ParquetRecordBatchReaderBuilder::try_new(file).map_err(|source| LoadError::Parquet {
            path: path.to_path_buf(),
            source,
        })?;

    let schema = reader_builder.schema().clone();
    let date_idx = column_index(&schema, path, DATE_COLUMN, is_date_like)?;
    let builder_idx = column_index(&schema, path, BUILDER_COLUMN, is_string_like)?;

    let expected_rows = reader_builder.metadata().file_metadata().num_rows();
    debug!(
        action = "schema",
        component = "loader",
        date_type = %schema.field(date_idx).data_type(),
        builder_type = %schema.field(builder_idx).data_type(),
        expected_rows,
        "Resolved input columns"
    );

    // Only decode the two columns we group on.
    let mask = ProjectionMask::roots(reader_builder.parquet_schema(), [date_idx, builder_idx]);
    let reader = reader_builder
        .with_projection(mask)
        .build()
        .map_err(|source| LoadError::Parquet {
            path: path.to_path_buf(),
            source,
        })?;

    let mut rows = Vec::with_capacity(usize::try_from(expected_rows).unwrap_or_default());
    for batch in reader {
        let batch = batch.map_err(|source| LoadError::Arrow {
            path: path.to_path_buf(),
            source,
        })?;
        append_batch(&batch, path, &mut rows)?;
    }

    info!(
        action = "complete",
        component = "loader",
        row_count = rows.len(),
        duration_ms = start_time.elapsed().as_millis(),
        "Builder dataset loaded"
    );

    Ok(BuilderTable { rows })
}

fn column_index(
    schema: &Schema,
    path: &Path,
    column: &str,
    accepts: fn(&DataType) -> bool,
) -> Result<usize, LoadError> {
    let idx = schema
        .index_of(column)
        .map_err(|_| LoadError::MissingColumn {
            path: path.to_path_buf(),
            column: column.to_string(),
        })?;

    let data_type = schema.field(idx).data_type();
    if !accepts(data_type) {
        return Err(LoadError::UnsupportedType {
            path: path.to_path_buf(),
            column: column.to_string(),
            data_type: data_type.clone(),
        });
    }

    Ok(idx)
}

fn is_date_like(data_type: &DataType) -> bool {
    matches!(
        data_type,
        DataType::Date32
            | DataType::Date64
            | DataType::Timestamp(_, _)
            | DataType::Utf8
            | DataType::LargeUtf8
            | DataType::Utf8View
    )
}

fn is_string_like(data_type: &DataType) -> bool {
    match data_type {
        DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View => true,
        DataType::Dictionary(_, values) => is_string_like(values),
        _ => false,
    }
}

fn batch_column<'a>(
    batch: &'a RecordBatch,
    path: &Path,
    column: &str,
) -> Result<&'a ArrayRef, LoadError> {
    batch
        .column_by_name(column)
        .ok_or_else(|| LoadError::MissingColumn {
            path: path.to_path_buf(),
            column: column.to_string(),
        })
}

fn append_batch(
    batch: &RecordBatch,
    path: &Path,
    rows: &mut Vec<RawRecord>,
) -> Result<(), LoadError> {
    let dates = date_cells(batch_column(batch, path, DATE_COLUMN)?, path)?;
    let builders = string_cells(batch_column(batch, path, BUILDER_COLUMN)?, path, BUILDER_COLUMN)?;

    rows.extend(
        dates
            .into_iter()
            .zip(builders)
            .map(|(date, builder)| RawRecord { date, builder }),
    );
    Ok(())
}

/// Decodes a `date` column. Timestamps are cast to calendar days, honoring
/// the column's timezone when it has one.
fn date_cells(array: &ArrayRef, path: &Path) -> Result<Vec<RawDate>, LoadError> {
    match array.data_type() {
        DataType::Date32 => {
            let days = array.as_primitive::<Date32Type>();
            Ok((0..days.len())
                .map(|i| {
                    if days.is_null(i) {
                        RawDate::Null
                    } else {
                        days.value_as_date(i).map_or(RawDate::Null, RawDate::Date)
                    }
                })
                .collect())
        }
        DataType::Date64 | DataType::Timestamp(_, _) => {
            let days = cast(array, &DataType::Date32).map_err(|source| LoadError::Arrow {
                path: path.to_path_buf(),
                source,
            })?;
            date_cells(&days, path)
        }
        _ => Ok(string_cells(array, path, DATE_COLUMN)?
            .into_iter()
            .map(|value| value.map_or(RawDate::Null, RawDate::Text))
            .collect()),
    }
}

fn string_cells(
    array: &ArrayRef,
    path: &Path,
    column: &str,
) -> Result<Vec<Option<String>>, LoadError> {
    let utf8 = match array.data_type() {
        DataType::Utf8 => array.clone(),
        other if is_string_like(other) => {
            cast(array, &DataType::Utf8).map_err(|source| LoadError::Arrow {
                path: path.to_path_buf(),
                source,
            })?
        }
        other => {
            return Err(LoadError::UnsupportedType {
                path: path.to_path_buf(),
                column: column.to_string(),
                data_type: other.clone(),
            })
        }
    };

    Ok(utf8
        .as_string::<i32>()
        .iter()
        .map(|value| value.map(str::to_string))
        .collect())
}

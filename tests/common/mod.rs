#![allow(dead_code)]

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Date32Array, StringArray, TimestampMillisecondArray};
use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
use arrow::record_batch::RecordBatch;
use chrono::NaiveDate;
use parquet::arrow::ArrowWriter;
use parquet::basic::{Compression, GzipLevel};
use parquet::file::properties::WriterProperties;

pub type TestResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

pub fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn days_since_epoch(date: NaiveDate) -> i32 {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
    (date - epoch).num_days() as i32
}

fn write_batch(path: &Path, batch: RecordBatch) -> TestResult {
    let props = WriterProperties::builder()
        .set_compression(Compression::GZIP(GzipLevel::default()))
        .build();
    let file = File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

/// Writes `(date, builder)` rows with a `DATE32` date column plus an unused
/// `block_number` column.
pub fn write_blocks(path: &Path, rows: &[(&str, Option<&str>)]) -> TestResult {
    let dates: Vec<i32> = rows.iter().map(|(d, _)| days_since_epoch(day(d))).collect();
    let builders: Vec<Option<&str>> = rows.iter().map(|(_, b)| *b).collect();
    let numbers: Vec<Option<&str>> = (0..rows.len()).map(|_| Some("0x0")).collect();

    let schema = Schema::new(vec![
        Field::new("block_number", DataType::Utf8, true),
        Field::new("date", DataType::Date32, true),
        Field::new("builder", DataType::Utf8, true),
    ]);
    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(numbers)),
        Arc::new(Date32Array::from(dates)),
        Arc::new(StringArray::from(builders)),
    ];
    write_batch(path, RecordBatch::try_new(Arc::new(schema), columns)?)
}

/// Same shape as [`write_blocks`] but with a millisecond timestamp column,
/// the way pandas stores `datetime64` values.
pub fn write_timestamp_blocks(path: &Path, rows: &[(i64, &str)]) -> TestResult {
    write_zoned_timestamp_blocks(path, None, rows)
}

/// Timestamp rows whose column carries the timezone `tz`, as pandas writes
/// `datetime64[ns, tz]` values.
pub fn write_zoned_timestamp_blocks(
    path: &Path,
    tz: Option<&str>,
    rows: &[(i64, &str)],
) -> TestResult {
    let tz: Option<Arc<str>> = tz.map(Arc::from);
    let schema = Schema::new(vec![
        Field::new(
            "date",
            DataType::Timestamp(TimeUnit::Millisecond, tz.clone()),
            true,
        ),
        Field::new("builder", DataType::Utf8, true),
    ]);
    let timestamps =
        TimestampMillisecondArray::from(rows.iter().map(|(ts, _)| *ts).collect::<Vec<_>>())
            .with_timezone_opt(tz);
    let columns: Vec<ArrayRef> = vec![
        Arc::new(timestamps),
        Arc::new(StringArray::from(
            rows.iter().map(|(_, b)| *b).collect::<Vec<_>>(),
        )),
    ];
    write_batch(path, RecordBatch::try_new(Arc::new(schema), columns)?)
}

/// Writes string columns only; dates are left unparsed.
pub fn write_text_blocks(path: &Path, rows: &[(&str, &str)]) -> TestResult {
    let schema = Schema::new(vec![
        Field::new("date", DataType::Utf8, true),
        Field::new("builder", DataType::Utf8, true),
    ]);
    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(
            rows.iter().map(|(d, _)| *d).collect::<Vec<_>>(),
        )),
        Arc::new(StringArray::from(
            rows.iter().map(|(_, b)| *b).collect::<Vec<_>>(),
        )),
    ];
    write_batch(path, RecordBatch::try_new(Arc::new(schema), columns)?)
}

/// A file that has `date` but no `builder` column.
pub fn write_without_builder(path: &Path) -> TestResult {
    let schema = Schema::new(vec![Field::new("date", DataType::Date32, true)]);
    let columns: Vec<ArrayRef> = vec![Arc::new(Date32Array::from(vec![19_500]))];
    write_batch(path, RecordBatch::try_new(Arc::new(schema), columns)?)
}

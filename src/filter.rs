use std::time::Instant;

use tracing::info;

use crate::domain::{parse_date_text, DateRange, RawDate, Record};
use crate::error::FilterError;
use crate::loader::BuilderTable;

/// Keeps rows whose date lies in `range`, preserving input order.
///
/// Null dates never match. A text date that does not parse fails the whole
/// filter, since it cannot be ordered against the bounds.
pub fn filter_by_range(
    table: &BuilderTable,
    range: &DateRange,
) -> Result<Vec<Record>, FilterError> {
    let start_time = Instant::now();
    let mut kept = Vec::new();
    let mut null_dates = 0usize;

    for (row, raw) in table.rows.iter().enumerate() {
        let date = match &raw.date {
            RawDate::Date(date) => *date,
            RawDate::Text(value) => {
                parse_date_text(value).ok_or_else(|| FilterError::MalformedDate {
                    row,
                    value: value.clone(),
                })?
            }
            RawDate::Null => {
                null_dates += 1;
                continue;
            }
        };

        if range.contains(date) {
            kept.push(Record {
                date,
                builder: raw.builder.clone(),
            });
        }
    }

    info!(
        action = "complete",
        component = "filter",
        start = %range.start(),
        end = %range.end(),
        input_rows = table.len(),
        kept_rows = kept.len(),
        null_dates,
        duration_ms = start_time.elapsed().as_millis(),
        "Date filter applied"
    );

    Ok(kept)
}

use chrono::NaiveDate;

use crate::error::FilterError;

pub const DEFAULT_BUILDER_WIDTH: usize = 32;
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A `date` cell as it comes out of the Parquet file, before filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawDate {
    Date(NaiveDate),
    /// String column value; parsed by the filter.
    Text(String),
    Null,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub date: RawDate,
    pub builder: Option<String>,
}

/// A row that passed the date filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub date: NaiveDate,
    pub builder: Option<String>,
}

/// Inclusive calendar date interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, FilterError> {
        if start > end {
            return Err(FilterError::InvertedRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of days between the bounds (0 when `start == end`).
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

impl Default for DateRange {
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2023, 5, 19).unwrap_or_default(),
            end: NaiveDate::from_ymd_opt(2023, 6, 19).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupKey {
    pub date: NaiveDate,
    pub builder: String,
}

impl GroupKey {
    pub fn date_string(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupCount {
    pub key: GroupKey,
    pub count: u64,
}

/// Keeps the first `width` characters of a builder id.
pub fn truncate_builder(builder: &str, width: usize) -> String {
    match builder.char_indices().nth(width) {
        Some((idx, _)) => builder[..idx].to_string(),
        None => builder.to_string(),
    }
}

/// Parses `YYYY-MM-DD`, ignoring any `T...`/` ...` time-of-day suffix.
pub fn parse_date_text(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    let day = match value.get(..10) {
        Some(day) if value.len() == 10 => day,
        Some(day) if matches!(value.as_bytes()[10], b'T' | b' ') => day,
        _ => return None,
    };
    NaiveDate::parse_from_str(day, DATE_FORMAT).ok()
}

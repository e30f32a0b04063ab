use std::collections::HashSet;

use crate::aggregate::Aggregation;
use crate::domain::GroupCount;
use crate::output::OutputMap;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub rows_read: usize,
    pub rows_in_range: usize,
    pub rows_skipped: usize,
    pub group_count: usize,
    pub distinct_builders: usize,
    pub distinct_dates: usize,
}

impl RunSummary {
    pub fn new(rows_read: usize, rows_in_range: usize, aggregation: &Aggregation) -> Self {
        let builders: HashSet<&str> = aggregation
            .groups
            .iter()
            .map(|group| group.key.builder.as_str())
            .collect();
        let dates: HashSet<_> = aggregation.groups.iter().map(|group| group.key.date).collect();

        Self {
            rows_read,
            rows_in_range,
            rows_skipped: aggregation.skipped,
            group_count: aggregation.groups.len(),
            distinct_builders: builders.len(),
            distinct_dates: dates.len(),
        }
    }
}

#[derive(Debug)]
pub struct ReportResult {
    pub groups: Vec<GroupCount>,
    pub output: OutputMap,
    pub summary: RunSummary,
}

use std::time::Instant;

use indexmap::IndexMap;
use tracing::{info, warn};

use crate::domain::{truncate_builder, GroupCount, GroupKey, Record};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Aggregation {
    pub groups: Vec<GroupCount>,
    /// Rows left out because their builder was null.
    pub skipped: usize,
}

/// Counts rows per `(date, truncated builder)`.
///
/// Rows are stably sorted by date first, so groups come out by date and then
/// by the order in which each builder first shows up on that date.
pub fn aggregate(mut records: Vec<Record>, builder_width: usize) -> Aggregation {
    let start_time = Instant::now();
    records.sort_by_key(|record| record.date);

    let mut counts: IndexMap<GroupKey, u64> = IndexMap::new();
    let mut skipped = 0usize;

    for record in records {
        let Some(builder) = record.builder else {
            skipped += 1;
            continue;
        };
        let key = GroupKey {
            date: record.date,
            builder: truncate_builder(&builder, builder_width),
        };
        *counts.entry(key).or_insert(0) += 1;
    }

    if skipped > 0 {
        warn!(
            action = "skip",
            component = "aggregator",
            skipped,
            "Rows without a builder were left out"
        );
    }

    let groups: Vec<GroupCount> = counts
        .into_iter()
        .map(|(key, count)| GroupCount { key, count })
        .collect();

    info!(
        action = "complete",
        component = "aggregator",
        group_count = groups.len(),
        duration_ms = start_time.elapsed().as_millis(),
        "Grouped rows by date and builder"
    );

    Aggregation { groups, skipped }
}

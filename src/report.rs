use std::time::Instant;

use tracing::info;

use crate::aggregate::aggregate;
use crate::config::ReportConfig;
use crate::domain::GroupCount;
use crate::error::ReportError;
use crate::filter::filter_by_range;
use crate::loader::load_table;
use crate::output::{build_output_map, write_report};
use crate::stats::{ReportResult, RunSummary};
use crate::utils::format_number;

/// Loads, filters and groups the input without touching the output file.
pub fn build_report(config: &ReportConfig) -> Result<ReportResult, ReportError> {
    let start_time = Instant::now();
    info!(
        action = "start",
        component = "report",
        input = ?config.input,
        "Starting builder report"
    );

    let table = load_table(&config.input)?;
    let rows_read = table.len();

    let records = filter_by_range(&table, &config.range)?;
    drop(table);
    let rows_in_range = records.len();

    let aggregation = aggregate(records, config.builder_width);
    let output = build_output_map(&aggregation.groups);
    let summary = RunSummary::new(rows_read, rows_in_range, &aggregation);

    info!(
        action = "built",
        component = "report",
        rows_read,
        rows_in_range,
        group_count = summary.group_count,
        duration_ms = start_time.elapsed().as_millis(),
        "Builder report built"
    );

    Ok(ReportResult {
        groups: aggregation.groups,
        output,
        summary,
    })
}

/// Builds the report and writes it to `config.output`.
pub fn run_report(config: &ReportConfig) -> Result<ReportResult, ReportError> {
    let result = build_report(config)?;
    write_report(&config.output, &result.output)?;
    Ok(result)
}

/// Formats groups as an indexed, right-aligned table.
pub fn format_group_table(groups: &[GroupCount]) -> String {
    if groups.is_empty() {
        return "Empty DataFrame\nColumns: [date, builder, count]\nIndex: []".to_string();
    }

    let rows: Vec<[String; 4]> = groups
        .iter()
        .enumerate()
        .map(|(idx, group)| {
            [
                idx.to_string(),
                group.key.date_string(),
                group.key.builder.clone(),
                group.count.to_string(),
            ]
        })
        .collect();

    let header = [String::new(), "date".into(), "builder".into(), "count".into()];
    let mut widths = header.clone().map(|cell| cell.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    std::iter::once(&header)
        .chain(&rows)
        .map(|row| {
            row.iter()
                .zip(widths)
                .map(|(cell, width)| format!("{cell:>width$}"))
                .collect::<Vec<_>>()
                .join("  ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn print_group_table(groups: &[GroupCount]) {
    println!("{}", format_group_table(groups));
}

pub fn print_summary(result: &ReportResult, config: &ReportConfig) {
    let summary = &result.summary;
    let range = &config.range;

    println!("\n--- Builder Report ---");
    println!(
        "Date range: {} to {} ({} days)",
        range.start().format("%B %-d, %Y"),
        range.end().format("%B %-d, %Y"),
        format_number(usize::try_from(range.days()).unwrap_or_default())
    );
    println!("Rows read: {}", format_number(summary.rows_read));
    println!("Rows in range: {}", format_number(summary.rows_in_range));
    if summary.rows_skipped > 0 {
        println!(
            "Rows without builder (skipped): {}",
            format_number(summary.rows_skipped)
        );
    }
    println!(
        "Groups: {} across {} days",
        format_number(summary.group_count),
        format_number(summary.distinct_dates)
    );
    println!(
        "Distinct builders: {}",
        format_number(summary.distinct_builders)
    );
    println!("Report written to {}", config.output.display());
}

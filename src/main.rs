use anyhow::Result;
use clap::Parser;
use tracing::error;

use buildercount::output::write_report;
use buildercount::report::{build_report, print_group_table, print_summary};
use buildercount::utils::setup_logging;
use buildercount::{Args, ReportConfig, ReportError, ReportResult};

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(args.verbose);

    let config = args.to_config()?;

    match report(&config, args.quiet) {
        Ok(result) => {
            if !args.quiet {
                print_summary(&result, &config);
            }
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Builder report failed");
            std::process::exit(1);
        }
    }
}

/// Builds the report, shows the grouped table, then writes the file.
fn report(config: &ReportConfig, quiet: bool) -> Result<ReportResult, ReportError> {
    let result = build_report(config)?;
    if !quiet {
        print_group_table(&result.groups);
    }
    write_report(&config.output, &result.output)?;
    Ok(result)
}

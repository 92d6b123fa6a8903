//! Report command: print the scan-error report for a failed scan outcome.

use std::io::{IsTerminal, Write};

use crate::cli::{Cli, ReportArgs};
use crate::config::ReportStream;
use crate::output::ErrorOutput;
use crate::report::write_scan_error;
use crate::{EXIT_CONFIG_ERROR, EXIT_FAILURE, Result};

use super::context::{CommandContext, read_outcome, startup_error_output};

/// Run the report command.
///
/// A rendered report means the scan was incomplete, so success exits with
/// [`EXIT_FAILURE`].
#[must_use]
pub fn run_report(args: &ReportArgs, cli: &Cli) -> i32 {
    let ctx = match CommandContext::from_cli(cli) {
        Ok(ctx) => ctx,
        Err(e) => {
            startup_error_output(cli).print_crate_error(&e);
            return EXIT_CONFIG_ERROR;
        }
    };
    match run_report_impl(args, &ctx) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            ErrorOutput::new(ctx.color).print_crate_error(&e);
            EXIT_CONFIG_ERROR
        }
    }
}

/// # Errors
/// Returns an error if the outcome cannot be read or the report cannot be written.
pub fn run_report_impl(args: &ReportArgs, ctx: &CommandContext) -> Result<i32> {
    let outcome = read_outcome(&args.outcome)?;
    let detail = outcome.to_detail();
    log::debug!(
        "rendering report for status {} over {} documents",
        detail.status_code,
        outcome.chunk.len()
    );

    let stream = if args.stdout {
        ReportStream::Stdout
    } else {
        ctx.config.report.stream
    };

    match stream {
        ReportStream::Stdout => {
            let stdout = std::io::stdout();
            let use_colors = ctx.color.resolve(stdout.is_terminal());
            let mut out = stdout.lock();
            write_scan_error(&mut out, &detail, &outcome.chunk, use_colors)?;
            out.flush()?;
        }
        ReportStream::Stderr => {
            let stderr = std::io::stderr();
            let use_colors = ctx.color.resolve(stderr.is_terminal());
            let mut out = stderr.lock();
            write_scan_error(&mut out, &detail, &outcome.chunk, use_colors)?;
        }
    }

    Ok(EXIT_FAILURE)
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;

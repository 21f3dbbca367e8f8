//! Drives one invocation: enumerate, plan, transfer, report.

mod file_list;

use std::io::Write;
use std::time::Duration;

use crossbeam_channel::Receiver;
use tracing::info;
use transfer::{Parallelism, SchedulerOptions, TransferReport, plan_transfers, run_transfers};
use transport::{PathSpec, ToolConfig};

use self::file_list::{SourceListing, enumerate_source};
use super::arguments::ParsedArgs;
use super::error::{RunError, write_error, write_warning};
use super::progress::{ProgressRenderer, render_plan};
use crate::exit_code::ExitCode;

/// Runs a parsed transfer request and returns its exit status.
pub(crate) fn execute<Out, Err>(
    args: &ParsedArgs,
    tools: ToolConfig,
    cancel: Option<Receiver<()>>,
    stdout: &mut Out,
    stderr: &mut Err,
) -> Result<ExitCode, RunError>
where
    Out: Write,
    Err: Write,
{
    let source = PathSpec::parse(&args.source);
    let destination = PathSpec::parse(&args.destination);

    let listing = match enumerate_source(args, &source, &tools, cancel.as_ref())? {
        SourceListing::Files(listing) => listing,
        SourceListing::NoMatch { pattern } => {
            writeln!(stdout, "No files match '{pattern}' in {source}").map_err(RunError::Output)?;
            return Ok(ExitCode::Ok);
        }
    };
    for skipped in listing.skipped() {
        write_warning(
            stderr,
            format_args!("skipped '{}': {}", skipped.path, skipped.reason),
        )
        .map_err(RunError::Output)?;
    }
    info!(
        target: "prsync::flist",
        files = listing.len(),
        base = listing.base(),
        "source enumerated"
    );

    if args.dry_run {
        let plan = plan_transfers(&listing, &source, &destination);
        render_plan(&plan, stdout).map_err(RunError::Output)?;
        report_skipped(listing.skipped().len(), stderr).map_err(RunError::Output)?;
        return Ok(partial_unless(listing.skipped().is_empty()));
    }

    let mut options =
        SchedulerOptions::new(Parallelism::from_count(args.parallel)).with_tools(tools);
    if let Some(seconds) = args.timeout.filter(|seconds| *seconds > 0) {
        options = options.with_idle_timeout(Duration::from_secs(seconds));
    }
    if let Some(cancel) = cancel {
        options = options.with_cancel(cancel);
    }

    let mut renderer = ProgressRenderer::new(stdout);
    let result = run_transfers(&listing, &source, &destination, options, &mut renderer);
    let rendered = renderer.finish();
    let report = result?;
    rendered.map_err(RunError::Output)?;

    report_failures(&report, stderr).map_err(RunError::Output)?;
    report_skipped(listing.skipped().len(), stderr).map_err(RunError::Output)?;
    Ok(partial_unless(
        report.is_success() && listing.skipped().is_empty(),
    ))
}

fn report_failures<Err: Write>(report: &TransferReport, stderr: &mut Err) -> std::io::Result<()> {
    for failed in &report.failures {
        write_warning(
            stderr,
            format_args!("transfer of '{}' failed: {}", failed.relative, failed.failure),
        )?;
    }
    if !report.is_success() {
        write_error(
            stderr,
            format_args!(
                "{} of {} transfers failed",
                report.totals.failed, report.totals.total
            ),
            ExitCode::PartialTransfer,
        )?;
    }
    Ok(())
}

fn report_skipped<Err: Write>(skipped: usize, stderr: &mut Err) -> std::io::Result<()> {
    if skipped == 0 {
        return Ok(());
    }
    write_error(
        stderr,
        format_args!("{skipped} source director(ies) could not be listed"),
        ExitCode::PartialTransfer,
    )
}

const fn partial_unless(clean: bool) -> ExitCode {
    if clean {
        ExitCode::Ok
    } else {
        ExitCode::PartialTransfer
    }
}

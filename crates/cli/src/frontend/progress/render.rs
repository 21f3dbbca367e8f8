use std::io::{self, Write};

use tracing::{debug, warn};
use transfer::{JobState, PlannedTransfer, Progress, TransferJob, TransferObserver, TransferTotals};

/// Writes scheduler events as text.
///
/// Each observation prints `Transfer 'SRC -> DST': P%`, followed by the raw
/// rsync line, tab-indented, when that line carried a percentage strictly
/// between 0 and 100. Each retirement prints `Completed X/Y`. The first write error is kept and
/// later output is dropped.
pub(crate) struct ProgressRenderer<'w, W: Write> {
    writer: &'w mut W,
    error: Option<io::Error>,
}

impl<'w, W: Write> ProgressRenderer<'w, W> {
    pub(crate) const fn new(writer: &'w mut W) -> Self {
        Self {
            writer,
            error: None,
        }
    }

    /// Returns the first write error, if any.
    pub(crate) fn finish(self) -> io::Result<()> {
        match self.error {
            Some(error) => Err(error),
            None => self.writer.flush(),
        }
    }

    fn emit(&mut self, render: impl FnOnce(&mut W) -> io::Result<()>) {
        if self.error.is_some() {
            return;
        }
        if let Err(error) = render(self.writer) {
            self.error = Some(error);
        }
    }
}

impl<W: Write> TransferObserver for ProgressRenderer<'_, W> {
    fn job_progress(&mut self, job: &TransferJob, progress: &Progress) {
        debug!(
            target: "prsync::progress",
            id = job.id(),
            file = job.relative_path(),
            percent = progress.percent
        );
        self.emit(|out| {
            writeln!(
                out,
                "Transfer '{} -> {}': {}%",
                job.source(),
                job.destination(),
                progress.percent
            )?;
            match &progress.line {
                Some(line) if (1..100).contains(&progress.percent) => {
                    writeln!(out, "\t{}", line.trim())
                }
                _ => Ok(()),
            }
        });
    }

    fn job_finished(&mut self, job: &TransferJob, totals: &TransferTotals) {
        if let JobState::Failed(failure) = job.state() {
            warn!(target: "prsync::progress", file = job.relative_path(), "{failure}");
        }
        self.emit(|out| {
            writeln!(out, "Completed {}/{}", totals.completed, totals.total)?;
            out.flush()
        });
    }
}

/// Prints each planned `SOURCE -> DEST` pair, one per line.
pub(crate) fn render_plan<W: Write>(plan: &[PlannedTransfer], out: &mut W) -> io::Result<()> {
    for planned in plan {
        writeln!(out, "{} -> {}", planned.source, planned.destination)?;
    }
    out.flush()
}

//! crates/transfer/src/scheduler.rs
//! Bounded-concurrency driver for per-file transfer jobs.

use std::num::NonZeroUsize;
use std::time::Duration;

use crossbeam_channel::{Receiver, Select, TryRecvError};
use flist::FileListing;
use tracing::{debug, info, warn};
use transport::{PathSpec, ToolConfig};

use crate::destination::DestinationPreparer;
use crate::error::TransferError;
use crate::job::{JobFailure, JobState, TransferJob};
use crate::progress::{TransferObserver, TransferTotals};

/// Maximum number of simultaneously running transfers.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Parallelism {
    /// At most this many jobs run at once.
    Limited(NonZeroUsize),
    /// Every file is started immediately.
    Unlimited,
}

impl Parallelism {
    /// Interprets a user-supplied count; zero or negative means unlimited.
    #[must_use]
    pub fn from_count(count: i64) -> Self {
        usize::try_from(count)
            .ok()
            .and_then(NonZeroUsize::new)
            .map_or(Self::Unlimited, Self::Limited)
    }

    /// Reports whether another job may start while `active` are running.
    #[must_use]
    pub const fn admits(self, active: usize) -> bool {
        match self {
            Self::Limited(limit) => active < limit.get(),
            Self::Unlimited => true,
        }
    }
}

/// Tunables for [`run_transfers`].
#[derive(Clone, Debug)]
pub struct SchedulerOptions {
    parallelism: Parallelism,
    tools: ToolConfig,
    idle_timeout: Option<Duration>,
    cancel: Option<Receiver<()>>,
}

impl SchedulerOptions {
    /// Creates options with the default tools and no timeout.
    #[must_use]
    pub fn new(parallelism: Parallelism) -> Self {
        Self {
            parallelism,
            tools: ToolConfig::default(),
            idle_timeout: None,
            cancel: None,
        }
    }

    /// Uses `tools` for transfers and remote `mkdir`.
    #[must_use]
    pub fn with_tools(mut self, tools: ToolConfig) -> Self {
        self.tools = tools;
        self
    }

    /// Aborts the run when no job produces output for `timeout`.
    /// A zero duration disables the timeout.
    #[must_use]
    pub fn with_idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = (!timeout.is_zero()).then_some(timeout);
        self
    }

    /// Aborts the run when a message arrives on `cancel`.
    ///
    /// Dropping the sending side does not cancel.
    #[must_use]
    pub fn with_cancel(mut self, cancel: Receiver<()>) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Returns the configured parallelism.
    #[must_use]
    pub const fn parallelism(&self) -> Parallelism {
        self.parallelism
    }
}

/// One file's transfer endpoints.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PlannedTransfer {
    /// Name relative to the listing base.
    pub relative: String,
    /// Full source operand.
    pub source: PathSpec,
    /// Destination directory operand (trailing `/`).
    pub destination: PathSpec,
}

/// Computes the source and destination directory for every listed file.
///
/// The source is the listing base on the source host joined with the
/// relative name; the destination is the parent of the relative name joined
/// onto `destination`.
#[must_use]
pub fn plan_transfers(
    listing: &FileListing,
    source: &PathSpec,
    destination: &PathSpec,
) -> Vec<PlannedTransfer> {
    let source_base = source.with_path(listing.base());
    listing
        .files()
        .iter()
        .map(|relative| PlannedTransfer {
            relative: relative.clone(),
            source: source_base.join(relative),
            destination: destination.join(relative).parent().as_directory(),
        })
        .collect()
}

/// A transfer that ended in [`JobState::Failed`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FailedTransfer {
    /// Name relative to the listing base.
    pub relative: String,
    /// Why it failed.
    pub failure: JobFailure,
}

/// Summary of a completed run.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TransferReport {
    /// Final counters.
    pub totals: TransferTotals,
    /// Failed transfers in retirement order.
    pub failures: Vec<FailedTransfer>,
}

impl TransferReport {
    /// Reports whether every transfer succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Transfers every file in `listing` from `source` to `destination`.
///
/// Files start in listing order; at most `N` run at once under
/// [`Parallelism::Limited`]. The call returns when every job is terminal.
///
/// # Errors
///
/// Returns [`TransferError::Spawn`] when a transfer cannot be started,
/// [`TransferError::Stalled`] when the idle timeout expires and
/// [`TransferError::Cancelled`] on cancellation. In each case every active
/// job is killed first.
pub fn run_transfers<O: TransferObserver + ?Sized>(
    listing: &FileListing,
    source: &PathSpec,
    destination: &PathSpec,
    options: SchedulerOptions,
    observer: &mut O,
) -> Result<TransferReport, TransferError> {
    let plan = plan_transfers(listing, source, destination);
    let mut scheduler = Scheduler::new(options, observer);
    let mut totals = TransferTotals::new(plan.len());

    for (id, planned) in plan.into_iter().enumerate() {
        while !scheduler.options.parallelism.admits(scheduler.active.len()) {
            totals = scheduler.sweep(totals)?;
        }
        if scheduler.cancel_requested() {
            return Err(scheduler.cancel());
        }
        totals = scheduler.start(id, planned, totals)?;
    }
    while !scheduler.active.is_empty() {
        totals = scheduler.sweep(totals)?;
    }

    debug_assert!(totals.is_done());
    info!(
        target: "prsync::transfer",
        completed = totals.completed,
        failed = totals.failed,
        peak_active = totals.peak_active,
        "all transfers finished"
    );
    Ok(TransferReport {
        totals,
        failures: scheduler.failures,
    })
}

struct Scheduler<'o, O: ?Sized> {
    options: SchedulerOptions,
    destinations: DestinationPreparer,
    active: Vec<TransferJob>,
    failures: Vec<FailedTransfer>,
    observer: &'o mut O,
}

impl<'o, O: TransferObserver + ?Sized> Scheduler<'o, O> {
    fn new(options: SchedulerOptions, observer: &'o mut O) -> Self {
        Self {
            destinations: DestinationPreparer::new(options.tools.clone()),
            options,
            active: Vec::new(),
            failures: Vec::new(),
            observer,
        }
    }

    fn start(
        &mut self,
        id: usize,
        planned: PlannedTransfer,
        mut totals: TransferTotals,
    ) -> Result<TransferTotals, TransferError> {
        self.destinations.ensure(&planned.destination);
        let job = match TransferJob::spawn(
            id,
            planned.relative,
            planned.source,
            planned.destination,
            &self.options.tools,
        ) {
            Ok(job) => job,
            Err(error) => {
                self.terminate_all();
                return Err(error);
            }
        };
        info!(
            target: "prsync::transfer",
            id,
            "transfer {} -> {}",
            job.source(),
            job.destination()
        );
        totals.started += 1;
        totals.peak_active = totals.peak_active.max(self.active.len() + 1);
        self.observer.job_started(&job, &totals);
        self.active.push(job);
        Ok(totals)
    }

    /// Waits for output from any active job, advances every job with a
    /// pending event, then retires terminal jobs.
    fn sweep(&mut self, mut totals: TransferTotals) -> Result<TransferTotals, TransferError> {
        let ready = self.wait_ready()?;
        for index in ready {
            let job = &mut self.active[index];
            let progress = job.advance();
            self.observer.job_progress(job, &progress);
        }

        let mut index = 0;
        while index < self.active.len() {
            if self.active[index].is_running() {
                index += 1;
                continue;
            }
            let job = self.active.remove(index);
            totals.completed += 1;
            if let JobState::Failed(failure) = job.state() {
                totals.failed += 1;
                self.failures.push(FailedTransfer {
                    relative: job.relative_path().to_owned(),
                    failure: failure.clone(),
                });
            }
            debug!(
                target: "prsync::transfer",
                id = job.id(),
                completed = totals.completed,
                total = totals.total,
                "retired transfer"
            );
            self.observer.job_finished(&job, &totals);
        }
        Ok(totals)
    }

    /// Returns the indices of active jobs with a pending event, in
    /// active-set order.
    fn wait_ready(&mut self) -> Result<Vec<usize>, TransferError> {
        let (selected, cancel_index) = {
            let mut select = Select::new();
            for job in &self.active {
                select.recv(job.events());
            }
            let cancel_index = self.options.cancel.as_ref().map(|cancel| select.recv(cancel));
            let selected = match self.options.idle_timeout {
                Some(timeout) => select.ready_timeout(timeout).ok(),
                None => Some(select.ready()),
            };
            (selected, cancel_index)
        };

        let Some(selected) = selected else {
            let idle = self.options.idle_timeout.unwrap_or_default();
            let terminated = self.terminate_all();
            warn!(target: "prsync::transfer", terminated, "no transfer output for {}s", idle.as_secs());
            return Err(TransferError::Stalled { idle, terminated });
        };

        if Some(selected) == cancel_index && self.cancel_requested() {
            return Err(self.cancel());
        }

        Ok(self
            .active
            .iter()
            .enumerate()
            .filter(|(index, job)| *index == selected || !job.events().is_empty())
            .map(|(index, _)| index)
            .collect())
    }

    /// Polls the cancel channel without blocking. A disconnected channel is
    /// forgotten.
    fn cancel_requested(&mut self) -> bool {
        match self.options.cancel.as_ref().map(Receiver::try_recv) {
            Some(Ok(())) => true,
            Some(Err(TryRecvError::Disconnected)) => {
                self.options.cancel = None;
                false
            }
            Some(Err(TryRecvError::Empty)) | None => false,
        }
    }

    fn cancel(&mut self) -> TransferError {
        let terminated = self.terminate_all();
        warn!(target: "prsync::transfer", terminated, "transfers cancelled");
        TransferError::Cancelled { terminated }
    }

    fn terminate_all(&mut self) -> usize {
        let terminated = self.active.len();
        for job in &mut self.active {
            job.terminate();
        }
        self.active.clear();
        terminated
    }
}

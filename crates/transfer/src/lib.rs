#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
//! crates/transfer/src/lib.rs
//!
//! Per-file `rsync` jobs and the scheduler that runs them in parallel.
//!
//! # Overview
//!
//! [`run_transfers`] takes a [`flist::FileListing`], a source and a
//! destination [`transport::PathSpec`] and starts one `rsync -avsP` process
//! per file, never more than the configured [`Parallelism`] at once.
//! Progress is read from each process's output and handed to a
//! [`TransferObserver`].
//!
//! # Design
//!
//! - [`TransferJob`] owns one child process. Two reader threads split its
//!   stdout and stderr into lines (on `\n` and `\r`) and feed a per-job
//!   `crossbeam-channel`. [`TransferJob::advance`] consumes one line.
//! - The scheduler is single-threaded. It waits on every active job's
//!   channel at once with `crossbeam_channel::Select` and advances only the
//!   jobs that have output, so one quiet transfer never delays the others.
//! - Counters live in a [`TransferTotals`] value threaded through each sweep.
//!
//! # Invariants
//!
//! - With [`Parallelism::Limited`]`(N)` no more than `N` jobs are active.
//! - A job leaves [`JobState::Running`] once and never returns to it; its
//!   process is reaped and its reader threads joined exactly once.
//! - `completed` reaches the listing length exactly when every job is
//!   terminal; failed jobs are counted in both `completed` and `failed`.
//!
//! # Errors
//!
//! Transfers that exit unsuccessfully are reported in [`TransferReport`].
//! [`TransferError`] is reserved for run-level failures: a process that
//! cannot be launched, the idle timeout, and cancellation.

mod destination;
mod error;
mod job;
mod progress;
mod scheduler;
mod stream;

pub use destination::DestinationPreparer;
pub use error::TransferError;
pub use job::{JobFailure, JobState, TransferJob};
pub use progress::{Progress, TransferObserver, TransferTotals};
pub use scheduler::{
    FailedTransfer, Parallelism, PlannedTransfer, SchedulerOptions, TransferReport,
    plan_transfers, run_transfers,
};

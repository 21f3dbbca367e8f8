//! crates/transfer/src/progress.rs
//! Progress observations, run counters and the observer hook.

use std::sync::OnceLock;

use regex::Regex;

use crate::job::TransferJob;

/// Result of one [`TransferJob::advance`] call.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Progress {
    /// Percentage reported by the tool, or 100 once the job is terminal.
    pub percent: u8,
    /// The raw output line that carried the percentage.
    pub line: Option<String>,
}

impl Progress {
    /// A line without a percentage.
    #[must_use]
    pub const fn idle() -> Self {
        Self {
            percent: 0,
            line: None,
        }
    }

    /// The job has reached a terminal state.
    #[must_use]
    pub const fn finished() -> Self {
        Self {
            percent: 100,
            line: None,
        }
    }

    /// Interprets one line of transfer output.
    ///
    /// The first `N%` token supplies the percentage; values above 100 are
    /// clamped.
    #[must_use]
    pub fn from_line(line: String) -> Self {
        match parse_percent(&line) {
            Some(percent) => Self {
                percent,
                line: Some(line),
            },
            None => Self::idle(),
        }
    }
}

fn parse_percent(line: &str) -> Option<u8> {
    static PERCENT_RE: OnceLock<Regex> = OnceLock::new();
    let re = PERCENT_RE.get_or_init(|| Regex::new(r"(\d+)%").expect("valid regex"));
    let digits = re.captures(line)?.get(1)?.as_str();
    let value = digits.parse::<u64>().unwrap_or(u64::MAX);
    Some(value.min(100) as u8)
}

/// Counters for one scheduler run.
///
/// Passed into every sweep and returned updated; all counters only grow.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct TransferTotals {
    /// Files in the listing.
    pub total: usize,
    /// Jobs spawned so far.
    pub started: usize,
    /// Jobs retired so far, failed ones included.
    pub completed: usize,
    /// Retired jobs that ended in [`JobState::Failed`](crate::JobState::Failed).
    pub failed: usize,
    /// Largest number of simultaneously active jobs seen.
    pub peak_active: usize,
}

impl TransferTotals {
    /// Creates zeroed counters for a listing of `total` files.
    #[must_use]
    pub const fn new(total: usize) -> Self {
        Self {
            total,
            started: 0,
            completed: 0,
            failed: 0,
            peak_active: 0,
        }
    }

    /// Reports whether every file has been retired.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        self.completed == self.total
    }
}

/// Receives scheduler events. Every method defaults to doing nothing.
pub trait TransferObserver {
    /// A job was spawned.
    fn job_started(&mut self, job: &TransferJob, totals: &TransferTotals) {
        let _ = (job, totals);
    }

    /// A job was advanced.
    fn job_progress(&mut self, job: &TransferJob, progress: &Progress) {
        let _ = (job, progress);
    }

    /// A job reached a terminal state and was retired.
    fn job_finished(&mut self, job: &TransferJob, totals: &TransferTotals) {
        let _ = (job, totals);
    }
}

impl TransferObserver for () {}

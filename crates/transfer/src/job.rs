//! crates/transfer/src/job.rs
//! One external `rsync` process transferring one file.

use std::fmt;
use std::process::{Child, ExitStatus, Stdio};
use std::thread::JoinHandle;

use crossbeam_channel::{Receiver, never, unbounded};
use tracing::{debug, warn};
use transport::{PathSpec, ToolConfig};

#[cfg(unix)]
use std::os::unix::process::{CommandExt, ExitStatusExt};

use crate::error::TransferError;
use crate::progress::Progress;
use crate::stream::{StreamEvent, StreamKind, spawn_reader};

const SUMMARY_SENTINEL: &str = "total size";

/// Why a job ended in [`JobState::Failed`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum JobFailure {
    /// The process exited with a non-zero status.
    Exit(i32),
    /// The process was killed by a signal.
    Signal(i32),
    /// Waiting for the process failed.
    Wait(String),
    /// The scheduler killed the process.
    Terminated,
}

impl JobFailure {
    /// Returns the rsync-style exit code for the failure.
    ///
    /// Signals map to `128 + signal`, capped at 255.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Exit(code) => *code,
            Self::Signal(signal) => (128 + signal).min(255),
            Self::Wait(_) | Self::Terminated => 255,
        }
    }
}

impl fmt::Display for JobFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exit(code) => write!(f, "rsync exited with code {code}"),
            Self::Signal(signal) => write!(f, "rsync killed by signal {signal}"),
            Self::Wait(error) => write!(f, "failed to wait for rsync: {error}"),
            Self::Terminated => f.write_str("rsync terminated"),
        }
    }
}

/// Lifecycle of a [`TransferJob`]. Terminal states never change.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum JobState {
    /// The process is running or its output has not been fully read.
    Running,
    /// The process finished successfully.
    Complete,
    /// The process finished unsuccessfully.
    Failed(JobFailure),
}

impl JobState {
    /// Reports whether the state is terminal.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Running)
    }
}

/// A running single-file transfer.
///
/// The job owns the child process, its output pipes (through two reader
/// threads) and the channel those threads feed. All of them are released
/// exactly once, when the job leaves [`JobState::Running`]. Dropping a
/// running job kills the process.
#[derive(Debug)]
pub struct TransferJob {
    id: usize,
    relative: String,
    source: PathSpec,
    destination: PathSpec,
    state: JobState,
    child: Option<Child>,
    events: Receiver<StreamEvent>,
    readers: Vec<JoinHandle<()>>,
    open_streams: usize,
}

impl TransferJob {
    /// Starts `rsync -avsP SOURCE DESTINATION` for one file.
    ///
    /// # Errors
    ///
    /// Fails when the process or its reader threads cannot be started.
    pub fn spawn(
        id: usize,
        relative: impl Into<String>,
        source: PathSpec,
        destination: PathSpec,
        tools: &ToolConfig,
    ) -> Result<Self, TransferError> {
        let relative = relative.into();
        let mut command = tools.transfer_command(&source, &destination);
        command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        // Own group, so termination reaches the remote shell rsync starts.
        #[cfg(unix)]
        command.process_group(0);
        debug!(target: "prsync::cmd", id, command = ?command, "spawning transfer");

        let mut child = command
            .spawn()
            .map_err(|error| TransferError::spawn(tools.rsync_program(), &relative, error))?;

        let (sender, events) = unbounded();
        let mut readers = Vec::with_capacity(2);
        let pipes = [
            child.stdout.take().map(|pipe| spawn_reader(pipe, StreamKind::Stdout, sender.clone())),
            child.stderr.take().map(|pipe| spawn_reader(pipe, StreamKind::Stderr, sender.clone())),
        ];
        drop(sender);
        for reader in pipes.into_iter().flatten() {
            match reader {
                Ok(handle) => readers.push(handle),
                Err(error) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    join_readers(&mut readers);
                    return Err(TransferError::spawn(tools.rsync_program(), &relative, error));
                }
            }
        }

        Ok(Self {
            id,
            relative,
            source,
            destination,
            state: JobState::Running,
            child: Some(child),
            open_streams: readers.len(),
            events,
            readers,
        })
    }

    /// Returns the scheduler-assigned identifier.
    #[must_use]
    pub const fn id(&self) -> usize {
        self.id
    }

    /// Returns the file name relative to the listing base.
    #[must_use]
    pub fn relative_path(&self) -> &str {
        &self.relative
    }

    /// Returns the source operand.
    #[must_use]
    pub const fn source(&self) -> &PathSpec {
        &self.source
    }

    /// Returns the destination directory operand.
    #[must_use]
    pub const fn destination(&self) -> &PathSpec {
        &self.destination
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> &JobState {
        &self.state
    }

    /// Reports whether the job is still running.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        matches!(self.state, JobState::Running)
    }

    pub(crate) const fn events(&self) -> &Receiver<StreamEvent> {
        &self.events
    }

    /// Consumes the next output line and reports progress.
    ///
    /// Blocks until a line is available. When the output ends or the
    /// `total size` summary line arrives, the process is reaped and the job
    /// becomes terminal. A terminal job always returns
    /// [`Progress::finished`] without blocking.
    pub fn advance(&mut self) -> Progress {
        if !self.is_running() {
            return Progress::finished();
        }
        match self.events.recv() {
            Ok(StreamEvent::Line(line)) => {
                if line.contains(SUMMARY_SENTINEL) {
                    self.finish();
                    Progress::finished()
                } else {
                    Progress::from_line(line)
                }
            }
            Ok(StreamEvent::Failed(kind, error)) => {
                warn!(target: "prsync::transfer", id = self.id, "failed to read {kind} of transfer: {error}");
                Progress::idle()
            }
            Ok(StreamEvent::Closed(_)) => {
                self.open_streams = self.open_streams.saturating_sub(1);
                if self.open_streams == 0 {
                    self.finish();
                    Progress::finished()
                } else {
                    Progress::idle()
                }
            }
            Err(_) => {
                self.finish();
                Progress::finished()
            }
        }
    }

    /// Kills a running job and marks it [`JobFailure::Terminated`].
    ///
    /// The job's whole process group is killed and the child reaped. The
    /// reader threads are detached, not joined: a descendant outside the
    /// group may hold the pipes open indefinitely.
    pub fn terminate(&mut self) {
        let Some(mut child) = self.child.take() else {
            return;
        };
        kill_process_tree(&mut child);
        if let Err(error) = child.wait() {
            warn!(target: "prsync::transfer", id = self.id, "failed to reap terminated transfer: {error}");
        }
        self.events = never();
        self.readers.clear();
        self.state = JobState::Failed(JobFailure::Terminated);
    }

    fn finish(&mut self) {
        let Some(status) = self.release() else {
            return;
        };
        self.state = match status {
            Ok(status) => classify(status),
            Err(error) => JobState::Failed(JobFailure::Wait(error)),
        };
        match &self.state {
            JobState::Failed(failure) => {
                warn!(target: "prsync::transfer", file = %self.relative, "transfer failed: {failure}");
            }
            _ => debug!(target: "prsync::transfer", file = %self.relative, "transfer complete"),
        }
    }

    /// Reaps the child and joins the readers. Returns `None` when already
    /// released.
    fn release(&mut self) -> Option<Result<ExitStatus, String>> {
        let mut child = self.child.take()?;
        self.events = never();
        let status = child.wait().map_err(|error| error.to_string());
        join_readers(&mut self.readers);
        Some(status)
    }
}

impl Drop for TransferJob {
    fn drop(&mut self) {
        if self.child.is_some() {
            self.terminate();
        }
    }
}

#[cfg(unix)]
fn kill_process_tree(child: &mut Child) {
    use rustix::process::{Pid, Signal, kill_process_group};

    if let Err(error) = kill_process_group(Pid::from_child(child), Signal::KILL) {
        debug!(target: "prsync::transfer", "process group kill failed: {error}");
        let _ = child.kill();
    }
}

#[cfg(not(unix))]
fn kill_process_tree(child: &mut Child) {
    let _ = child.kill();
}

fn join_readers(readers: &mut Vec<JoinHandle<()>>) {
    for handle in readers.drain(..) {
        if handle.join().is_err() {
            warn!(target: "prsync::transfer", "output reader thread panicked");
        }
    }
}

fn classify(status: ExitStatus) -> JobState {
    if status.success() {
        return JobState::Complete;
    }
    if let Some(code) = status.code() {
        return JobState::Failed(JobFailure::Exit(code));
    }
    #[cfg(unix)]
    {
        if let Some(signal) = status.signal() {
            return JobState::Failed(JobFailure::Signal(signal));
        }
    }
    JobState::Failed(JobFailure::Exit(255))
}

//! crates/transfer/src/stream.rs
//! Reader threads that turn a child's output pipes into line events.

use std::fmt;
use std::io::{self, Read};
use std::thread::{self, JoinHandle};

use crossbeam_channel::Sender;

/// Identifies which pipe an event came from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StreamKind {
    /// The child's standard output.
    Stdout,
    /// The child's standard error.
    Stderr,
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Stdout => "stdout",
            Self::Stderr => "stderr",
        })
    }
}

/// Message sent from a reader thread to the owning job.
#[derive(Debug)]
pub(crate) enum StreamEvent {
    Line(String),
    Failed(StreamKind, io::Error),
    Closed(StreamKind),
}

/// Splits a byte stream into lines on `\n` and on `\r`.
///
/// `rsync --progress` rewrites its status line with carriage returns, so each
/// rewrite is surfaced as its own line. Empty segments are dropped.
#[derive(Debug, Default)]
pub(crate) struct LineSplitter {
    pending: Vec<u8>,
}

impl LineSplitter {
    pub(crate) fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        let mut lines = Vec::new();
        for &byte in chunk {
            if byte == b'\n' || byte == b'\r' {
                if !self.pending.is_empty() {
                    lines.push(String::from_utf8_lossy(&self.pending).into_owned());
                    self.pending.clear();
                }
            } else {
                self.pending.push(byte);
            }
        }
        lines
    }

    pub(crate) fn finish(self) -> Option<String> {
        if self.pending.is_empty() {
            None
        } else {
            Some(String::from_utf8_lossy(&self.pending).into_owned())
        }
    }
}

/// Spawns a thread that forwards lines from `reader` into `sender`.
///
/// The thread keeps draining the pipe after the receiving side has gone away
/// so the child never blocks on a full pipe. It always ends by sending
/// [`StreamEvent::Closed`].
pub(crate) fn spawn_reader<R>(
    reader: R,
    kind: StreamKind,
    sender: Sender<StreamEvent>,
) -> io::Result<JoinHandle<()>>
where
    R: Read + Send + 'static,
{
    thread::Builder::new()
        .name(format!("prsync-{kind}"))
        .spawn(move || forward_lines(reader, kind, &sender))
}

fn forward_lines<R: Read>(mut reader: R, kind: StreamKind, sender: &Sender<StreamEvent>) {
    let mut splitter = LineSplitter::default();
    let mut buffer = [0_u8; 8 * 1024];
    let mut listening = true;
    loop {
        match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(read) => {
                for line in splitter.push(&buffer[..read]) {
                    if listening && sender.send(StreamEvent::Line(line)).is_err() {
                        listening = false;
                    }
                }
            }
            Err(error) if error.kind() == io::ErrorKind::Interrupted => {}
            Err(error) => {
                let _ = sender.send(StreamEvent::Failed(kind, error));
                break;
            }
        }
    }
    if let Some(line) = splitter.finish()
        && listening
    {
        let _ = sender.send(StreamEvent::Line(line));
    }
    let _ = sender.send(StreamEvent::Closed(kind));
}

//! crates/cli/src/signals.rs
//! Turns SIGINT, SIGTERM and SIGHUP into scheduler cancellation.

use std::io;

use crossbeam_channel::Receiver;

/// Installs handlers for the termination signals and returns a channel that
/// receives one message per signal.
///
/// Pass the receiver to [`run_with_cancel`](crate::run_with_cancel). The
/// handlers stay installed for the rest of the process.
#[cfg(unix)]
pub fn cancel_on_signals() -> io::Result<Receiver<()>> {
    use signal_hook::consts::{SIGHUP, SIGINT, SIGTERM};
    use signal_hook::iterator::Signals;
    use tracing::warn;

    let mut signals = Signals::new([SIGINT, SIGTERM, SIGHUP])?;
    let (sender, receiver) = crossbeam_channel::bounded(1);
    std::thread::Builder::new()
        .name("prsync-signals".to_owned())
        .spawn(move || {
            for signal in signals.forever() {
                warn!(target: "prsync::transfer", signal, "received signal, cancelling transfers");
                // A full channel already holds a pending cancellation.
                let _ = sender.try_send(());
            }
        })?;
    Ok(receiver)
}

/// Signals are not intercepted on this platform; the channel never fires.
#[cfg(not(unix))]
pub fn cancel_on_signals() -> io::Result<Receiver<()>> {
    Ok(crossbeam_channel::never())
}

#![deny(unsafe_code)]

use mimalloc::MiMalloc;

/// High-performance memory allocator for improved allocation throughput.
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

use std::{env, io, process::ExitCode};

fn main() -> ExitCode {
    let cancel = match cli::cancel_on_signals() {
        Ok(receiver) => Some(receiver),
        Err(error) => {
            eprintln!("prsync warning: signal handlers not installed: {error}");
            None
        }
    };

    let mut stdout = io::stdout().lock();
    // Unlocked: the signal thread logs to stderr while transfers run.
    let mut stderr = io::stderr();
    let status = cli::run_with_cancel(env::args_os(), cancel, &mut stdout, &mut stderr);
    cli::exit_code_from(status)
}

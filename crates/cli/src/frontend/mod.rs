//! Argument handling and top-level dispatch for the `prsync` binary.

use std::ffi::OsString;
use std::io::Write;

use crossbeam_channel::Receiver;
use logging::VerbosityConfig;
use tracing::debug;

mod arguments;
mod command_builder;
mod defaults;
mod error;
mod execution;
mod progress;

#[cfg(test)]
mod tests;

pub use arguments::{ParsedArgs, parse_args};

use self::defaults::{HELP_TEXT, PROGRAM_NAME};
use self::error::write_error;
use crate::exit_code::ExitCode;

/// Maximum exit code representable by a Unix process.
const MAX_EXIT_CODE: i32 = u8::MAX as i32;

/// Usage line repeated after argument errors.
const USAGE_LINE: &str = "Usage: prsync [OPTIONS] N SOURCE DEST";

/// Runs the CLI using the provided argument iterator and output handles.
///
/// Returns the process exit code. Transfer progress goes to `stdout`;
/// diagnostics go to `stderr` as `prsync error: ... (code N)` lines.
pub fn run<I, S, Out, Err>(arguments: I, stdout: &mut Out, stderr: &mut Err) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    Out: Write,
    Err: Write,
{
    run_with_cancel(arguments, None, stdout, stderr)
}

/// Like [`run`], aborting in-flight transfers when `cancel` receives a
/// message.
pub fn run_with_cancel<I, S, Out, Err>(
    arguments: I,
    cancel: Option<Receiver<()>>,
    stdout: &mut Out,
    stderr: &mut Err,
) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    Out: Write,
    Err: Write,
{
    match parse_args(arguments) {
        Ok(parsed) => dispatch(&parsed, cancel, stdout, stderr).as_i32(),
        Err(error) => {
            let rendered = error.to_string();
            let message = rendered
                .lines()
                .next()
                .unwrap_or_default()
                .trim_start_matches("error: ");
            let _ = write_error(stderr, message, ExitCode::Syntax);
            let _ = writeln!(stderr, "{USAGE_LINE}");
            ExitCode::Syntax.as_i32()
        }
    }
}

fn dispatch<Out, Err>(
    parsed: &ParsedArgs,
    cancel: Option<Receiver<()>>,
    stdout: &mut Out,
    stderr: &mut Err,
) -> ExitCode
where
    Out: Write,
    Err: Write,
{
    if parsed.show_help {
        return if stdout.write_all(HELP_TEXT.as_bytes()).is_ok() {
            ExitCode::Ok
        } else {
            ExitCode::FileIo
        };
    }
    if parsed.show_version {
        return if writeln!(stdout, "{PROGRAM_NAME} {}", env!("CARGO_PKG_VERSION")).is_ok() {
            ExitCode::Ok
        } else {
            ExitCode::FileIo
        };
    }

    // A subscriber may already be installed by an earlier run in this process.
    if logging::init_tracing(VerbosityConfig::from_flags(parsed.verbose, parsed.quiet)).is_err() {
        debug!(target: "prsync::cmd", "tracing subscriber already installed");
    }

    let tools = arguments::resolve_tools(parsed, |name| std::env::var_os(name));
    match execution::execute(parsed, tools, cancel, stdout, stderr) {
        Ok(code) => code,
        Err(error) => {
            let code = error.exit_code();
            let _ = write_error(stderr, &error, code);
            code
        }
    }
}

/// Converts a numeric exit code into an [`std::process::ExitCode`].
#[must_use]
pub fn exit_code_from(status: i32) -> std::process::ExitCode {
    let clamped = status.clamp(0, MAX_EXIT_CODE);
    std::process::ExitCode::from(clamped as u8)
}

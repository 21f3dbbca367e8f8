#![deny(unsafe_code)]
#![deny(missing_docs)]

//! Stand-in `rsync` and `ssh` executables for tests.
//!
//! The scripts are plain `/bin/sh` programs written into a temporary
//! directory. A fake `rsync` prints progress updates the way
//! `rsync -avsP` does, optionally copies the source file into the
//! destination directory, and exits with a chosen status.

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tempfile::TempDir;

/// Temporary directory that owns generated scripts and their logs.
#[derive(Debug)]
pub struct ScriptDir {
    temp: TempDir,
}

impl ScriptDir {
    /// Creates an empty script directory.
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            temp: tempfile::tempdir()?,
        })
    }

    /// Returns the directory path.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    /// Returns the path of a file inside the directory.
    #[must_use]
    pub fn file(&self, name: &str) -> PathBuf {
        self.temp.path().join(name)
    }
}

/// Terminal behaviour of a fake transfer.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Ending {
    /// Print the `total size` summary and exit with the status.
    Summary(i32),
    /// Print an rsync-style error to stderr and exit with the status.
    Error(i32),
    /// Kill itself with `SIGKILL`.
    Killed,
    /// Replace itself with `sleep` for the duration, printing nothing more.
    Hang(Duration),
}

/// Builder for a fake `rsync` transfer script.
#[derive(Clone, Debug)]
pub struct FakeRsync {
    percents: Vec<u8>,
    step_delay: Duration,
    copy: bool,
    log: Option<PathBuf>,
    ending: Ending,
}

impl Default for FakeRsync {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeRsync {
    /// Reports 0, 50 and 100 percent, then succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self {
            percents: vec![0, 50, 100],
            step_delay: Duration::from_millis(20),
            copy: false,
            log: None,
            ending: Ending::Summary(0),
        }
    }

    /// Replaces the progress percentages printed.
    #[must_use]
    pub fn percents(mut self, percents: &[u8]) -> Self {
        self.percents = percents.to_vec();
        self
    }

    /// Sets the pause after each progress update.
    #[must_use]
    pub const fn step_delay(mut self, delay: Duration) -> Self {
        self.step_delay = delay;
        self
    }

    /// Copies the source operand into the destination directory.
    #[must_use]
    pub const fn copy_files(mut self, copy: bool) -> Self {
        self.copy = copy;
        self
    }

    /// Appends every invocation's arguments, one line per run, to `path`.
    #[must_use]
    pub fn log_to(mut self, path: impl Into<PathBuf>) -> Self {
        self.log = Some(path.into());
        self
    }

    /// Chooses how the script ends.
    #[must_use]
    pub const fn ending(mut self, ending: Ending) -> Self {
        self.ending = ending;
        self
    }

    /// Renders the script text.
    #[must_use]
    pub fn script(&self) -> String {
        let mut script = String::from("#!/bin/sh\n");
        script.push_str("src=\ndst=\nfor arg in \"$@\"; do src=$dst; dst=$arg; done\n");
        if let Some(log) = &self.log {
            let _ = writeln!(script, "printf '%s\\n' \"$*\" >> {}", quote(&log.to_string_lossy()));
        }
        script.push_str("printf 'sending incremental file list\\n'\n");
        script.push_str("printf '%s\\n' \"${src##*/}\"\n");
        let delay = format!("{:.3}", self.step_delay.as_secs_f64());
        for percent in &self.percents {
            let _ = writeln!(
                script,
                "printf '          1,024 %3d%%    1.00MB/s    0:00:00\\r' {percent}\nsleep {delay}"
            );
        }
        script.push_str("printf '\\n'\n");
        if self.copy {
            script.push_str("mkdir -p \"$dst\" && cp \"$src\" \"$dst\" || exit 23\n");
        }
        match self.ending {
            Ending::Summary(code) => {
                script.push_str("printf '\\nsent 1,130 bytes  received 35 bytes  2,330.00 bytes/sec\\n'\n");
                script.push_str("printf 'total size is 1,024  speedup is 0.88\\n'\n");
                let _ = writeln!(script, "exit {code}");
            }
            Ending::Error(code) => {
                let _ = writeln!(
                    script,
                    "printf 'rsync error: some files/attrs were not transferred (code {code})\\n' >&2\nexit {code}"
                );
            }
            Ending::Killed => script.push_str("kill -KILL $$\n"),
            Ending::Hang(duration) => {
                let _ = writeln!(script, "exec sleep {}", duration.as_secs().max(1));
            }
        }
        script
    }

    /// Writes the script as `dir/name` and makes it executable.
    pub fn write(&self, dir: &Path, name: &str) -> io::Result<PathBuf> {
        let path = dir.join(name);
        write_executable_script(&path, &self.script())?;
        Ok(path)
    }
}

/// Writes a fake remote shell that logs its arguments to `log` and exits 0.
pub fn fake_ssh(dir: &Path, name: &str, log: &Path) -> io::Result<PathBuf> {
    let path = dir.join(name);
    let script = format!(
        "#!/bin/sh\nprintf '%s\\n' \"$*\" >> {}\nexit 0\n",
        quote(&log.to_string_lossy())
    );
    write_executable_script(&path, &script)?;
    Ok(path)
}

/// Writes `contents` to `path` with mode `0755`.
pub fn write_executable_script(path: &Path, contents: &str) -> io::Result<()> {
    fs::write(path, contents)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        let mut permissions = fs::metadata(path)?.permissions();
        permissions.set_mode(0o755);
        fs::set_permissions(path, permissions)?;
    }
    Ok(())
}

fn quote(text: &str) -> String {
    format!("'{}'", text.replace('\'', r"'\''"))
}

//! crates/transfer/src/destination.rs
//! Creates destination directories before transfers write into them.

use std::collections::HashSet;
use std::fs;
use std::process::Stdio;

use tracing::{debug, warn};
use transport::{PathSpec, ToolConfig};

/// Ensures destination directories exist, at most once per directory.
///
/// Local directories are created with `create_dir_all`; remote ones with
/// `RSH host mkdir -p -- 'DIR'`. Failures are logged and never retried, so
/// the transfer itself reports the problem.
#[derive(Debug)]
pub struct DestinationPreparer {
    tools: ToolConfig,
    prepared: HashSet<PathSpec>,
}

impl DestinationPreparer {
    /// Creates a preparer that uses `tools` for remote directories.
    #[must_use]
    pub fn new(tools: ToolConfig) -> Self {
        Self {
            tools,
            prepared: HashSet::new(),
        }
    }

    /// Ensures `directory` exists. Returns `false` when creation failed.
    pub fn ensure(&mut self, directory: &PathSpec) -> bool {
        if directory.path().is_empty() || !self.prepared.insert(directory.clone()) {
            return true;
        }
        match directory.host() {
            None => ensure_local(directory.path()),
            Some(host) => self.ensure_remote(host, directory.path()),
        }
    }

    fn ensure_remote(&self, host: &str, path: &str) -> bool {
        let mut command = self.tools.remote_shell().mkdir_command(host, path);
        command.stdin(Stdio::null());
        debug!(target: "prsync::cmd", command = ?command, "creating remote directory");
        match command.output() {
            Ok(output) if output.status.success() => true,
            Ok(output) => {
                warn!(
                    target: "prsync::transfer",
                    host,
                    dir = path,
                    "remote mkdir failed ({}): {}",
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                );
                false
            }
            Err(error) => {
                warn!(target: "prsync::transfer", host, dir = path, "failed to run remote shell: {error}");
                false
            }
        }
    }
}

fn ensure_local(path: &str) -> bool {
    match fs::create_dir_all(path) {
        Ok(()) => true,
        Err(error) => {
            warn!(target: "prsync::transfer", dir = path, "failed to create destination directory: {error}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_directories_are_created() {
        let temp = tempfile::tempdir().expect("tempdir");
        let target = temp.path().join("a/b/c");
        let spec = PathSpec::local(format!("{}/", target.display()));

        let mut preparer = DestinationPreparer::new(ToolConfig::new());
        assert!(preparer.ensure(&spec));
        assert!(target.is_dir());
    }

    #[test]
    fn blocked_local_directory_reports_failure() {
        let temp = tempfile::tempdir().expect("tempdir");
        let file = temp.path().join("file");
        fs::write(&file, b"x").expect("write");
        let spec = PathSpec::local(format!("{}/sub/", file.display()));

        let mut preparer = DestinationPreparer::new(ToolConfig::new());
        assert!(!preparer.ensure(&spec));
        assert!(preparer.ensure(&spec), "second attempt is not retried");
    }

    #[cfg(unix)]
    #[test]
    fn remote_directories_use_the_remote_shell_once() {
        let dir = test_support::ScriptDir::new().expect("dir");
        let log = dir.file("ssh.log");
        let ssh = test_support::fake_ssh(dir.path(), "ssh", &log).expect("ssh");
        let tools = ToolConfig::new().with_remote_shell(format!("{} -q", ssh.display()));

        let mut preparer = DestinationPreparer::new(tools);
        let spec = PathSpec::parse("nas:/srv/my dir/");
        assert!(preparer.ensure(&spec));
        assert!(preparer.ensure(&spec));

        let recorded = fs::read_to_string(&log).expect("log");
        assert_eq!(recorded, "-q nas mkdir -p -- '/srv/my dir/'\n");
    }
}

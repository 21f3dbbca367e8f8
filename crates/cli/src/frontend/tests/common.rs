use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

pub(super) use std::ffi::OsString;

pub(super) use test_support::{Ending, FakeRsync, ScriptDir, fake_ssh, write_executable_script};

pub(super) const PRSYNC: &str = "prsync";

/// Runs the front-end in-process and captures both streams.
pub(super) fn run_with_args<I, S>(args: I) -> (i32, Vec<u8>, Vec<u8>)
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let code = crate::run(args, &mut stdout, &mut stderr);
    (code, stdout, stderr)
}

pub(super) fn text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

pub(super) fn os(path: &Path) -> OsString {
    path.as_os_str().to_owned()
}

/// Creates `top.txt`, `a/one.txt` and `a/b/two.txt` under `root`.
pub(super) fn source_tree(root: &Path) -> PathBuf {
    fs::create_dir_all(root.join("a/b")).expect("source tree");
    fs::write(root.join("top.txt"), b"top").expect("write");
    fs::write(root.join("a/one.txt"), b"one").expect("write");
    fs::write(root.join("a/b/two.txt"), b"two").expect("write");
    root.to_path_buf()
}

/// A `-rw-r--r--` listing record.
pub(super) fn file_record(name: &str) -> String {
    format!("-rw-r--r--            512 2024/01/02 10:00:00 {name}\n")
}

/// A `drwxr-xr-x` listing record.
pub(super) fn dir_record(name: &str) -> String {
    format!("drwxr-xr-x          4,096 2024/01/02 10:00:00 {name}\n")
}

/// Writes an `rsync` stand-in that answers `-s OPERAND` from `listings`.
///
/// Unknown operands fail the way rsync does for a missing directory.
pub(super) fn fake_lister(dir: &Path, listings: &[(&str, String)]) -> PathBuf {
    let mut script =
        String::from("#!/bin/sh\nop=\nfor arg in \"$@\"; do op=$arg; done\ncase \"$op\" in\n");
    for (operand, output) in listings {
        let _ = writeln!(
            script,
            "  '{operand}') printf '%s' '{}' ;;",
            output.replace('\'', r"'\''")
        );
    }
    script.push_str(
        "  *) printf 'rsync: change_dir \"%s\" failed: No such file or directory (2)\\n' \"$op\" >&2; exit 23 ;;\nesac\n",
    );
    let path = dir.join("rsync-lister");
    write_executable_script(&path, &script).expect("write lister");
    path
}

#![cfg(unix)]

use std::fs;

use super::common::*;

#[test]
fn local_tree_is_copied_with_progress() {
    let dir = ScriptDir::new().expect("dir");
    let source = source_tree(&dir.file("src"));
    let rsync = FakeRsync::new()
        .copy_files(true)
        .write(dir.path(), "rsync")
        .expect("fake rsync");
    let out = dir.file("out");

    let mut source_arg = os(&source);
    source_arg.push("/");
    let (code, stdout, stderr) = run_with_args([
        OsString::from(PRSYNC),
        OsString::from("--rsync-path"),
        os(&rsync),
        OsString::from("2"),
        source_arg,
        os(&out),
    ]);

    assert_eq!(code, 0, "stderr: {}", text(&stderr));
    assert_eq!(fs::read(out.join("top.txt")).expect("top"), b"top");
    assert_eq!(fs::read(out.join("a/one.txt")).expect("one"), b"one");
    assert_eq!(fs::read(out.join("a/b/two.txt")).expect("two"), b"two");

    let rendered = text(&stdout);
    assert!(rendered.contains("Completed 3/3"));
    assert!(rendered.contains(&format!(
        "Transfer '{}/top.txt -> {}/': 50%",
        source.display(),
        out.display()
    )));
    assert!(rendered.contains("\t1,024  50%"));
}

#[test]
fn source_without_trailing_slash_keeps_its_name() {
    let dir = ScriptDir::new().expect("dir");
    let source = source_tree(&dir.file("src"));
    let rsync = FakeRsync::new()
        .copy_files(true)
        .write(dir.path(), "rsync")
        .expect("fake rsync");
    let out = dir.file("out");

    let (code, _, stderr) = run_with_args([
        OsString::from(PRSYNC),
        OsString::from("--rsync-path"),
        os(&rsync),
        OsString::from("0"),
        os(&source),
        os(&out),
    ]);

    assert_eq!(code, 0, "stderr: {}", text(&stderr));
    assert!(out.join("src/a/b/two.txt").is_file());
}

#[test]
fn failed_transfers_exit_23() {
    let dir = ScriptDir::new().expect("dir");
    let source = source_tree(&dir.file("src"));
    let rsync = FakeRsync::new()
        .ending(Ending::Error(12))
        .write(dir.path(), "rsync")
        .expect("fake rsync");

    let (code, stdout, stderr) = run_with_args([
        OsString::from(PRSYNC),
        OsString::from("--rsync-path"),
        os(&rsync),
        OsString::from("1"),
        os(&source),
        os(&dir.file("out")),
    ]);

    assert_eq!(code, 23);
    assert!(text(&stdout).contains("Completed 3/3"));
    let diagnostics = text(&stderr);
    assert!(diagnostics.contains(
        "prsync warning: transfer of 'src/top.txt' failed: rsync exited with code 12"
    ));
    assert!(diagnostics.contains("prsync error: 3 of 3 transfers failed (code 23)"));
}

#[test]
fn missing_rsync_binary_exits_11() {
    let dir = ScriptDir::new().expect("dir");
    let source = source_tree(&dir.file("src"));

    let (code, _, stderr) = run_with_args([
        OsString::from(PRSYNC),
        OsString::from("--rsync-path"),
        os(&dir.file("no-such-rsync")),
        OsString::from("2"),
        os(&source),
        os(&dir.file("out")),
    ]);

    assert_eq!(code, 11);
    let rendered = text(&stderr);
    assert!(rendered.contains("failed to launch rsync binary"), "{rendered}");
    assert!(rendered.trim_end().ends_with("(code 11)"));
}

#[test]
fn missing_local_source_exits_3() {
    let dir = ScriptDir::new().expect("dir");

    let (code, stdout, stderr) = run_with_args([
        OsString::from(PRSYNC),
        OsString::from("2"),
        os(&dir.file("absent")),
        os(&dir.file("out")),
    ]);

    assert_eq!(code, 3);
    assert!(stdout.is_empty());
    assert!(text(&stderr).contains("failed to stat local source"));
}

#[test]
fn transfers_receive_the_remote_shell() {
    let dir = ScriptDir::new().expect("dir");
    let source = dir.file("src");
    fs::create_dir_all(&source).expect("source");
    fs::write(source.join("only.txt"), b"x").expect("write");
    let log = dir.file("rsync.log");
    let rsync = FakeRsync::new()
        .log_to(&log)
        .write(dir.path(), "rsync")
        .expect("fake rsync");

    let mut source_arg = os(&source);
    source_arg.push("/");
    let (code, _, stderr) = run_with_args([
        OsString::from(PRSYNC),
        OsString::from("--rsync-path"),
        os(&rsync),
        OsString::from("-e"),
        OsString::from("ssh -p 2222"),
        OsString::from("1"),
        source_arg,
        os(&dir.file("out")),
    ]);

    assert_eq!(code, 0, "stderr: {}", text(&stderr));
    let recorded = fs::read_to_string(&log).expect("log");
    assert!(
        recorded.starts_with("-e ssh -p 2222 -avsP "),
        "{recorded}"
    );
    assert!(recorded.trim_end().ends_with("/out/"));
}

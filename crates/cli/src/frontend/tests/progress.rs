#![cfg(unix)]

use std::fs;

use super::common::*;

#[test]
fn raw_line_follows_only_partial_percentages() {
    let dir = ScriptDir::new().expect("dir");
    let source = dir.file("one.bin");
    fs::write(&source, b"payload").expect("write");
    let rsync = FakeRsync::new()
        .percents(&[0, 10, 70, 100])
        .write(dir.path(), "rsync")
        .expect("fake rsync");
    let ssh = fake_ssh(dir.path(), "ssh", &dir.file("ssh.log")).expect("fake ssh");

    let (code, stdout, stderr) = run_with_args([
        OsString::from(PRSYNC),
        OsString::from("--rsync-path"),
        os(&rsync),
        OsString::from("-e"),
        os(&ssh),
        OsString::from("1"),
        os(&source),
        OsString::from("host:/dst"),
    ]);

    assert_eq!(code, 0, "stderr: {}", text(&stderr));
    let header = format!("Transfer '{} -> host:/dst/'", source.display());
    let rendered = text(&stdout);
    let lines: Vec<&str> = rendered.lines().collect();

    let ten = lines
        .iter()
        .position(|line| *line == format!("{header}: 10%"))
        .expect("10% header");
    assert_eq!(lines[ten + 1], "\t1,024  10%    1.00MB/s    0:00:00");
    let seventy = lines
        .iter()
        .position(|line| *line == format!("{header}: 70%"))
        .expect("70% header");
    assert!(seventy > ten);
    let bare = [format!("{header}: 0%"), format!("{header}: 100%")];
    let first_and_last: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| bare.iter().any(|header| header == *line))
        .map(|(index, _)| index)
        .collect();
    assert!(first_and_last.len() >= 2, "{rendered}");
    for index in first_and_last {
        assert!(!lines[index + 1].starts_with('\t'), "{rendered}");
    }
    assert_eq!(lines.last(), Some(&"Completed 1/1"));
}

#[test]
fn completion_counter_counts_every_job() {
    let dir = ScriptDir::new().expect("dir");
    let source = source_tree(&dir.file("src"));
    let rsync = FakeRsync::new()
        .percents(&[])
        .write(dir.path(), "rsync")
        .expect("fake rsync");
    let ssh_log = dir.file("ssh.log");
    let ssh = fake_ssh(dir.path(), "ssh", &ssh_log).expect("fake ssh");

    let (code, stdout, _) = run_with_args([
        OsString::from(PRSYNC),
        OsString::from("--rsync-path"),
        os(&rsync),
        OsString::from("-e"),
        os(&ssh),
        OsString::from("-1"),
        os(&source),
        OsString::from("nas:/copy"),
    ]);

    assert_eq!(code, 0);
    assert!(fs::read_to_string(&ssh_log).expect("ssh log").contains("mkdir -p"));
    let completed: Vec<String> = text(&stdout)
        .lines()
        .filter(|line| line.starts_with("Completed "))
        .map(str::to_owned)
        .collect();
    assert_eq!(completed, ["Completed 1/3", "Completed 2/3", "Completed 3/3"]);
}

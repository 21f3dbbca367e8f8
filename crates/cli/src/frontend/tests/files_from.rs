use std::fs;

use super::common::*;

#[test]
fn files_from_list_replaces_enumeration() {
    let dir = ScriptDir::new().expect("dir");
    let list = dir.file("list.txt");
    fs::write(&list, "b.txt\n./a/x.txt\n\nb.txt\n").expect("write list");

    let (code, stdout, stderr) = run_with_args([
        OsString::from(PRSYNC),
        OsString::from("-n"),
        OsString::from("--files-from"),
        os(&list),
        OsString::from("4"),
        OsString::from("host:/data/"),
        OsString::from("out"),
    ]);

    assert_eq!(code, 0, "stderr: {}", text(&stderr));
    assert_eq!(
        text(&stdout),
        "host:/data/b.txt -> out/\nhost:/data/a/x.txt -> out/a/\n"
    );
}

#[test]
fn nul_separated_list() {
    let dir = ScriptDir::new().expect("dir");
    let list = dir.file("list.bin");
    fs::write(&list, b"with space.txt\0nested/y.txt\0").expect("write list");

    let (code, stdout, _) = run_with_args([
        OsString::from(PRSYNC),
        OsString::from("--dry-run"),
        OsString::from("--from0"),
        OsString::from("--files-from"),
        os(&list),
        OsString::from("2"),
        OsString::from("/srv/data"),
        OsString::from("nas:/copy"),
    ]);

    assert_eq!(code, 0);
    assert_eq!(
        text(&stdout),
        "/srv/data/with space.txt -> nas:/copy/\n/srv/data/nested/y.txt -> nas:/copy/nested/\n"
    );
}

#[test]
fn unreadable_list_exits_3() {
    let dir = ScriptDir::new().expect("dir");

    let (code, stdout, stderr) = run_with_args([
        OsString::from(PRSYNC),
        OsString::from("--files-from"),
        os(&dir.file("missing.txt")),
        OsString::from("2"),
        OsString::from("host:/data/"),
        OsString::from("out"),
    ]);

    assert_eq!(code, 3);
    assert!(stdout.is_empty());
    let rendered = text(&stderr);
    assert!(rendered.contains("failed to open files-from list"), "{rendered}");
    assert!(rendered.contains("(code 3)"));
}

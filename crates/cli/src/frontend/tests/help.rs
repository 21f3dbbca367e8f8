use super::common::*;

#[test]
fn help_prints_usage_to_stdout() {
    let (code, stdout, stderr) = run_with_args([PRSYNC, "--help"]);

    assert_eq!(code, 0);
    assert!(stderr.is_empty());
    let rendered = text(&stdout);
    assert!(rendered.starts_with("Usage: prsync [OPTIONS] N SOURCE DEST\n"));
    assert!(rendered.contains("--files-from=FILE"));
    assert!(rendered.contains("PRSYNC_RSYNC"));
}

#[test]
fn short_help_ignores_operands() {
    let (code, stdout, _) = run_with_args([PRSYNC, "-h", "2", "a", "b"]);
    assert_eq!(code, 0);
    assert!(text(&stdout).contains("Usage:"));
}

#[test]
fn version_prints_package_version() {
    let (code, stdout, stderr) = run_with_args([PRSYNC, "-V"]);

    assert_eq!(code, 0);
    assert!(stderr.is_empty());
    assert_eq!(
        text(&stdout),
        format!("prsync {}\n", env!("CARGO_PKG_VERSION"))
    );
}

#[test]
fn missing_operands_exit_with_syntax_error() {
    let (code, stdout, stderr) = run_with_args([PRSYNC]);

    assert_eq!(code, 1);
    assert!(stdout.is_empty());
    let rendered = text(&stderr);
    assert!(rendered.starts_with("prsync error: "), "{rendered}");
    assert!(rendered.contains("(code 1)"));
    assert!(rendered.contains("Usage: prsync"));
}

#[test]
fn non_numeric_parallelism_is_a_syntax_error() {
    let (code, _, stderr) = run_with_args([PRSYNC, "lots", "a", "b"]);
    assert_eq!(code, 1);
    assert!(text(&stderr).contains("lots"));
}

//! Binary tests: flags, exit status, report output.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn duskfix() -> Command {
    Command::cargo_bin("duskfix").unwrap()
}

fn write(path: &Path, text: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, text).unwrap();
}

#[test]
fn dry_run_reports_but_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("App.jsx");
    write(&file, "<div className=\"bg-white\" />\n");

    duskfix()
        .arg(dir.path())
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("dry run"))
        .stdout(predicate::str::contains("Files changed: 1"));

    let untouched = fs::read_to_string(&file).unwrap();
    assert_eq!(untouched, "<div className=\"bg-white\" />\n");
}

#[test]
fn rewrites_in_place_and_second_run_is_clean() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("App.jsx");
    write(&file, "<div className=\"bg-white\" />\n");

    duskfix()
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Files changed: 1"))
        .stdout(predicate::str::contains("App.jsx"));

    let rewritten = fs::read_to_string(&file).unwrap();
    assert_eq!(
        rewritten,
        "<div className=\"bg-white dark:bg-gray-800\" />\n"
    );

    duskfix()
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Files changed: 0"));

    let stable = fs::read_to_string(&file).unwrap();
    assert_eq!(stable, rewritten);
}

#[test]
fn quiet_run_keeps_totals_only() {
    let dir = TempDir::new().unwrap();
    write(
        &dir.path().join("App.jsx"),
        "<div className=\"bg-white\" />\n",
    );

    duskfix()
        .arg(dir.path())
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::contains("Files changed: 1"))
        .stdout(predicate::str::contains("App.jsx").not());
}

#[test]
fn extension_filter_narrows_the_walk() {
    let dir = TempDir::new().unwrap();
    let jsx = dir.path().join("a.jsx");
    let ts = dir.path().join("b.ts");
    write(&jsx, "<div className=\"bg-white\" />\n");
    write(&ts, "const cls = 'className=\"bg-white\"';\n");

    duskfix()
        .arg(dir.path())
        .args(["--ext", "jsx"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Files scanned: 1"));

    assert!(fs::read_to_string(&jsx).unwrap().contains("dark:bg-gray-800"));
    assert!(!fs::read_to_string(&ts).unwrap().contains("dark:"));
}

#[test]
fn missing_root_fails() {
    duskfix()
        .arg("definitely/not/here")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no such file or directory"));
}

#[test]
fn unreadable_file_does_not_abort_the_batch() {
    let dir = TempDir::new().unwrap();
    let bad = dir.path().join("bad.js");
    let good = dir.path().join("good.jsx");
    fs::write(&bad, [0xff, 0xfe, 0x00, 0x41]).unwrap();
    write(&good, "<div className=\"bg-white\" />\n");

    duskfix()
        .arg(dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("bad.js"));

    // The readable file was still rewritten.
    assert!(fs::read_to_string(&good)
        .unwrap()
        .contains("dark:bg-gray-800"));
}

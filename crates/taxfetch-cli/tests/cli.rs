use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// `taxfetch` with its config directory pointed at `home`.
fn taxfetch(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("taxfetch").unwrap();
    cmd.env("XDG_CONFIG_HOME", home).env("HOME", home);
    cmd
}

#[test]
fn schema_lists_every_column() {
    let home = TempDir::new().unwrap();
    let output = taxfetch(home.path()).arg("schema").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(lines.len(), 69);
    assert_eq!(lines[0], "JDX");
    assert_eq!(lines[29], "TOTAL DUE");
    assert_eq!(lines[68], "FETCH_DATE");
}

#[test]
fn run_fails_for_missing_input() {
    let home = TempDir::new().unwrap();
    taxfetch(home.path())
        .args(["run", "does-not-exist.xlsx"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn run_rejects_unsupported_county() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("input.csv");
    fs::write(&input, "JDX,TAXID\n1,ACCT00123\n").unwrap();

    taxfetch(home.path())
        .arg("run")
        .arg(&input)
        .args(["--county", "dallas"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Currently only Bexar County is supported",
        ));
}

#[test]
fn run_writes_output_when_every_row_is_skipped() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("input.csv");
    fs::write(&input, "JDX,TAXID\n1,\n2,ACCT\n").unwrap();
    let out_dir = home.path().join("results");

    taxfetch(home.path())
        .arg("run")
        .arg(&input)
        .arg("-o")
        .arg(&out_dir)
        .args(["--format", "csv", "--delay-ms", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Processed 2/2 records"))
        .stdout(predicate::str::contains("2 skipped"));

    let written: Vec<_> = fs::read_dir(&out_dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(written.len(), 1);
    assert!(written[0].starts_with("Bexar_Tax_Details_"));
    assert!(written[0].ends_with(".csv"));

    let content = fs::read_to_string(out_dir.join(&written[0])).unwrap();
    assert_eq!(content.lines().count(), 1);
    assert!(content.starts_with("JDX,ACCOUNT_NUMBER,PropID"));
}

#[test]
fn config_init_then_get_and_set() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("taxfetch.json");
    let config_arg = config.to_str().unwrap();

    taxfetch(home.path())
        .args(["config", "init", "-o", config_arg])
        .assert()
        .success();
    assert!(config.exists());

    taxfetch(home.path())
        .args(["-c", config_arg, "config", "set", "batch.delay_ms", "250"])
        .assert()
        .success();

    taxfetch(home.path())
        .args(["-c", config_arg, "config", "get", "batch.delay_ms"])
        .assert()
        .success()
        .stdout(predicate::str::contains("250"));

    taxfetch(home.path())
        .args(["-c", config_arg, "config", "get", "batch.nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration key not found"));
}

#[test]
fn config_path_uses_config_dir() {
    let home = TempDir::new().unwrap();
    taxfetch(home.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("taxfetch"))
        .stdout(predicate::str::contains("not created"));
}

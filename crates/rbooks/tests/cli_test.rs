//! End-to-end tests running the built binaries.
//!
//! Tests that need a real `ledger` executable are skipped when it is not
//! installed.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run_bin(bin: &str, args: &[&str], cwd: &Path) -> Output {
    Command::new(bin)
        .args(args)
        .current_dir(cwd)
        .env_remove("RBOOKS_LEDGER_DIR")
        .env_remove("RBOOKS_ENGINE")
        .output()
        .expect("Failed to run binary")
}

/// Check if the `ledger` engine is available.
fn ledger_available() -> bool {
    Command::new("ledger")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

fn write_books(root: &Path) {
    fs::create_dir_all(root.join("2026")).unwrap();
    fs::write(
        root.join("accounts.ledger"),
        "account Assets:Bank\naccount Equity:Capital\naccount Income:Sales\n",
    )
    .unwrap();
    fs::write(
        root.join("2026/01.ledger"),
        "2026/01/05 Opening capital\n    Assets:Bank    100000 JPY\n    Equity:Capital\n",
    )
    .unwrap();
}

#[test]
fn test_init_scaffolds_year() {
    let temp = TempDir::new().unwrap();
    let output = run_bin(
        env!("CARGO_BIN_EXE_rbooks-init"),
        &["--year", "2027", "--ledger-dir", "books"],
        temp.path(),
    );

    assert!(output.status.success());
    let year_dir = temp.path().join("books/2027");
    assert!(year_dir.join("opening.ledger").is_file());
    assert!(year_dir.join("12.ledger").is_file());
    assert_eq!(
        fs::read_to_string(year_dir.join("05.ledger")).unwrap(),
        "; books/2027/05.ledger\n\n"
    );
}

#[test]
fn test_rejects_malformed_year() {
    let temp = TempDir::new().unwrap();
    let output = run_bin(
        env!("CARGO_BIN_EXE_rbooks-init"),
        &["--year", "27"],
        temp.path(),
    );
    assert!(!output.status.success());
    assert!(!temp.path().join("ledger").exists());
}

#[test]
fn test_missing_engine_fails_with_message() {
    let temp = TempDir::new().unwrap();
    write_books(&temp.path().join("ledger"));

    let output = run_bin(
        env!("CARGO_BIN_EXE_rbooks-check"),
        &["--engine", "rbooks-no-such-engine"],
        temp.path(),
    );

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error:"), "stderr: {stderr}");
    assert!(stderr.contains("rbooks-no-such-engine"), "stderr: {stderr}");
}

#[test]
fn test_missing_ledger_dir_fails() {
    let temp = TempDir::new().unwrap();
    let output = run_bin(
        env!("CARGO_BIN_EXE_rbooks-monthly"),
        &["--month", "2026-01", "--ledger-dir", "absent"],
        temp.path(),
    );
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_check_and_accounts_with_ledger() {
    if !ledger_available() {
        eprintln!("Skipping: ledger not installed");
        return;
    }

    let temp = TempDir::new().unwrap();
    write_books(&temp.path().join("ledger"));

    let check = run_bin(env!("CARGO_BIN_EXE_rbooks-check"), &[], temp.path());
    assert!(check.status.success(), "{check:?}");

    let accounts = run_bin(
        env!("CARGO_BIN_EXE_rbooks-accounts"),
        &["--format", "json"],
        temp.path(),
    );
    assert!(accounts.status.success(), "{accounts:?}");
    let doc: serde_json::Value = serde_json::from_slice(&accounts.stdout).unwrap();
    assert_eq!(doc["valid"], true);
    assert_eq!(doc["used_count"], 2);
}

#[test]
fn test_export_csv_with_ledger() {
    if !ledger_available() {
        eprintln!("Skipping: ledger not installed");
        return;
    }

    let temp = TempDir::new().unwrap();
    write_books(&temp.path().join("ledger"));

    let output = run_bin(
        env!("CARGO_BIN_EXE_rbooks-export"),
        &["--month", "2026-01", "--output", "jan.csv"],
        temp.path(),
    );
    assert!(output.status.success(), "{output:?}");

    let csv = fs::read_to_string(temp.path().join("jan.csv")).unwrap();
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("date,account,description,amount,total"));
    assert!(
        lines.any(|line| line.starts_with("2026-01-05,Assets:Bank,Opening capital,")),
        "csv: {csv}"
    );
}

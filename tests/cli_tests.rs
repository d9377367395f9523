use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn noteorder() -> Command {
    let mut cmd = Command::cargo_bin("noteorder").expect("binary built");
    cmd.env("RUST_LOG", "off").env_remove("LENDING_API_KEY");
    cmd
}

fn write_config(dir: &Path) -> PathBuf {
    let db = dir.join("ledger.db");
    let path = dir.join("config.toml");
    let toml = format!(
        "database = \"{}\"\n\n[logging]\nlevel = \"warn\"\nformat = \"pretty\"\n",
        db.display()
    );
    fs::write(&path, toml).expect("write temp config");
    path
}

#[test]
fn decode_prints_combined_code() {
    noteorder()
        .args(["decode", "ORDER_FULFILLED", "REQUESTED_AMNT_ROUNDED"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("17\n"));
}

#[test]
fn decode_json_lists_flags() {
    noteorder()
        .args(["--json", "decode", "ORDER_FULFILLED"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""code":1"#))
        .stdout(predicate::str::contains("ORDER_FULFILLED"));
}

#[test]
fn decode_rejects_unknown_status() {
    noteorder()
        .args(["decode", "ORDER_FULFILLED", "ORDER_MISPLACED"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ORDER_MISPLACED"));
}

#[test]
fn migrate_then_pending_reports_empty_ledger() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());

    noteorder()
        .arg("--config")
        .arg(&config)
        .arg("migrate")
        .assert()
        .success();
    assert!(dir.path().join("ledger.db").exists());

    noteorder()
        .arg("--config")
        .arg(&config)
        .args(["--json", "pending"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""count":0"#));
}

#[test]
fn reconcile_reports_unmatched_confirmations() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());
    let ack = dir.path().join("ack.json");
    fs::write(
        &ack,
        r#"{"orderInstructId": 4242, "orderConfirmations": [
            {"loanId": 1, "requestedAmount": 25.0, "investedAmount": 25.0,
             "executionStatus": ["ORDER_FULFILLED"]}]}"#,
    )
    .unwrap();

    noteorder()
        .arg("--config")
        .arg(&config)
        .arg("--json")
        .arg("reconcile")
        .arg("--file")
        .arg(&ack)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""instruct_id":"4242""#))
        .stdout(predicate::str::contains(r#""rows_affected":0"#));
}

#[test]
fn submit_without_api_key_fails_before_logging() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());

    noteorder()
        .arg("--config")
        .arg(&config)
        .args([
            "submit", "--investor", "1", "--client", "desk", "--loan", "12345", "--amount", "25",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("LENDING_API_KEY"));

    assert!(!dir.path().join("ledger.db").exists());
}

#[test]
fn submit_rejects_non_positive_amount() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());

    noteorder()
        .arg("--config")
        .arg(&config)
        .args(["submit", "--investor", "1", "--client", "desk", "--order", "12345:0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("amount must be greater than 0"));

    assert!(!dir.path().join("ledger.db").exists());
}

#[test]
fn invalid_config_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(&path, "[risk]\nmax_order_amount = \"-5\"\n").unwrap();

    noteorder()
        .arg("--config")
        .arg(&path)
        .arg("pending")
        .assert()
        .failure()
        .stderr(predicate::str::contains("risk.max_order_amount"));
}

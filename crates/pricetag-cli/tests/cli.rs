//! End-to-end tests for the `pricetag` binary.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn pricetag(dir: &TempDir) -> Command {
    let config = dir.path().join("config.json");
    if !config.exists() {
        fs::write(&config, "{}").unwrap();
    }

    let mut cmd = Command::cargo_bin("pricetag").unwrap();
    cmd.env_remove("RUST_LOG").arg("--config").arg(config);
    cmd
}

#[test]
fn test_parse_json() {
    let dir = TempDir::new().unwrap();

    pricetag(&dir)
        .args(["parse", "1,235€ 99"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""amount": "1235.99""#))
        .stdout(predicate::str::contains(r#""currency": "€""#));
}

#[test]
fn test_parse_overrides() {
    let dir = TempDir::new().unwrap();

    pricetag(&dir)
        .args(["parse", "140.600", "-d", ",", "--currency", "CLP", "-f", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("140.600,140600,CLP,140.600"));

    pricetag(&dir)
        .args(["parse", "Price 12.99", "--hint", "USD", "-f", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Currency: USD"));
}

#[test]
fn test_log_level() {
    let dir = TempDir::new().unwrap();

    pricetag(&dir)
        .args(["parse", "12 €"])
        .assert()
        .success()
        .stderr(predicate::str::contains("numeric candidates").not());

    pricetag(&dir)
        .args(["-vv", "parse", "12 €"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Found 1 numeric candidates"));

    pricetag(&dir)
        .env("RUST_LOG", "pricetag_core=debug")
        .args(["parse", "12 €"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Found 1 numeric candidates"));
}

#[test]
fn test_parse_rejects_bad_separator() {
    let dir = TempDir::new().unwrap();

    pricetag(&dir)
        .args(["parse", "12.50", "-d", ";"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("decimal separator"));
}

#[test]
fn test_parse_uses_config_file() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("config.json"),
        r#"{"extraction": {"currency_hint": "EUR", "no_charge_synonyms": ["inclusive"]}}"#,
    )
    .unwrap();

    pricetag(&dir)
        .args(["parse", "12.99"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""currency": "EUR""#));

    pricetag(&dir)
        .args(["parse", "Inclusive"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""amount": "0""#));
}

#[test]
fn test_batch_to_csv_file() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.txt"), "15 130 Р\nPrice 12.99\tUSD\n\n").unwrap();
    fs::write(dir.path().join("b.txt"), "Free\n").unwrap();
    let output = dir.path().join("out.csv");

    pricetag(&dir)
        .arg("batch")
        .arg(dir.path().join("*.txt").to_str().unwrap())
        .arg("--output")
        .arg(&output)
        .args(["--format", "csv"])
        .assert()
        .success();

    let csv = fs::read_to_string(&output).unwrap();
    let lines: Vec<_> = csv.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines.contains(&"15 130 Р,15130,Р,15 130"));
    assert!(lines.contains(&"Price 12.99,12.99,USD,12.99"));
    assert!(lines.contains(&"Free,0,,Free"));
}

#[test]
fn test_batch_no_matches() {
    let dir = TempDir::new().unwrap();

    pricetag(&dir)
        .arg("batch")
        .arg(dir.path().join("*.missing").to_str().unwrap())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No matching files"));
}

#[test]
fn test_config_init_and_show() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.json");

    Command::cargo_bin("pricetag")
        .unwrap()
        .args(["config", "init", "--output"])
        .arg(&path)
        .assert()
        .success();
    assert!(path.exists());

    Command::cargo_bin("pricetag")
        .unwrap()
        .args(["config", "init", "--output"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    Command::cargo_bin("pricetag")
        .unwrap()
        .arg("--config")
        .arg(&path)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("prefer_amount_near_currency"));
}

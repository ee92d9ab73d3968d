//! End-to-end tests driving the rh binary

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn rh(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("rh").unwrap();
    // keep the test hermetic: no ambient webhook, no project config
    cmd.current_dir(dir).env_remove("REPOHERALD_WEBHOOK_URL");
    cmd
}

fn write_import_summary(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("import.json");
    fs::write(
        &path,
        r#"{"name": "Firefox", "version": "128.0", "catalogs": ["testing"]}"#,
    )
    .unwrap();
    path
}

fn write_staging_summary(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("staging.json");
    fs::write(
        &path,
        r#"{"data": {"name": "Firefox", "versions": ["127.0"],
            "staging_catalog": "testing", "production_catalog": "production"}}"#,
    )
    .unwrap();
    path
}

fn stored_facts(path: &Path) -> Vec<(String, String)> {
    let card: serde_json::Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
    card["attachments"][0]["content"]["sections"][0]["facts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| {
            (
                f["name"].as_str().unwrap().to_string(),
                f["value"].as_str().unwrap().to_string(),
            )
        })
        .collect()
}

#[test]
fn summarize_without_webhook_accumulates_across_runs() {
    let temp = TempDir::new().unwrap();
    let msg_file = temp.path().join("card.json");
    let import = write_import_summary(temp.path());
    let staging = write_staging_summary(temp.path());

    rh(temp.path())
        .args(["summarize", "--changed"])
        .arg("--msg-file")
        .arg(&msg_file)
        .arg("--import-summary")
        .arg(&import)
        .assert()
        .success()
        .stdout(predicate::str::contains("Card collected in"));

    let facts = stored_facts(&msg_file);
    assert_eq!(facts.len(), 1);
    assert_eq!(facts[0].0, "Firefox");
    assert_eq!(facts[0].1, "imported ver. 128.0 -> testing");

    // a second, independent process run extends the same card
    rh(temp.path())
        .args(["summarize", "--changed"])
        .arg("--msg-file")
        .arg(&msg_file)
        .arg("--staging-summary")
        .arg(&staging)
        .assert()
        .success();

    let facts = stored_facts(&msg_file);
    assert_eq!(facts.len(), 2);
    assert_eq!(facts[1].1, "staged ver. 127.0 testing -> production");
}

#[test]
fn summarize_unchanged_run_contributes_nothing() {
    let temp = TempDir::new().unwrap();
    let msg_file = temp.path().join("card.json");
    let import = write_import_summary(temp.path());

    rh(temp.path())
        .args(["summarize", "--changed"])
        .arg("--msg-file")
        .arg(&msg_file)
        .arg("--import-summary")
        .arg(&import)
        .assert()
        .success();
    let before = fs::read(&msg_file).unwrap();

    // without --changed the summary is ignored and the card is untouched
    rh(temp.path())
        .args(["summarize"])
        .arg("--msg-file")
        .arg(&msg_file)
        .arg("--import-summary")
        .arg(&import)
        .assert()
        .success();

    assert_eq!(fs::read(&msg_file).unwrap(), before);
}

#[test]
fn summarize_clear_at_finish_removes_the_card_file() {
    let temp = TempDir::new().unwrap();
    let msg_file = temp.path().join("card.json");
    let import = write_import_summary(temp.path());

    rh(temp.path())
        .args(["summarize", "--changed"])
        .arg("--msg-file")
        .arg(&msg_file)
        .arg("--import-summary")
        .arg(&import)
        .assert()
        .success();
    assert!(msg_file.exists());

    rh(temp.path())
        .args(["summarize", "--clear-at-finish"])
        .arg("--msg-file")
        .arg(&msg_file)
        .assert()
        .success();
    assert!(!msg_file.exists());
}

#[test]
fn notify_without_change_reports_nothing() {
    let temp = TempDir::new().unwrap();

    rh(temp.path())
        .args(["notify", "--webhook-url", "http://127.0.0.1:1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to report"));
}

#[test]
fn notify_requires_a_webhook_url() {
    let temp = TempDir::new().unwrap();

    rh(temp.path())
        .args(["notify", "--changed"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("webhook URL"));
}

#[test]
fn summarize_rejects_an_unreadable_summary_file() {
    let temp = TempDir::new().unwrap();

    rh(temp.path())
        .args(["summarize", "--changed"])
        .arg("--import-summary")
        .arg(temp.path().join("missing.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("import summary"));
}

// cleanchat/tests/cli_integration_tests.rs
//! End-to-end tests for the `cleanchat` binary.
//!
//! Every run passes `--offline` and an empty `--config` file so results depend
//! only on the embedded ban-list, never on the network or a developer's
//! personal configuration.

use anyhow::Result;
use assert_cmd::assert::Assert;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

use cleanchat_core::AuditLog;

fn empty_config(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("cleanchat.yaml");
    fs::write(&path, "").unwrap();
    path
}

fn cleanchat(config: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo_bin!("cleanchat"));
    cmd.env_remove("CLEANCHAT_LEXICON_URL")
        .env_remove("CLEANCHAT_LEMMA_MODEL")
        .env_remove("RUST_LOG")
        .arg("--offline")
        .arg("--config")
        .arg(config);
    cmd
}

fn run_with_stdin(config: &Path, input: &str, args: &[&str]) -> Assert {
    cleanchat(config).args(args).write_stdin(input).assert()
}

fn stdout_of(assert: &Assert) -> String {
    let raw = strip_ansi_escapes::strip(&assert.get_output().stdout);
    String::from_utf8_lossy(&raw).to_string()
}

#[test]
fn check_banned_argument_exits_with_one() {
    let dir = tempdir().unwrap();
    cleanchat(&empty_config(&dir))
        .args(["check", "какая залупа"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("BANNED\tкакая залупа"));
}

#[test]
fn check_clean_argument_exits_with_zero() {
    let dir = tempdir().unwrap();
    cleanchat(&empty_config(&dir))
        .args(["check", "unrelated safe text"])
        .assert()
        .success()
        .stdout("CLEAN\tunrelated safe text\n");
}

#[test]
fn check_reads_stdin_and_explains() {
    let dir = tempdir().unwrap();
    let assert = run_with_stdin(&empty_config(&dir), "всем привет\nну ты мудак\n", &["check", "--explain"]).code(1);
    let stdout = stdout_of(&assert);

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "CLEAN\tвсем привет");
    assert_eq!(lines[1], "BANNED\tну ты мудак");
    assert!(lines[2].starts_with("  "), "missing reason line: {:?}", lines);
    assert!(lines[2].contains("мудак"));
}

#[test_log::test]
fn lemma_model_enables_inflection_matching() -> Result<()> {
    let dir = tempdir()?;
    let config = empty_config(&dir);
    let model = dir.path().join("lemmas.tsv");
    fs::write(&model, "мудаками\tмудак\n")?;

    cleanchat(&config).args(["check", "с мудаками"]).assert().success();
    cleanchat(&config)
        .arg("--lemma-model")
        .arg(&model)
        .args(["check", "с мудаками"])
        .assert()
        .code(1);
    Ok(())
}

#[test_log::test]
fn moderate_reports_top_violators() {
    let dir = tempdir().unwrap();
    let input = "1\tvasya\tну ты сука\n2\t\tвсем привет\n1\tvasya\tcyka\n3\tpetya\tмудак\n";
    let assert = run_with_stdin(&empty_config(&dir), input, &["moderate"]).success();
    let stdout = stdout_of(&assert);

    assert!(stdout.starts_with("Top violators (3 violations total)"), "unexpected report: {}", stdout);
    let vasya = stdout.find("vasya").unwrap();
    let petya = stdout.find("petya").unwrap();
    assert!(vasya < petya);
    assert!(!stdout.contains("ID:2"));

    assert.stderr(predicate::str::contains("Processed 4 message(s): 3 banned"));
}

#[test]
fn moderate_top_limits_rows() {
    let dir = tempdir().unwrap();
    let input = "1\ta\tсука\n1\ta\tсука\n2\tb\tсука\n";
    let assert = run_with_stdin(&empty_config(&dir), input, &["moderate", "--top", "1"]).success();
    let stdout = stdout_of(&assert);
    assert!(stdout.contains(" a "));
    assert!(!stdout.contains(" b "));
}

#[test_log::test]
fn moderate_json_input_writes_audit_log() -> Result<()> {
    let dir = tempdir()?;
    let config = empty_config(&dir);
    let input = dir.path().join("messages.jsonl");
    let audit = dir.path().join("logs").join("audit.jsonl");
    fs::write(
        &input,
        concat!(
            "{\"author_id\": 10, \"author_handle\": \"troll\", \"text\": \"пизда\"}\n",
            "{\"author_id\": 11, \"text\": \"good morning\"}\n",
            "{\"author_id\": 12}\n",
        ),
    )?;

    cleanchat(&config)
        .arg("moderate")
        .arg("--json")
        .arg("--input")
        .arg(&input)
        .arg("--audit-log")
        .arg(&audit)
        .assert()
        .success()
        .stdout(predicate::str::contains("troll"))
        .stderr(predicate::str::contains("1 without text"));

    let records = AuditLog::read_all(&audit)?;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].author_id, 10);
    assert_eq!(records[0].text, "пизда");
    Ok(())
}

#[test]
fn check_treats_at_sign_as_boundary() {
    let dir = tempdir().unwrap();
    cleanchat(&empty_config(&dir))
        .args(["check", "привет @мудак"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("BANNED\tпривет @мудак"));
}

#[test]
fn moderate_skips_malformed_lines() {
    let dir = tempdir().unwrap();
    run_with_stdin(&empty_config(&dir), "not-a-number\tсука\n5\tx\tсука\n", &["moderate"])
        .success()
        .stdout(predicate::str::contains("Top violators (1 violations total)"))
        .stderr(predicate::str::contains("Skipped 1 malformed line(s)."));
}

#[test]
fn quiet_suppresses_summary() {
    let dir = tempdir().unwrap();
    run_with_stdin(&empty_config(&dir), "1\tx\tпривет\n", &["-q", "moderate"])
        .success()
        .stdout("No violations recorded.\n")
        .stderr(predicate::str::is_empty());
}

#[test]
fn lexicon_lists_embedded_words() {
    let dir = tempdir().unwrap();
    cleanchat(&empty_config(&dir))
        .args(["lexicon", "--list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Source: embedded (offline)"))
        .stdout(predicate::str::contains("Normalizer: unavailable"))
        .stdout(predicate::str::contains("\nзалупа\n"));
}

#[test]
fn extra_words_from_config_are_banned() -> Result<()> {
    let dir = tempdir()?;
    let config = dir.path().join("custom.yaml");
    fs::write(&config, "lexicon:\n  extra_words:\n    - \"бляха\"\n")?;

    cleanchat(&config).args(["check", "вот бляха"]).assert().code(1);
    Ok(())
}

#[test]
fn invalid_config_fails_with_error() -> Result<()> {
    let dir = tempdir()?;
    let config = dir.path().join("bad.yaml");
    fs::write(&config, "reporting:\n  top_n: 0\n")?;

    cleanchat(&config)
        .args(["check", "hello"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("top_n"));
    Ok(())
}

#[test]
fn missing_theme_file_fails() {
    let dir = tempdir().unwrap();
    cleanchat(&empty_config(&dir))
        .args(["--theme", "/nonexistent/theme.yaml", "check", "hello"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("theme"));
}

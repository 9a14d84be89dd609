//! Tests for the `jats-article` binary.

use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn jats_article() -> Command {
    Command::cargo_bin("jats-article").unwrap()
}

#[test]
fn test_show() {
    jats_article()
        .arg("show")
        .arg(fixture("sample_article.xml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Daytime naps and declarative memory"))
        .stdout(predicate::str::contains("Yuki Tanaka, Ingrid Berg"))
        .stdout(predicate::str::contains("Countries: Japan, Japan, Norway"))
        .stdout(predicate::str::contains("Participants"));
}

#[test]
fn test_text_of_one_section() {
    jats_article()
        .arg("text")
        .arg(fixture("sample_article.xml"))
        .args(["--section", "Introduction"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sleep supports memory consolidation"))
        .stdout(predicate::str::contains("Forty adults").not());
}

#[test]
fn test_text_nested_main_sections() {
    jats_article()
        .arg("text")
        .arg(fixture("sample_article.xml"))
        .args(["--nested", "--main-sections"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Methods"))
        .stdout(predicate::str::contains("Forty adults took part."));
}

#[test]
fn test_tables() {
    jats_article()
        .arg("tables")
        .arg(fixture("sample_article.xml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Table1"))
        .stdout(predicate::str::contains("Immediate"))
        .stdout(predicate::str::contains("Wake"));
}

#[test]
fn test_yaml_writes_file() {
    let dir = tempdir().unwrap();

    jats_article()
        .arg("yaml")
        .arg(fixture("sample_article.xml"))
        .arg("--output")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved to:"));

    assert!(dir.path().join("pmc6543210.yaml").exists());
}

#[test]
fn test_corpus_failure_keeps_other_articles() {
    jats_article()
        .arg("show")
        .arg(fixture("corpus.xml"))
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("Caffeine and reaction time"))
        .stdout(predicate::str::contains("Light exposure at night"))
        .stderr(predicate::str::contains("<hologram>"))
        .stderr(predicate::str::contains("1 of 3 articles failed to parse"));
}

#[test]
fn test_missing_file() {
    jats_article()
        .arg("show")
        .arg("/nonexistent/article.xml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

//! Command-line tests for the `usep-indexer` binary.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn indexer() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_usep-indexer"));
    cmd.env_remove("SOLR_URL")
        .env_remove("TRANSCRIPTION_XSL_PATH")
        .env("RUST_LOG", "off");
    cmd
}

#[test]
fn test_munge_prints_munged_text() {
    indexer()
        .arg("munge")
        .arg(fixture("inscription.xml"))
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            r#"<ab xmlns="http://www.tei-c.org/ns/1.0"><lb n="1"/>D(is) M(anibus)<lb n="2"/>"#,
        ));
}

#[test]
fn test_transform_with_flag() {
    indexer()
        .arg("transform")
        .arg(fixture("inscription.xml"))
        .arg("--xsl")
        .arg(fixture("transcription.xsl"))
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#"<span class="linenumber">2</span>IVLIAE [FELICI]"#,
        ));
}

#[test]
fn test_transform_reads_stylesheet_from_env() {
    indexer()
        .env("TRANSCRIPTION_XSL_PATH", fixture("transcription.xsl"))
        .arg("transform")
        .arg(fixture("inscription.xml"))
        .assert()
        .success()
        .stdout(predicate::str::starts_with(r#"<div class="transcription">"#));
}

#[test]
fn test_transform_without_stylesheet() {
    indexer()
        .arg("transform")
        .arg(fixture("inscription.xml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("TRANSCRIPTION_XSL_PATH not set"));
}

#[test]
fn test_add_without_solr_url() {
    indexer()
        .arg("add")
        .arg("CA.Berk.UC.HMA.G.8/4213")
        .arg(fixture("inscription.xml"))
        .arg("--xsl")
        .arg(fixture("transcription.xsl"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("SOLR_URL not set"));
}

#[test]
fn test_add_with_missing_stylesheet() {
    indexer()
        .arg("add")
        .arg("CA.Berk.UC.HMA.G.8/4213")
        .arg(fixture("inscription.xml"))
        .arg("--solr-url")
        .arg("http://localhost:8983/solr/usep")
        .arg("--xsl")
        .arg("/nonexistent/transcription.xsl")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read stylesheet"));
}

#[test]
fn test_munge_missing_file() {
    indexer()
        .arg("munge")
        .arg("/nonexistent/inscription.xml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read source document"));
}

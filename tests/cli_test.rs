//! End-to-end tests for the rawify binary.

mod common;

use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const README: &str = "# Widget\n\n![logo](./img/logo.png \"Logo\")\n\n<img src=\"assets/pic.jpg\">\n\n![ext](https://example.com/x.png)\n";

fn rawify() -> Command {
    Command::cargo_bin("rawify").expect("binary should be built")
}

/// Tests overrides with output to stdout.
#[test]
fn test_overrides_to_stdout() -> Result<()> {
    // Arrange
    let dir = TempDir::new()?;
    common::write_file(dir.path(), "README.md", README)?;

    // Act & Assert
    rawify()
        .current_dir(dir.path())
        .args(["--repo", "acme/widget", "-b", "main"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "![logo](https://raw.githubusercontent.com/acme/widget/main/img/logo.png \"Logo\")",
        ))
        .stdout(predicate::str::contains(
            "<img src=\"https://raw.githubusercontent.com/acme/widget/main/assets/pic.jpg\">",
        ))
        .stdout(predicate::str::contains("![ext](https://example.com/x.png)"));

    Ok(())
}

/// Tests stdout carries the document plus one trailing newline.
#[test]
fn test_stdout_is_document_with_newline() -> Result<()> {
    let dir = TempDir::new()?;
    common::write_file(dir.path(), "doc.md", "no images here")?;

    rawify()
        .current_dir(dir.path())
        .args(["doc.md", "--repo", "acme/widget", "--branch", "main"])
        .assert()
        .success()
        .stdout("no images here\n");

    Ok(())
}

/// Tests writing to an output file.
#[test]
fn test_output_file() -> Result<()> {
    // Arrange
    let dir = TempDir::new()?;
    common::write_file(dir.path(), "README.md", README)?;

    // Act
    rawify()
        .current_dir(dir.path())
        .args(["README.md", "-o", "out.md", "--repo", "acme/widget", "-b", "dev"])
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains(
            "Transformed README written to: out.md",
        ));

    // Assert
    let written = fs::read_to_string(dir.path().join("out.md"))?;
    assert!(written.contains("https://raw.githubusercontent.com/acme/widget/dev/img/logo.png"));
    assert!(!written.contains("./img/logo.png"));
    Ok(())
}

/// Tests malformed --repo fails without writing output.
#[test]
fn test_malformed_repo_writes_nothing() -> Result<()> {
    let dir = TempDir::new()?;
    common::write_file(dir.path(), "README.md", README)?;

    rawify()
        .current_dir(dir.path())
        .args(["-o", "out.md", "--repo", "widget"])
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("owner/repo"));

    assert!(!dir.path().join("out.md").exists());
    Ok(())
}

/// Tests missing input file.
#[test]
fn test_missing_input() -> Result<()> {
    let dir = TempDir::new()?;

    rawify()
        .current_dir(dir.path())
        .args(["MISSING.md", "--repo", "acme/widget"])
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("input file not found: MISSING.md"));

    Ok(())
}

/// Tests auto-detection from the repository remote and branch.
#[test]
fn test_auto_detect_from_repository() -> Result<()> {
    // Arrange
    let repo = common::create_test_repo("docs")?;
    common::add_remote(repo.path(), "origin", "git@github.com:acme/widget.git")?;
    common::write_file(repo.path(), "README.md", README)?;

    // Act & Assert
    rawify()
        .current_dir(repo.path())
        .arg("-v")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "https://raw.githubusercontent.com/acme/widget/docs/img/logo.png",
        ))
        .stderr(predicate::str::contains("Repository: acme/widget"))
        .stderr(predicate::str::contains("Branch: docs"))
        .stderr(predicate::str::contains("Rewritten image references: 2"));

    Ok(())
}

/// Tests repository without remote.
#[test]
fn test_no_remote() -> Result<()> {
    let repo = common::create_test_repo("main")?;
    common::write_file(repo.path(), "README.md", README)?;

    rawify()
        .current_dir(repo.path())
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("could not determine git remote URL"));

    Ok(())
}

/// Tests non-GitHub remote.
#[test]
fn test_unparseable_remote() -> Result<()> {
    let repo = common::create_test_repo("main")?;
    common::add_remote(repo.path(), "origin", "https://gitlab.com/acme/widget.git")?;
    common::write_file(repo.path(), "README.md", README)?;

    rawify()
        .current_dir(repo.path())
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains(
            "could not parse GitHub URL from: https://gitlab.com/acme/widget.git",
        ));

    Ok(())
}

/// Tests rerunning on rewritten output changes nothing.
#[test]
fn test_rerun_is_identity() -> Result<()> {
    // Arrange
    let dir = TempDir::new()?;
    common::write_file(dir.path(), "README.md", README)?;
    rawify()
        .current_dir(dir.path())
        .args(["-o", "once.md", "--repo", "acme/widget", "-b", "main"])
        .assert()
        .success();

    // Act
    rawify()
        .current_dir(dir.path())
        .args(["once.md", "-o", "twice.md", "--repo", "acme/widget", "-b", "main"])
        .assert()
        .success();

    // Assert
    assert_eq!(
        fs::read_to_string(dir.path().join("once.md"))?,
        fs::read_to_string(dir.path().join("twice.md"))?
    );
    Ok(())
}

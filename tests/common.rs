//! Shared test utilities for integration tests.
//!
//! Provides helper functions for creating temporary git repositories with
//! remotes, branches and commits used across multiple test files.

#![allow(dead_code)]

use anyhow::Result;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// Runs git in `repo_path`, failing on non-zero exit.
///
/// # Errors
///
/// Returns error if git cannot be spawned or exits unsuccessfully
pub fn git(repo_path: &Path, args: &[&str]) -> Result<String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(repo_path)
        .output()?;

    if !output.status.success() {
        anyhow::bail!(
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr)
        );
    }

    Ok(String::from_utf8(output.stdout)?.trim().to_string())
}

/// Creates temporary git repository with test configuration.
///
/// HEAD points at `branch`, which is unborn until the first commit.
///
/// # Errors
///
/// Returns error if git commands fail or directory creation fails
pub fn create_test_repo(branch: &str) -> Result<TempDir> {
    let dir = TempDir::new()?;
    let path = dir.path();

    git(path, &["init", "-q"])?;
    git(path, &["config", "user.name", "Test User"])?;
    git(path, &["config", "user.email", "test@example.com"])?;
    git(path, &["config", "commit.gpgsign", "false"])?;
    git(
        path,
        &["symbolic-ref", "HEAD", &format!("refs/heads/{branch}")],
    )?;

    Ok(dir)
}

/// Adds a remote with the given fetch URL.
///
/// # Errors
///
/// Returns error if git remote add fails
pub fn add_remote(repo_path: &Path, name: &str, url: &str) -> Result<()> {
    git(repo_path, &["remote", "add", name, url])?;
    Ok(())
}

/// Commits a file and returns the commit hash.
///
/// # Errors
///
/// Returns error if writing, staging or committing fails
pub fn commit_file(repo_path: &Path, path: &str, content: &str) -> Result<String> {
    write_file(repo_path, path, content)?;
    git(repo_path, &["add", path])?;
    git(repo_path, &["commit", "-q", "-m", "test commit"])?;
    git(repo_path, &["rev-parse", "HEAD"])
}

/// Records `branch` as origin's default, as `git clone` would.
///
/// # Errors
///
/// Returns error if the refs cannot be written
pub fn set_origin_head(repo_path: &Path, branch: &str) -> Result<()> {
    let remote_ref = format!("refs/remotes/origin/{branch}");
    git(repo_path, &["update-ref", &remote_ref, "HEAD"])?;
    git(
        repo_path,
        &["symbolic-ref", "refs/remotes/origin/HEAD", &remote_ref],
    )?;
    Ok(())
}

/// Writes file to repository, creating parent directories as needed.
///
/// # Errors
///
/// Returns error if directory creation or file write fails
pub fn write_file(repo_path: &Path, path: &str, content: &str) -> Result<()> {
    let file_path = repo_path.join(path);
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
}

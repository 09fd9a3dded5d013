//! Error types for repository discovery and input handling.

use std::path::PathBuf;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Failures that abort a run before any output is written.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// `--repo` value is not `owner/name`.
    #[error("--repo must be in format 'owner/repo', got '{0}'")]
    MalformedRepoOverride(String),

    /// No git repository could be opened from the working directory.
    #[error(
        "could not open git repository: {0}\nuse --repo owner/repo to specify manually"
    )]
    Repository(String),

    /// Repository has no remote with a usable URL.
    #[error(
        "could not determine git remote URL\nmake sure you're in a git repository with a remote configured, or use --repo owner/repo to specify manually"
    )]
    NoRemote,

    /// Remote URL is not a GitHub SSH or HTTPS URL.
    #[error("could not parse GitHub URL from: {0}\nuse --repo owner/repo to specify manually")]
    UnrecognizedRemote(String),

    /// Input document does not exist.
    #[error("input file not found: {}", .0.display())]
    InputNotFound(PathBuf),
}

//! Command line configuration.

use clap::Parser;
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::remote::RepositoryIdentity;

/// Command line configuration for rawify.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "rawify",
    version,
    about = "Rewrite local README image paths into raw GitHub URLs",
    long_about = None
)]
pub struct Config {
    /// Input README file
    #[arg(default_value = "README.md")]
    pub input: PathBuf,

    /// Output file (default: print to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Git branch name (default: auto-detect)
    #[arg(short, long)]
    pub branch: Option<String>,

    /// Override repository in format 'owner/repo'
    #[arg(long, value_name = "OWNER/REPO")]
    pub repo: Option<String>,

    /// Print resolved repository, branch and rewrite count to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parses configuration from command line arguments.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Validates configuration.
    ///
    /// # Errors
    ///
    /// Returns error if `--repo` is malformed or the input file does not exist.
    pub fn validate(&self) -> Result<()> {
        self.repo_override()?;

        if !self.input.exists() {
            return Err(Error::InputNotFound(self.input.clone()));
        }

        Ok(())
    }

    /// Returns repository from `--repo`, if given.
    ///
    /// # Errors
    ///
    /// Returns error if the value is not `owner/repo`.
    pub fn repo_override(&self) -> Result<Option<RepositoryIdentity>> {
        self.repo.as_deref().map(parse_repo_override).transpose()
    }
}

/// Splits an `owner/repo` override into its parts.
///
/// Exactly one `/` is accepted, with non-empty text on both sides.
///
/// # Errors
///
/// Returns [`Error::MalformedRepoOverride`] otherwise.
pub fn parse_repo_override(value: &str) -> Result<RepositoryIdentity> {
    match value.split_once('/') {
        Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
            Ok(RepositoryIdentity::new(owner, name))
        }
        _ => Err(Error::MalformedRepoOverride(value.to_string())),
    }
}

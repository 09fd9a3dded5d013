//! Repository and branch discovery from git metadata.

use gix::bstr::ByteSlice;
use gix::remote::Direction;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::remote::{RepositoryIdentity, parse_github_url};

/// Remote preferred when several are configured.
const PREFERRED_REMOTE: &str = "origin";

/// Branch used when nothing else can be determined.
const FALLBACK_BRANCH: &str = "main";

/// Remote as configured in the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteEntry {
    name: String,
    fetch_url: Option<String>,
    push_url: Option<String>,
}

impl RemoteEntry {
    /// Creates remote entry from name and configured URLs.
    pub fn new(name: impl Into<String>, fetch_url: Option<String>, push_url: Option<String>) -> Self {
        Self {
            name: name.into(),
            fetch_url,
            push_url,
        }
    }

    /// Remote name, such as `origin`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fetch URL (`remote.<name>.url`).
    pub fn fetch_url(&self) -> Option<&str> {
        self.fetch_url.as_deref()
    }

    /// Push URL (`remote.<name>.pushurl`).
    pub fn push_url(&self) -> Option<&str> {
        self.push_url.as_deref()
    }
}

/// Repository and branch raw URLs are built against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    identity: RepositoryIdentity,
    branch: String,
}

impl Target {
    /// Repository owner and name.
    pub fn identity(&self) -> &RepositoryIdentity {
        &self.identity
    }

    /// Branch name.
    pub fn branch(&self) -> &str {
        &self.branch
    }
}

/// Determines repository and branch for a run.
///
/// `--repo` and `--branch` win when given. Otherwise the repository
/// containing `repo_path` is inspected; it is only opened when something
/// still needs discovering.
///
/// # Arguments
///
/// * `config`: Parsed command line configuration
/// * `repo_path`: Directory inside the repository to inspect
///
/// # Errors
///
/// Returns error if:
/// - `--repo` is malformed
/// - Repository cannot be opened and `--repo` was not given
/// - No remote URL is configured
/// - Remote URL is not a GitHub URL
pub fn resolve_target(config: &Config, repo_path: impl AsRef<Path>) -> Result<Target> {
    let repo_override = config.repo_override()?;

    let repo = if repo_override.is_some() && config.branch.is_some() {
        None
    } else {
        match gix::discover(repo_path.as_ref()) {
            Ok(repo) => Some(repo),
            Err(_) if repo_override.is_some() => None,
            Err(e) => return Err(Error::Repository(e.to_string())),
        }
    };

    let identity = match (repo_override, &repo) {
        (Some(identity), _) => identity,
        (None, Some(repo)) => discover_identity(repo)?,
        (None, None) => return Err(Error::NoRemote),
    };

    let branch = match &config.branch {
        Some(branch) => branch.clone(),
        None => repo
            .as_ref()
            .map_or_else(|| FALLBACK_BRANCH.to_string(), detect_branch),
    };

    Ok(Target { identity, branch })
}

/// Reads the GitHub owner and name from the repository's remotes.
///
/// # Errors
///
/// Returns error if no remote URL is configured or it is not a GitHub URL.
pub fn discover_identity(repo: &gix::Repository) -> Result<RepositoryIdentity> {
    let remotes = list_remotes(repo);
    let url = select_remote_url(&remotes).ok_or(Error::NoRemote)?;

    parse_github_url(url).ok_or_else(|| Error::UnrecognizedRemote(url.to_string()))
}

/// Lists configured remotes with their fetch and push URLs.
///
/// URLs are reported the way git reports them, with
/// `url.<base>.insteadOf` and `pushInsteadOf` rewrites applied. A remote
/// gix cannot load falls back to its raw configured URLs.
pub fn list_remotes(repo: &gix::Repository) -> Vec<RemoteEntry> {
    let config = repo.config_snapshot();
    let configured_url = |name: &str, key: &str| {
        config
            .string(format!("remote.{name}.{key}").as_str())
            .map(|value| value.to_str_lossy().trim().to_string())
            .filter(|value| !value.is_empty())
    };

    repo.remote_names()
        .iter()
        .map(|name| {
            let label = name.to_str_lossy();
            match repo.find_remote(&**name) {
                Ok(remote) => RemoteEntry::new(
                    &*label,
                    rewritten_url(&remote, Direction::Fetch),
                    rewritten_url(&remote, Direction::Push),
                ),
                Err(_) => RemoteEntry::new(
                    &*label,
                    configured_url(&label, "url"),
                    configured_url(&label, "pushurl"),
                ),
            }
        })
        .collect()
}

fn rewritten_url(remote: &gix::Remote<'_>, direction: Direction) -> Option<String> {
    let url = remote.url(direction)?.to_bstring();
    let url = url.to_str_lossy().trim().to_string();
    (!url.is_empty()).then_some(url)
}

/// Picks the remote URL to derive the repository from.
///
/// Prefers `origin` over other remotes and fetch URLs over push URLs. When
/// `origin` has no URL, the first remote with a fetch URL is used, then the
/// first with any URL.
pub fn select_remote_url(remotes: &[RemoteEntry]) -> Option<&str> {
    let origin = remotes.iter().find(|r| r.name == PREFERRED_REMOTE);

    origin
        .and_then(RemoteEntry::fetch_url)
        .or_else(|| remotes.iter().find_map(RemoteEntry::fetch_url))
        .or_else(|| origin.and_then(RemoteEntry::push_url))
        .or_else(|| remotes.iter().find_map(RemoteEntry::push_url))
}

/// Detects branch for raw URLs; never fails.
///
/// Tries the checked out branch, then the default branch of `origin`
/// (recorded locally, else asked of the remote), then falls back to `main`.
pub fn detect_branch(repo: &gix::Repository) -> String {
    choose_branch(current_branch(repo), || {
        origin_default_branch(repo).or_else(|| remote_default_branch(repo))
    })
}

/// Checked out branch name, or `None` when HEAD is detached.
pub fn current_branch(repo: &gix::Repository) -> Option<String> {
    let head = repo.head_name().ok()??;
    let name = head.shorten().to_str().ok()?;
    Some(name.to_string())
}

/// Default branch of `origin` as recorded by `refs/remotes/origin/HEAD`.
///
/// The ref is written by `git clone` and `git remote set-head`; it is read
/// locally without contacting the remote.
pub fn origin_default_branch(repo: &gix::Repository) -> Option<String> {
    let reference = repo
        .find_reference(format!("refs/remotes/{PREFERRED_REMOTE}/HEAD").as_str())
        .ok()?;
    let target = reference.target().try_name()?.shorten().to_str().ok()?.to_string();

    target
        .strip_prefix(&format!("{PREFERRED_REMOTE}/"))
        .map(String::from)
}

/// Default branch `origin` reports for its `HEAD`.
///
/// Runs `git ls-remote --symref origin HEAD`, which may contact the remote.
/// Any failure (git missing, no network, auth prompt) yields `None`.
pub fn remote_default_branch(repo: &gix::Repository) -> Option<String> {
    let output = Command::new("git")
        .arg("--git-dir")
        .arg(repo.path())
        .args(["ls-remote", "--symref", PREFERRED_REMOTE, "HEAD"])
        .env("GIT_TERMINAL_PROMPT", "0")
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    parse_symref_head(&String::from_utf8_lossy(&output.stdout))
}

/// Extracts the branch from `ref: refs/heads/<branch>\tHEAD` output.
fn parse_symref_head(ls_remote: &str) -> Option<String> {
    ls_remote.lines().find_map(|line| {
        let (target, name) = line.strip_prefix("ref: ")?.split_once('\t')?;
        if name.trim() != "HEAD" {
            return None;
        }
        target
            .strip_prefix("refs/heads/")
            .filter(|branch| !branch.is_empty())
            .map(String::from)
    })
}

fn choose_branch(
    current: Option<String>,
    origin_default: impl FnOnce() -> Option<String>,
) -> String {
    let usable = |branch: &String| !branch.is_empty() && branch != "HEAD";

    current
        .filter(usable)
        .or_else(|| origin_default().filter(usable))
        .unwrap_or_else(|| FALLBACK_BRANCH.to_string())
}

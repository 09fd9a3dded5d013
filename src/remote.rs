//! GitHub remote URL parsing.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static SSH_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^git@github\.com:([^/]+)/(.+?)(?:\.git)?$").expect("valid SSH remote pattern")
});

static HTTPS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://github\.com/([^/]+)/(.+?)(?:\.git)?$")
        .expect("valid HTTPS remote pattern")
});

/// GitHub repository owner and name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryIdentity {
    owner: String,
    name: String,
}

impl RepositoryIdentity {
    /// Creates identity from owner and repository name.
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Account or organization owning the repository.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Repository name without `.git` suffix.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for RepositoryIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Extracts owner and repository name from a GitHub remote URL.
///
/// Accepts the SSH form `git@github.com:owner/repo[.git]` and the
/// HTTP(S) form `https://github.com/owner/repo[.git]`. Patterns are
/// anchored at both ends, so other hosts and trailing garbage yield `None`.
///
/// # Examples
///
/// ```
/// use rawify::parse_github_url;
///
/// let identity = parse_github_url("git@github.com:acme/widget.git").unwrap();
/// assert_eq!(identity.owner(), "acme");
/// assert_eq!(identity.name(), "widget");
///
/// assert!(parse_github_url("https://gitlab.com/acme/widget").is_none());
/// ```
pub fn parse_github_url(remote_url: &str) -> Option<RepositoryIdentity> {
    [&*SSH_PATTERN, &*HTTPS_PATTERN].iter().find_map(|pattern| {
        let caps = pattern.captures(remote_url)?;
        Some(RepositoryIdentity::new(&caps[1], &caps[2]))
    })
}

//! Raw content URL construction for repository files.

use crate::remote::RepositoryIdentity;

/// Host serving literal file bytes for GitHub repositories.
const RAW_CONTENT_HOST: &str = "https://raw.githubusercontent.com";

/// Builds raw content URLs for files at a fixed repository and branch.
///
/// Transforms repository relative paths (./img/logo.png, docs/a b.svg)
/// into URLs such as
/// `https://raw.githubusercontent.com/owner/repo/main/img/logo.png`.
#[derive(Debug, Clone)]
pub struct RawUrlBuilder {
    base: String,
}

impl RawUrlBuilder {
    /// Creates builder for repository and branch.
    ///
    /// Owner, name and branch are inserted verbatim without encoding.
    ///
    /// # Arguments
    ///
    /// * `identity`: Repository owner and name
    /// * `branch`: Branch used as the URL ref segment
    pub fn new(identity: &RepositoryIdentity, branch: &str) -> Self {
        Self {
            base: format!(
                "{}/{}/{}/{}",
                RAW_CONTENT_HOST,
                identity.owner(),
                identity.name(),
                branch
            ),
        }
    }

    /// URL prefix shared by every built link, without trailing slash.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Resolves local path to its raw content URL.
    ///
    /// Removes one leading `./`, then percent encodes every `/` separated
    /// segment on its own. No further normalization is applied, so `../`
    /// segments are kept as written.
    ///
    /// # Arguments
    ///
    /// * `local_path`: Path as written in the document
    ///
    /// # Returns
    ///
    /// Absolute raw content URL
    pub fn resolve(&self, local_path: &str) -> String {
        let clean_path = local_path.strip_prefix("./").unwrap_or(local_path);
        format!("{}/{}", self.base, encode_path(clean_path))
    }
}

/// Percent encodes each segment of `path`, keeping `/` as separator.
pub fn encode_path(path: &str) -> String {
    path.split('/')
        .map(encode_segment)
        .collect::<Vec<_>>()
        .join("/")
}

/// Percent encodes everything except RFC 3986 unreserved bytes.
fn encode_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for b in segment.bytes() {
        if b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.' | b'~') {
            out.push(char::from(b));
        } else {
            out.push_str(&format!("%{:02X}", b));
        }
    }
    out
}

//! Rewrites local README image paths into raw GitHub content URLs.

mod config;
mod error;
mod filetype;
mod git;
mod markdown;
mod remote;

pub use config::{Config, parse_repo_override};
pub use error::{Error, Result};
pub use filetype::{ImageFormat, is_image_file, is_local_path, qualifies};
pub use git::{
    RemoteEntry, Target, current_branch, detect_branch, discover_identity, list_remotes,
    origin_default_branch, remote_default_branch, resolve_target, select_remote_url,
};
pub use markdown::{
    ImageReference, ImageSyntax, RawUrlBuilder, Rewritten, encode_path, image_references,
    rewrite, rewrite_document,
};
pub use remote::{RepositoryIdentity, parse_github_url};

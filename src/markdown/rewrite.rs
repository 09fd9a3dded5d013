//! Image reference rewriting for Markdown and inline HTML.

use regex::{Captures, Regex};
use std::sync::LazyLock;

use super::RawUrlBuilder;
use crate::filetype::qualifies;
use crate::remote::RepositoryIdentity;

/// `![alt](path "title")`: prefix, path, then optional title and `)`.
static MARKDOWN_IMAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(!\[[^\]]*\]\()([^)\s"]+)([^)]*\))"#).expect("valid markdown image pattern")
});

/// `<img ... src="path" ...>` with either quote style, tag and attribute
/// matched case-insensitively.
static HTML_IMAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(<img\s+[^>]*src=["'])([^"']+)(["'][^>]*>)"#)
        .expect("valid html image pattern")
});

/// Syntax an image reference was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSyntax {
    /// `![alt](path)` with optional title
    Markdown,
    /// `<img src="path">`
    Html,
}

impl ImageSyntax {
    /// Passes in the order they are applied.
    pub const ALL: [Self; 2] = [Self::Markdown, Self::Html];

    fn pattern(self) -> &'static Regex {
        match self {
            Self::Markdown => &MARKDOWN_IMAGE,
            Self::Html => &HTML_IMAGE,
        }
    }
}

/// Image reference located in a document.
///
/// `prefix`, `path` and `suffix` concatenate to `full_match`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageReference<'a> {
    pub syntax: ImageSyntax,
    /// Byte offset of `full_match` in the scanned text.
    pub start: usize,
    pub full_match: &'a str,
    pub prefix: &'a str,
    pub path: &'a str,
    pub suffix: &'a str,
}

impl<'a> ImageReference<'a> {
    fn from_captures(caps: &Captures<'a>, syntax: ImageSyntax) -> Self {
        let group = |i| caps.get(i).map_or("", |m| m.as_str());
        Self {
            syntax,
            start: caps.get(0).map_or(0, |m| m.start()),
            full_match: group(0),
            prefix: group(1),
            path: group(2),
            suffix: group(3),
        }
    }

    /// Returns true when the path will be replaced by a raw URL.
    pub fn is_rewritable(&self) -> bool {
        qualifies(self.path)
    }
}

/// Finds every image reference of one syntax, left to right.
pub fn image_references(document: &str, syntax: ImageSyntax) -> Vec<ImageReference<'_>> {
    syntax
        .pattern()
        .captures_iter(document)
        .map(|caps| ImageReference::from_captures(&caps, syntax))
        .collect()
}

/// Result of rewriting a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewritten {
    text: String,
    rewritten: usize,
}

impl Rewritten {
    /// Transformed document text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Consumes result, returning the transformed text.
    pub fn into_text(self) -> String {
        self.text
    }

    /// Number of references whose path was replaced.
    pub fn rewritten(&self) -> usize {
        self.rewritten
    }
}

/// Rewrites local image paths to raw content URLs.
///
/// Runs the Markdown pass, then the HTML pass over its output. Within each
/// pass matches are non-overlapping and replaced once. References that are
/// not local or not images are left byte for byte as they were, so running
/// the rewrite on its own output changes nothing.
///
/// # Arguments
///
/// * `document`: Document text
/// * `identity`: Repository the raw URLs point to
/// * `branch`: Branch used in the raw URLs
pub fn rewrite(document: &str, identity: &RepositoryIdentity, branch: &str) -> Rewritten {
    let builder = RawUrlBuilder::new(identity, branch);
    let mut rewritten = 0;

    let text = ImageSyntax::ALL
        .iter()
        .fold(document.to_string(), |text, &syntax| {
            rewrite_pass(&text, syntax, &builder, &mut rewritten)
        });

    Rewritten { text, rewritten }
}

/// Rewrites `document` and returns only the new text.
///
/// # Examples
///
/// ```
/// use rawify::{RepositoryIdentity, rewrite_document};
///
/// let identity = RepositoryIdentity::new("acme", "widget");
/// let out = rewrite_document(r#"![logo](./img/logo.png "Logo")"#, &identity, "main");
/// assert_eq!(
///     out,
///     r#"![logo](https://raw.githubusercontent.com/acme/widget/main/img/logo.png "Logo")"#
/// );
/// ```
pub fn rewrite_document(document: &str, identity: &RepositoryIdentity, branch: &str) -> String {
    rewrite(document, identity, branch).into_text()
}

fn rewrite_pass(
    text: &str,
    syntax: ImageSyntax,
    builder: &RawUrlBuilder,
    rewritten: &mut usize,
) -> String {
    syntax
        .pattern()
        .replace_all(text, |caps: &Captures<'_>| {
            let reference = ImageReference::from_captures(caps, syntax);
            if !reference.is_rewritable() {
                return reference.full_match.to_string();
            }

            *rewritten += 1;
            format!(
                "{}{}{}",
                reference.prefix,
                builder.resolve(reference.path),
                reference.suffix
            )
        })
        .into_owned()
}

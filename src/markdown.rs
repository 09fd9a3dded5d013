//! README image rewriting.
//!
//! This module scans Markdown image syntax and inline HTML `<img>` tags and
//! points local image paths at raw GitHub content, so the document renders
//! on sites that cannot resolve repository relative paths.

mod links;
mod rewrite;

pub use links::{RawUrlBuilder, encode_path};
pub use rewrite::{
    ImageReference, ImageSyntax, Rewritten, image_references, rewrite, rewrite_document,
};

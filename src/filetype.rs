//! Path classification for image references.
//!
//! Decides whether a referenced path points into the repository and
//! whether it names an image file. Only paths passing both checks get
//! rewritten.

use std::path::Path;

/// Prefixes marking a path as already absolute or inline.
const NON_LOCAL_PREFIXES: [&str; 4] = ["http://", "https://", "//", "data:"];

/// Image formats eligible for rewriting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// Portable Network Graphics
    Png,
    /// JPEG, either `.jpg` or `.jpeg`
    Jpeg,
    /// Graphics Interchange Format
    Gif,
    /// Scalable Vector Graphics
    Svg,
    /// WebP
    Webp,
    /// Bitmap image
    Bmp,
    /// Icon format
    Ico,
}

impl ImageFormat {
    /// Detects image format from the final extension of `path`.
    ///
    /// Extension matching is case-insensitive. Query strings and fragments
    /// are not stripped, so `logo.png?v=2` has extension `png?v=2` and is
    /// not recognized.
    pub fn from_path(path: &str) -> Option<Self> {
        let ext = Path::new(path).extension()?.to_str()?.to_lowercase();

        match ext.as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "gif" => Some(Self::Gif),
            "svg" => Some(Self::Svg),
            "webp" => Some(Self::Webp),
            "bmp" => Some(Self::Bmp),
            "ico" => Some(Self::Ico),
            _ => None,
        }
    }
}

/// Returns true when `path` refers to a file in the repository.
///
/// URLs (`http://`, `https://`, protocol-relative `//`), `data:` URIs and
/// in-document anchors (`#section`) are not local.
pub fn is_local_path(path: &str) -> bool {
    if NON_LOCAL_PREFIXES
        .iter()
        .any(|prefix| path.starts_with(prefix))
    {
        return false;
    }

    !path.starts_with('#')
}

/// Returns true when `path` has a recognized image extension.
pub fn is_image_file(path: &str) -> bool {
    ImageFormat::from_path(path).is_some()
}

/// Returns true when `path` should be rewritten to a raw URL.
pub fn qualifies(path: &str) -> bool {
    is_local_path(path) && is_image_file(path)
}

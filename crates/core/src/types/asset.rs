//! Image asset references for product listings.
//!
//! A listing's image list mixes images that already live on the asset host
//! (edit mode, untouched) with images the merchant just picked from disk.
//! Both kinds share one positional list; the tagged [`AssetRef`] union keeps
//! the "never re-upload a remote image" rule in the type system instead of a
//! runtime check.

use std::fmt;

/// Maximum accepted size for a local image, in bytes.
pub const MAX_ASSET_BYTES: usize = 512_000;

/// Maximum number of images on a single product listing.
pub const MAX_PRODUCT_IMAGES: usize = 5;

/// A local image that has not been uploaded yet.
#[derive(Clone, PartialEq, Eq)]
pub struct LocalAsset {
    /// Original filename, used for the upload form and error messages.
    pub filename: String,
    /// MIME type (e.g., "image/jpeg").
    pub mime_type: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl LocalAsset {
    /// Whether this file exceeds [`MAX_ASSET_BYTES`].
    #[must_use]
    pub fn oversized(&self) -> bool {
        self.bytes.len() > MAX_ASSET_BYTES
    }
}

impl fmt::Debug for LocalAsset {
    // Elide the byte payload; image contents are noise in logs.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalAsset")
            .field("filename", &self.filename)
            .field("mime_type", &self.mime_type)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

/// One slot in a positional image list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetRef {
    /// Picked from disk, not yet uploaded.
    Local(LocalAsset),
    /// Already hosted; passed through untouched at submit time.
    Remote(String),
}

impl AssetRef {
    /// The remote URL, if this slot is already uploaded.
    #[must_use]
    pub fn as_remote(&self) -> Option<&str> {
        match self {
            Self::Remote(url) => Some(url),
            Self::Local(_) => None,
        }
    }

    /// Whether this slot still needs an upload.
    #[must_use]
    pub const fn needs_upload(&self) -> bool {
        matches!(self, Self::Local(_))
    }
}

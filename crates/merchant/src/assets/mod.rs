//! Asset upload coordination.
//!
//! Turns a positional list of mixed local/remote image references into a
//! same-length, same-order list of remote URLs, uploading only what needs
//! uploading.

mod coordinator;
mod host;

pub use coordinator::{resolve, resolve_optional};
pub use host::{AssetError, AssetHost, HttpAssetHost};

//! Unified error handling for the merchant pipeline.

use thiserror::Error;

use crate::api::ApiError;
use crate::assets::AssetError;
use crate::config::ConfigError;
use crate::session::SessionError;
use crate::variant::MatrixError;
use crate::wire::{ComposeError, ReconstructError};

/// Top-level error type for pipeline entry points.
///
/// Nothing here is fatal to the process; every failure is scoped to the
/// current edit session, whose state stays intact for a retry.
#[derive(Debug, Error)]
pub enum MerchantError {
    /// Configuration loading failed.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// An image upload failed or was rejected.
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    /// The Product API rejected a request or was unreachable.
    #[error("Product API error: {0}")]
    Api(#[from] ApiError),

    /// The editing state could not be serialized into a payload.
    #[error("Compose error: {0}")]
    Compose(#[from] ComposeError),

    /// A saved product could not be rehydrated.
    #[error("Reconstruct error: {0}")]
    Reconstruct(#[from] ReconstructError),

    /// An image-list edit was rejected.
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// A matrix edit was rejected.
    #[error("Variant error: {0}")]
    Matrix(#[from] MatrixError),
}

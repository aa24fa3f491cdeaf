//! Core types for Copperpot.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod asset;
pub mod bounds;
pub mod id;

pub use asset::{AssetRef, LocalAsset, MAX_ASSET_BYTES, MAX_PRODUCT_IMAGES};
pub use bounds::{BoundsViolation, NumericField, clamp_edit, validate};
pub use id::*;

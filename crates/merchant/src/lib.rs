//! Copperpot Merchant - listing creation and editing pipeline.
//!
//! This crate implements the merchant console's product composition pipeline:
//! the variant matrix a merchant edits, the image upload coordination at
//! submit time, and the translation between the in-memory editing session and
//! the wire payload the Product API expects.
//!
//! # Modules
//!
//! - [`session`] - The owned editing state for one open listing form
//! - [`variant`] - Variant dimensions, types, and the combination matrix
//! - [`assets`] - Upload coordination for mixed local/remote image lists
//! - [`wire`] - Wire payload types, the composer, and the reconstructor
//! - [`api`] - Product API client (create/update/fetch)
//! - [`config`] - Environment configuration
//!
//! # Data flow
//!
//! Edit mode starts with [`wire::reconstruct`] rehydrating a saved product
//! into an [`session::EditingState`]. The merchant then mutates the state
//! through [`variant::VariantMatrix`] operations, and [`submit`] resolves
//! pending image uploads, composes the payload, and hands it to the Product
//! API.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod assets;
pub mod config;
pub mod error;
pub mod session;
pub mod submit;
pub mod variant;
pub mod wire;

pub use error::MerchantError;
pub use submit::submit;

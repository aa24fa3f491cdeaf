//! Copperpot Core - Shared types library.
//!
//! This crate provides common types used across all Copperpot components:
//! - `merchant` - Merchant console pipeline (listing creation and editing)
//! - `cli` - Command-line tools for validating and publishing listings
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, asset references, and numeric field bounds

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;

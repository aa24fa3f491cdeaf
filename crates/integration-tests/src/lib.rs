//! Integration tests for the Copperpot listing pipeline.
//!
//! The test files under `tests/` exercise the pipeline end to end: editing
//! session to submit gate, upload coordination, payload composition, and the
//! reconstruction of saved listings back into editable state.
//!
//! This crate's library is test support only: [`MockAssetHost`] stands in for
//! the external asset host with controlled latency and failure, so the tests
//! can drive the coordinator without a network.

#![cfg_attr(not(test), forbid(unsafe_code))]
// Test support; unwrapping a poisoned mutex is acceptable here.
#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use copperpot_core::{AssetRef, LocalAsset};
use copperpot_merchant::assets::{AssetError, AssetHost};

/// Asset host double with per-file latency and failure injection.
///
/// Records the order uploads *complete* in, so tests can assert that the
/// resolved list's slot order is independent of completion order.
#[derive(Debug, Default)]
pub struct MockAssetHost {
    delays: HashMap<String, Duration>,
    failures: HashSet<String>,
    completed: Mutex<Vec<String>>,
}

impl MockAssetHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay the named file's upload by `millis`.
    #[must_use]
    pub fn with_delay(mut self, filename: &str, millis: u64) -> Self {
        self.delays
            .insert(filename.to_string(), Duration::from_millis(millis));
        self
    }

    /// Make the named file's upload fail with a server error.
    #[must_use]
    pub fn with_failure(mut self, filename: &str) -> Self {
        self.failures.insert(filename.to_string());
        self
    }

    /// Filenames in the order their uploads settled.
    pub fn completion_order(&self) -> Vec<String> {
        self.completed.lock().unwrap().clone()
    }
}

#[async_trait]
impl AssetHost for MockAssetHost {
    async fn upload(&self, asset: &LocalAsset) -> Result<String, AssetError> {
        if let Some(delay) = self.delays.get(&asset.filename) {
            tokio::time::sleep(*delay).await;
        }
        self.completed.lock().unwrap().push(asset.filename.clone());
        if self.failures.contains(&asset.filename) {
            return Err(AssetError::Rejected {
                status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                message: format!("injected failure for {}", asset.filename),
            });
        }
        Ok(hosted_url(&asset.filename))
    }
}

/// The URL [`MockAssetHost`] hands back for an uploaded file.
#[must_use]
pub fn hosted_url(filename: &str) -> String {
    format!("https://cdn.copperpot.test/{filename}")
}

/// A small local asset with the given name.
#[must_use]
pub fn local_asset(filename: &str) -> AssetRef {
    AssetRef::Local(LocalAsset {
        filename: filename.to_string(),
        mime_type: "image/jpeg".to_string(),
        bytes: vec![0u8; 64],
    })
}

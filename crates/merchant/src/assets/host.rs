//! The external asset host and its HTTP implementation.

use async_trait::async_trait;
use copperpot_core::{LocalAsset, MAX_ASSET_BYTES};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use thiserror::Error;
use tracing::instrument;
use url::Url;

/// Upload failures.
#[derive(Debug, Error)]
pub enum AssetError {
    /// The file was rejected locally, before any bytes moved.
    #[error("{filename} is {size} bytes, over the {MAX_ASSET_BYTES}-byte limit")]
    Oversized { filename: String, size: usize },

    /// The request never completed.
    #[error("asset host request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The asset host answered with a non-success status.
    #[error("asset host rejected upload ({status}): {message}")]
    Rejected {
        status: reqwest::StatusCode,
        message: String,
    },
}

/// External asset host contract: binary in, opaque stable URL out.
#[async_trait]
pub trait AssetHost: Send + Sync {
    /// Upload one local file and return its hosted URL.
    ///
    /// # Errors
    ///
    /// Returns an [`AssetError`] if the upload fails; the coordinator treats
    /// any slot failure as failing the whole batch.
    async fn upload(&self, asset: &LocalAsset) -> Result<String, AssetError>;
}

/// Successful upload response body.
#[derive(Debug, Deserialize)]
struct UploadResponse {
    url: String,
}

/// Asset host client posting multipart uploads to a single endpoint.
#[derive(Debug, Clone)]
pub struct HttpAssetHost {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpAssetHost {
    /// Create a client for the given upload endpoint.
    #[must_use]
    pub fn new(endpoint: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }
}

#[async_trait]
impl AssetHost for HttpAssetHost {
    #[instrument(skip(self, asset), fields(filename = %asset.filename, size = asset.bytes.len()))]
    async fn upload(&self, asset: &LocalAsset) -> Result<String, AssetError> {
        let part = Part::bytes(asset.bytes.clone())
            .file_name(asset.filename.clone())
            .mime_str(&asset.mime_type)?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AssetError::Rejected { status, message });
        }

        let body: UploadResponse = response.json().await?;
        Ok(body.url)
    }
}

//! Product API client.
//!
//! Thin reqwest client for the three operations this pipeline consumes:
//! create, update, and fetch. No retries; a failed request surfaces its
//! error and leaves the caller's editing state intact for resubmission.

use copperpot_core::ProductId;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;
use tracing::instrument;
use url::Url;

use crate::config::MerchantConfig;
use crate::wire::{SavedProduct, WirePayload};

/// Product API failures.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never completed.
    #[error("product API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("product API returned {status}: {message}")]
    Status {
        status: reqwest::StatusCode,
        message: String,
    },

    /// A path could not be joined onto the configured base URL.
    #[error("invalid product API URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Response body of a successful create.
#[derive(Debug, Deserialize)]
struct CreateResponse {
    id: ProductId,
}

/// Client for the marketplace Product API.
#[derive(Debug, Clone)]
pub struct ProductApi {
    client: reqwest::Client,
    base_url: Url,
    token: SecretString,
}

impl ProductApi {
    /// Build a client from the merchant configuration.
    #[must_use]
    pub fn new(config: &MerchantConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.api_base_url.clone(),
            token: config.api_token.clone(),
        }
    }

    /// Create a new product listing.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API rejects the payload.
    #[instrument(skip(self, payload), fields(name = %payload.name))]
    pub async fn create_product(&self, payload: &WirePayload) -> Result<ProductId, ApiError> {
        let url = self.base_url.join("products")?;
        let response = self
            .client
            .post(url)
            .bearer_auth(self.token.expose_secret())
            .json(payload)
            .send()
            .await?;
        let response = check_status(response).await?;
        let body: CreateResponse = response.json().await?;
        Ok(body.id)
    }

    /// Update an existing product listing in place.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API rejects the payload.
    #[instrument(skip(self, payload), fields(product_id = %id))]
    pub async fn update_product(
        &self,
        id: ProductId,
        payload: &WirePayload,
    ) -> Result<(), ApiError> {
        let url = self.base_url.join(&format!("products/{id}"))?;
        let response = self
            .client
            .put(url)
            .bearer_auth(self.token.expose_secret())
            .json(payload)
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }

    /// Fetch a saved product for editing.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the product does not exist.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn fetch_product(&self, id: ProductId) -> Result<SavedProduct, ApiError> {
        let url = self.base_url.join(&format!("products/{id}"))?;
        let response = self
            .client
            .get(url)
            .bearer_auth(self.token.expose_secret())
            .send()
            .await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(ApiError::Status { status, message })
}

//! Submit orchestration: resolve uploads, compose, send.

use copperpot_core::{AssetRef, ProductId};
use tracing::{info, instrument};

use crate::api::ProductApi;
use crate::assets::{self, AssetHost};
use crate::error::MerchantError;
use crate::session::EditingState;
use crate::wire::{ResolvedAssets, compose};

/// Submit the editing state: upload pending images, compose the payload, and
/// create or update the listing.
///
/// This is the pipeline's single join point: submission suspends until every
/// upload in the batch has settled, then proceeds synchronously. In-flight
/// uploads are not cancelled if the caller abandons the future, and nothing
/// is retried; on any failure the editing state is untouched and the
/// merchant can resubmit.
///
/// # Errors
///
/// Returns a [`MerchantError`] from the first failing stage.
#[instrument(skip_all, fields(product_id = ?state.product_id, mode = ?state.matrix.mode()))]
pub async fn submit(
    state: &EditingState,
    host: &dyn AssetHost,
    api: &ProductApi,
) -> Result<ProductId, MerchantError> {
    let product_images = assets::resolve(host, &state.images).await?;

    let type_images: Vec<Option<AssetRef>> = state
        .matrix
        .parent()
        .map(|p| p.types.iter().map(|t| t.image.clone()).collect())
        .unwrap_or_default();
    let parent_type_images = assets::resolve_optional(host, &type_images).await?;

    let payload = compose(
        state,
        &ResolvedAssets {
            product_images,
            parent_type_images,
        },
    )?;

    match state.product_id {
        Some(id) => {
            api.update_product(id, &payload).await?;
            info!(product_id = %id, "listing updated");
            Ok(id)
        }
        None => {
            let id = api.create_product(&payload).await?;
            info!(product_id = %id, "listing created");
            Ok(id)
        }
    }
}

//! Fetch a saved listing and show its reconstructed editing state.

use std::error::Error;

use copperpot_core::ProductId;
use copperpot_merchant::api::ProductApi;
use copperpot_merchant::config::MerchantConfig;
use copperpot_merchant::wire::reconstruct;
use tracing::info;

/// Fetch and reconstruct one listing, logging a summary.
///
/// # Errors
///
/// Returns an error if the fetch fails or the saved record is malformed.
pub async fn run(id: i64) -> Result<(), Box<dyn Error>> {
    let config = MerchantConfig::from_env()?;
    let api = ProductApi::new(&config);

    let saved = api.fetch_product(ProductId::new(id)).await?;
    let state = reconstruct(&saved)?;

    info!(
        product_id = %saved.id,
        name = %state.fields.name,
        mode = ?state.matrix.mode(),
        images = state.images.len(),
        rows = state.matrix.combinations().len(),
        "reconstructed listing"
    );
    if let Some(parent) = state.matrix.parent() {
        info!(group = %parent.group_label, types = parent.types.len(), "parent dimension");
    }
    if let Some(child) = state.matrix.child() {
        info!(group = %child.group_label, types = child.types.len(), "child dimension");
    }
    Ok(())
}

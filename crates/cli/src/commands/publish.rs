//! Publish a draft through the full pipeline.

use std::error::Error;
use std::path::Path;

use copperpot_merchant::api::ProductApi;
use copperpot_merchant::assets::HttpAssetHost;
use copperpot_merchant::config::MerchantConfig;
use copperpot_merchant::submit;
use tracing::{info, warn};

use super::draft;

/// Upload the draft's images and create the listing.
///
/// # Errors
///
/// Returns an error if the draft fails the submit gate or any pipeline stage
/// fails; nothing is partially committed.
pub async fn run(path: &Path) -> Result<(), Box<dyn Error>> {
    let config = MerchantConfig::from_env()?;

    let draft = draft::load(path)?;
    let state = draft::build_state(&draft)?;

    let blockers = state.submit_blockers();
    if !blockers.is_empty() {
        for blocker in &blockers {
            warn!(?blocker, "submit blocker");
        }
        return Err(format!("draft has {} submit blocker(s)", blockers.len()).into());
    }

    let host = HttpAssetHost::new(config.asset_host_url.clone());
    let api = ProductApi::new(&config);

    let product_id = submit(&state, &host, &api).await?;
    info!(%product_id, "listing published");
    Ok(())
}

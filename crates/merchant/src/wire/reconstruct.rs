//! Rehydrate a saved product into an editing session.
//!
//! The inverse of the composer: classifies the saved record into one of the
//! three listing shapes via the `"DEFAULT"` sentinel, then seeds the matrix
//! and asset lists from it. This is the one place the combination list is
//! trusted from storage instead of recomputed: the saved rows are consistent
//! by construction and carry backend IDs a recompute would discard.

use copperpot_core::{AssetRef, LocalKey};
use thiserror::Error;
use tracing::debug;

use crate::session::EditingState;
use crate::variant::{Combination, VariantDimension, VariantMatrix, VariantType};

use super::{DEFAULT_VARIANT, SavedProduct, WireDimension};

/// Saved records the reconstructor refuses to rehydrate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconstructError {
    /// The saved product has no combinations at all.
    #[error("saved product {0} has no combinations")]
    NoCombinations(i64),
    /// A no-variant product must have exactly one sentinel combination.
    #[error("saved no-variant product {id} has {count} combinations")]
    MalformedSentinel { id: i64, count: usize },
}

/// Rebuild the editing state for a previously saved product.
///
/// Backend IDs for the product, groups, types, and combinations are carried
/// forward so a subsequent submit updates rows in place.
///
/// # Errors
///
/// See [`ReconstructError`].
pub fn reconstruct(saved: &SavedProduct) -> Result<EditingState, ReconstructError> {
    if saved.product.variant.combinations.is_empty() {
        return Err(ReconstructError::NoCombinations(saved.id.as_i64()));
    }

    let mut state = EditingState::new();
    state.product_id = Some(saved.id);
    state.fields.name = saved.product.name.clone();
    state.fields.description = saved.product.description.clone();
    state.fields.category.lv1 = saved.product.category_lv1_id.clone();
    state.fields.category.lv2 = saved.product.category_lv2_id.clone();
    state.fields.category.lv3 = saved.product.category_lv3_id.clone();
    state.fields.weight = number_or_blank(saved.product.weight);
    state.fields.length = number_or_blank(saved.product.length);
    state.fields.width = number_or_blank(saved.product.width);
    state.fields.height = number_or_blank(saved.product.height);
    state.images = saved
        .product
        .images
        .iter()
        .map(|url| AssetRef::Remote(url.clone()))
        .collect();

    if is_sentinel(saved) {
        // No-variant listing: price/stock live on the product-level fields,
        // and the sentinel rows' IDs are kept for update targeting.
        let count = saved.product.variant.combinations.len();
        let combination =
            saved
                .product
                .variant
                .combinations
                .first()
                .ok_or(ReconstructError::MalformedSentinel {
                    id: saved.id.as_i64(),
                    count: 0,
                })?;
        if count != 1 {
            return Err(ReconstructError::MalformedSentinel {
                id: saved.id.as_i64(),
                count,
            });
        }
        state.fields.price = combination.price.to_string();
        state.fields.stock = combination.stock.to_string();
        state.sentinel_ids.parent_group = saved.product.variant.parent.id;
        state.sentinel_ids.parent_type =
            saved.product.variant.parent.types.first().and_then(|t| t.id);
        state.sentinel_ids.combination = combination.id;
        debug!(product_id = %saved.id, "reconstructed no-variant listing");
        return Ok(state);
    }

    let parent = dimension_from_wire(&saved.product.variant.parent, true);
    let child = saved
        .product
        .variant
        .child
        .as_ref()
        .map(|d| dimension_from_wire(d, false));

    let combinations: Vec<Combination> = saved
        .product
        .variant
        .combinations
        .iter()
        .map(|c| Combination {
            parent_label: c.parent_type.name.clone(),
            child_label: c.child_type.as_ref().map(|t| t.name.clone()),
            price: c.price.to_string(),
            stock: c.stock.to_string(),
            sku: String::new(),
            backend_id: c.id,
        })
        .collect();

    debug!(
        product_id = %saved.id,
        parent_types = parent.types.len(),
        child_types = child.as_ref().map_or(0, |c| c.types.len()),
        rows = combinations.len(),
        "reconstructed variant listing"
    );
    state.matrix = VariantMatrix::from_parts(Some(parent), child, combinations);
    Ok(state)
}

/// No-variant iff the parent group and its single type are both the sentinel
/// and no child structure exists.
fn is_sentinel(saved: &SavedProduct) -> bool {
    let parent = &saved.product.variant.parent;
    saved.product.variant.child.is_none()
        && parent.group == DEFAULT_VARIANT
        && parent.types.len() == 1
        && parent.types.first().is_some_and(|t| t.name == DEFAULT_VARIANT)
}

fn dimension_from_wire(wire: &WireDimension, keep_images: bool) -> VariantDimension {
    VariantDimension {
        group_label: wire.group.clone(),
        backend_id: wire.id,
        types: wire
            .types
            .iter()
            .map(|t| VariantType {
                local_key: LocalKey::fresh(),
                label: t.name.clone(),
                backend_id: t.id,
                image: if keep_images {
                    t.image.clone().map(AssetRef::Remote)
                } else {
                    None
                },
            })
            .collect(),
    }
}

fn number_or_blank(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

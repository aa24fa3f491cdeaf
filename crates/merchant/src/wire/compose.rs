//! Build the wire payload from the current editing state.
//!
//! One function handles all three listing shapes; the mode is read off the
//! matrix so the create and edit flows cannot drift apart.

use copperpot_core::{BoundsViolation, NumericField, validate};
use thiserror::Error;

use crate::session::EditingState;
use crate::variant::{VariantDimension, VariantMode};

use super::{DEFAULT_VARIANT, WireCombination, WireDimension, WirePayload, WireType, WireVariant};

/// Remote URLs produced by the asset coordinator, in slot order.
#[derive(Debug, Clone, Default)]
pub struct ResolvedAssets {
    /// Product image URLs; index 0 is the main image.
    pub product_images: Vec<String>,
    /// Parent-type image URLs, parallel to the parent type list; `None` for
    /// types without an image.
    pub parent_type_images: Vec<Option<String>>,
}

/// Why a payload could not be composed.
///
/// The submit gate normally prevents these; the composer re-validates so a
/// payload can never carry out-of-bounds values regardless of caller
/// discipline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComposeError {
    /// A product-level numeric field failed validation.
    #[error("product {field:?} is invalid: {reason}")]
    InvalidField {
        field: NumericField,
        reason: BoundsViolation,
    },
    /// A combination row failed price or stock validation.
    #[error("combination row {index} has invalid {field:?}: {reason}")]
    InvalidRow {
        index: usize,
        field: NumericField,
        reason: BoundsViolation,
    },
    /// No product images resolved; a listing needs at least one.
    #[error("a listing needs at least one image")]
    NoImages,
    /// The parent dimension is active but has no types.
    #[error("the variant dimension has no types")]
    EmptyParentDimension,
    /// The child dimension is active but has no types; the cross product is
    /// empty and the listing would carry no sellable combinations.
    #[error("the second variant dimension has no types")]
    EmptyChildDimension,
    /// A combination row references a parent type the matrix does not hold.
    #[error("combination row {index} references unknown parent type {label:?}")]
    UnknownParentType { index: usize, label: String },
    /// The resolved parent-type image list does not match the type list.
    #[error("resolved {images} parent-type images for {types} types")]
    ImageCountMismatch { images: usize, types: usize },
}

/// Compose the wire payload for the current editing state.
///
/// In edit mode every backend ID held by the state (product groups, types,
/// combinations, and the sentinel rows of a no-variant listing) is threaded
/// into the payload so the backend updates rows in place instead of
/// recreating them.
///
/// # Errors
///
/// See [`ComposeError`]; callers treat any error as a blocked submission.
pub fn compose(state: &EditingState, assets: &ResolvedAssets) -> Result<WirePayload, ComposeError> {
    if assets.product_images.is_empty() {
        return Err(ComposeError::NoImages);
    }

    let variant = match state.matrix.mode() {
        VariantMode::Single => compose_sentinel(state)?,
        VariantMode::ParentOnly | VariantMode::ParentChild => compose_variants(state, assets)?,
    };

    Ok(WirePayload {
        name: state.fields.name.clone(),
        description: state.fields.description.clone(),
        category_lv1_id: state.fields.category.lv1.clone(),
        category_lv2_id: state.fields.category.lv2.clone(),
        category_lv3_id: state.fields.category.lv3.clone(),
        images: assets.product_images.clone(),
        weight: optional_field(NumericField::Weight, &state.fields.weight)?,
        length: optional_field(NumericField::Length, &state.fields.length)?,
        width: optional_field(NumericField::Width, &state.fields.width)?,
        height: optional_field(NumericField::Height, &state.fields.height)?,
        variant,
    })
}

/// No-variant listing: the sentinel group/type/combination, with price and
/// stock taken from the product-level fields rather than a matrix row.
fn compose_sentinel(state: &EditingState) -> Result<WireVariant, ComposeError> {
    let price = required_field(NumericField::Price, &state.fields.price)?;
    let stock = required_field(NumericField::ProductStock, &state.fields.stock)?;

    let sentinel_type = WireType {
        id: state.sentinel_ids.parent_type,
        name: DEFAULT_VARIANT.to_string(),
        image: None,
    };

    Ok(WireVariant {
        parent: WireDimension {
            id: state.sentinel_ids.parent_group,
            group: DEFAULT_VARIANT.to_string(),
            types: vec![sentinel_type.clone()],
        },
        child: None,
        combinations: vec![WireCombination {
            id: state.sentinel_ids.combination,
            parent_type: sentinel_type,
            child_type: None,
            price,
            stock,
        }],
    })
}

/// Variant listing: dimensions from the matrix, combinations from its rows.
fn compose_variants(
    state: &EditingState,
    assets: &ResolvedAssets,
) -> Result<WireVariant, ComposeError> {
    let parent = state
        .matrix
        .parent()
        .ok_or(ComposeError::EmptyParentDimension)?;
    if parent.types.is_empty() {
        return Err(ComposeError::EmptyParentDimension);
    }
    if state.matrix.child().is_some_and(|c| c.types.is_empty()) {
        return Err(ComposeError::EmptyChildDimension);
    }
    if assets.parent_type_images.len() != parent.types.len() {
        return Err(ComposeError::ImageCountMismatch {
            images: assets.parent_type_images.len(),
            types: parent.types.len(),
        });
    }

    let parent_types: Vec<WireType> = parent
        .types
        .iter()
        .zip(&assets.parent_type_images)
        .map(|(variant_type, image)| WireType {
            id: variant_type.backend_id,
            name: variant_type.label.clone(),
            image: image.clone(),
        })
        .collect();

    let child = state.matrix.child().map(|dimension| WireDimension {
        id: dimension.backend_id,
        group: dimension.group_label.clone(),
        types: dimension
            .types
            .iter()
            .map(|t| WireType {
                id: t.backend_id,
                name: t.label.clone(),
                image: None,
            })
            .collect(),
    });

    let combinations = state
        .matrix
        .combinations()
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let price = validate(NumericField::Price, &row.price).map_err(|reason| {
                ComposeError::InvalidRow {
                    index,
                    field: NumericField::Price,
                    reason,
                }
            })?;
            let stock = validate(NumericField::VariantStock, &row.stock).map_err(|reason| {
                ComposeError::InvalidRow {
                    index,
                    field: NumericField::VariantStock,
                    reason,
                }
            })?;

            // The row inherits its parent type's image and backend ID. The
            // matrix keeps rows and types consistent, so a miss here means a
            // caller bypassed it with inconsistent parts.
            let parent_type = parent_types
                .iter()
                .find(|t| t.name == row.parent_label)
                .cloned()
                .ok_or_else(|| ComposeError::UnknownParentType {
                    index,
                    label: row.parent_label.clone(),
                })?;

            let child_type = row.child_label.as_ref().map(|label| WireType {
                id: state
                    .matrix
                    .child()
                    .and_then(|d| find_backend_id(d, label)),
                name: label.clone(),
                image: None,
            });

            Ok(WireCombination {
                id: row.backend_id,
                parent_type,
                child_type,
                price,
                stock,
            })
        })
        .collect::<Result<Vec<_>, ComposeError>>()?;

    Ok(WireVariant {
        parent: WireDimension {
            id: parent.backend_id,
            group: parent.group_label.clone(),
            types: parent_types,
        },
        child,
        combinations,
    })
}

fn find_backend_id(
    dimension: &VariantDimension,
    label: &str,
) -> Option<copperpot_core::VariantTypeId> {
    dimension
        .types
        .iter()
        .find(|t| t.label == label)
        .and_then(|t| t.backend_id)
}

fn required_field(field: NumericField, raw: &str) -> Result<i64, ComposeError> {
    validate(field, raw).map_err(|reason| ComposeError::InvalidField { field, reason })
}

fn optional_field(field: NumericField, raw: &str) -> Result<Option<i64>, ComposeError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    required_field(field, raw).map(Some)
}

#[cfg(test)]
mod tests {
    use copperpot_core::{AssetRef, GroupId, LocalKey, VariantTypeId};

    use crate::session::CategorySelection;
    use crate::variant::{Axis, Combination, RowPatch, VariantMatrix, VariantType};

    use super::*;

    fn base_state() -> EditingState {
        let mut state = EditingState::new();
        state.fields.name = "Enamel mug".to_string();
        state.fields.description = "A mug".to_string();
        state.fields.category = CategorySelection {
            lv1: "10".to_string(),
            lv2: "42".to_string(),
            lv3: "388".to_string(),
        };
        state
            .add_image(AssetRef::Remote("https://cdn.example.com/mug.jpg".to_string()))
            .unwrap();
        state
    }

    fn resolved(state: &EditingState) -> ResolvedAssets {
        ResolvedAssets {
            product_images: state
                .images
                .iter()
                .filter_map(|a| a.as_remote().map(String::from))
                .collect(),
            parent_type_images: state
                .matrix
                .parent()
                .map(|p| {
                    p.types
                        .iter()
                        .map(|t| t.image.as_ref().and_then(|i| i.as_remote()).map(String::from))
                        .collect()
                })
                .unwrap_or_default(),
        }
    }

    #[test]
    fn test_single_mode_uses_sentinel_and_product_fields() {
        let mut state = base_state();
        state.fields.price = "1500".to_string();
        state.fields.stock = "25".to_string();

        let payload = compose(&state, &resolved(&state)).unwrap();
        assert_eq!(payload.variant.parent.group, DEFAULT_VARIANT);
        assert_eq!(payload.variant.parent.types.len(), 1);
        assert_eq!(payload.variant.parent.types[0].name, DEFAULT_VARIANT);
        assert!(payload.variant.child.is_none());
        assert_eq!(payload.variant.combinations.len(), 1);
        let combination = &payload.variant.combinations[0];
        assert_eq!(combination.price, 1500);
        assert_eq!(combination.stock, 25);
        assert!(combination.child_type.is_none());
    }

    #[test]
    fn test_parent_only_rows_carry_type_images() {
        let mut state = base_state();
        state.matrix.activate(Axis::Parent, "Color").unwrap();
        let red = state.matrix.add_type(Axis::Parent, "Red").unwrap();
        state.matrix.add_type(Axis::Parent, "Blue").unwrap();
        state.matrix.set_type_image(
            red,
            Some(AssetRef::Remote("https://cdn.example.com/red.jpg".to_string())),
        );
        for index in 0..2 {
            state
                .matrix
                .update_row(
                    index,
                    &RowPatch {
                        price: Some("1200".to_string()),
                        stock: Some("5".to_string()),
                        sku: None,
                    },
                )
                .unwrap();
        }

        let payload = compose(&state, &resolved(&state)).unwrap();
        assert_eq!(payload.variant.parent.group, "Color");
        assert!(payload.variant.child.is_none());
        assert_eq!(payload.variant.combinations.len(), 2);
        // Red inherited its image; Blue has none.
        assert_eq!(
            payload.variant.combinations[0].parent_type.image.as_deref(),
            Some("https://cdn.example.com/red.jpg")
        );
        assert!(payload.variant.combinations[1].parent_type.image.is_none());
    }

    #[test]
    fn test_parent_child_emits_full_cross_product() {
        let mut state = base_state();
        state.matrix.activate(Axis::Parent, "Color").unwrap();
        state.matrix.add_type(Axis::Parent, "Red").unwrap();
        state.matrix.add_type(Axis::Parent, "Blue").unwrap();
        state.matrix.activate(Axis::Child, "Size").unwrap();
        state.matrix.add_type(Axis::Child, "Small").unwrap();
        state.matrix.add_type(Axis::Child, "Large").unwrap();
        for index in 0..4 {
            state
                .matrix
                .update_row(
                    index,
                    &RowPatch {
                        price: Some("1000".to_string()),
                        stock: Some("1".to_string()),
                        sku: None,
                    },
                )
                .unwrap();
        }

        let payload = compose(&state, &resolved(&state)).unwrap();
        let child = payload.variant.child.as_ref().unwrap();
        assert_eq!(child.group, "Size");
        assert_eq!(child.types.len(), 2);
        assert_eq!(payload.variant.combinations.len(), 4);
        assert!(
            payload
                .variant
                .combinations
                .iter()
                .all(|c| c.child_type.is_some())
        );
    }

    #[test]
    fn test_edit_mode_threads_backend_ids() {
        let mut state = base_state();
        state.fields.price = "1500".to_string();
        state.fields.stock = "25".to_string();
        state.sentinel_ids.parent_group = Some(GroupId::new(7));
        state.sentinel_ids.parent_type = Some(VariantTypeId::new(8));
        state.sentinel_ids.combination = Some(copperpot_core::CombinationId::new(9));

        let payload = compose(&state, &resolved(&state)).unwrap();
        assert_eq!(payload.variant.parent.id, Some(GroupId::new(7)));
        assert_eq!(payload.variant.parent.types[0].id, Some(VariantTypeId::new(8)));
        assert_eq!(
            payload.variant.combinations[0].id,
            Some(copperpot_core::CombinationId::new(9))
        );
    }

    #[test]
    fn test_compose_rejects_invalid_rows_and_missing_images() {
        let mut state = base_state();
        state.matrix.activate(Axis::Parent, "Color").unwrap();
        state.matrix.add_type(Axis::Parent, "Red").unwrap();

        // Row never filled in: price is required.
        let err = compose(&state, &resolved(&state)).unwrap_err();
        assert!(matches!(
            err,
            ComposeError::InvalidRow {
                index: 0,
                field: NumericField::Price,
                reason: BoundsViolation::Required,
            }
        ));

        let empty = ResolvedAssets::default();
        assert_eq!(compose(&state, &empty).unwrap_err(), ComposeError::NoImages);
    }

    #[test]
    fn test_present_empty_child_dimension_is_rejected() {
        let mut state = base_state();
        state.matrix.activate(Axis::Parent, "Color").unwrap();
        state.matrix.add_type(Axis::Parent, "Red").unwrap();
        state.matrix.activate(Axis::Child, "Size").unwrap();

        // An empty cross product would serialize as zero combinations, which
        // the reconstructor rightly refuses; never let it onto the wire.
        assert!(state.matrix.combinations().is_empty());
        assert_eq!(
            compose(&state, &resolved(&state)).unwrap_err(),
            ComposeError::EmptyChildDimension
        );
    }

    #[test]
    fn test_row_with_unknown_parent_type_is_rejected() {
        let mut state = base_state();
        // Inconsistent parts can only enter through the reconstructor seam;
        // the composer must surface the mismatch, not invent a bare type.
        state.matrix = VariantMatrix::from_parts(
            Some(VariantDimension {
                group_label: "Color".to_string(),
                backend_id: None,
                types: vec![VariantType {
                    local_key: LocalKey::fresh(),
                    label: "Red".to_string(),
                    backend_id: None,
                    image: None,
                }],
            }),
            None,
            vec![Combination {
                parent_label: "Ghost".to_string(),
                child_label: None,
                price: "1000".to_string(),
                stock: "1".to_string(),
                sku: String::new(),
                backend_id: None,
            }],
        );

        assert_eq!(
            compose(&state, &resolved(&state)).unwrap_err(),
            ComposeError::UnknownParentType {
                index: 0,
                label: "Ghost".to_string(),
            }
        );
    }

    #[test]
    fn test_image_list_mismatch_is_rejected() {
        let mut state = base_state();
        state.matrix.activate(Axis::Parent, "Color").unwrap();
        state.matrix.add_type(Axis::Parent, "Red").unwrap();
        state
            .matrix
            .update_row(
                0,
                &RowPatch {
                    price: Some("1000".to_string()),
                    stock: Some("1".to_string()),
                    sku: None,
                },
            )
            .unwrap();

        let mut assets = resolved(&state);
        assets.parent_type_images.clear();
        assert_eq!(
            compose(&state, &assets).unwrap_err(),
            ComposeError::ImageCountMismatch { images: 0, types: 1 }
        );
    }

    #[test]
    fn test_physical_fields_are_optional_but_validated() {
        let mut state = base_state();
        state.fields.price = "1500".to_string();
        state.fields.stock = "25".to_string();
        state.fields.weight = "500".to_string();

        let payload = compose(&state, &resolved(&state)).unwrap();
        assert_eq!(payload.weight, Some(500));
        assert_eq!(payload.length, None);

        state.fields.height = "1001".to_string();
        assert!(matches!(
            compose(&state, &resolved(&state)).unwrap_err(),
            ComposeError::InvalidField {
                field: NumericField::Height,
                ..
            }
        ));
    }
}

//! The owned editing state for one open listing form.
//!
//! Each open create/edit form gets its own [`EditingState`]; nothing here is
//! shared or ambient. The state is mutated while the merchant edits, consumed
//! exactly once by the composer at submit time, and dropped when the form
//! closes.

use copperpot_core::{
    AssetRef, BoundsViolation, CombinationId, GroupId, MAX_PRODUCT_IMAGES, NumericField, ProductId,
    VariantTypeId, clamp_edit, validate,
};
use thiserror::Error;

use crate::variant::{VariantMatrix, VariantMode};

/// Opaque category identifiers supplied by the category selector.
///
/// This pipeline does not validate category structure; the triple is carried
/// through to the wire payload as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorySelection {
    pub lv1: String,
    pub lv2: String,
    pub lv3: String,
}

impl CategorySelection {
    fn is_complete(&self) -> bool {
        !self.lv1.is_empty() && !self.lv2.is_empty() && !self.lv3.is_empty()
    }
}

/// Product-level form fields. Numeric fields hold raw text while editing.
#[derive(Debug, Clone, Default)]
pub struct ProductFields {
    pub name: String,
    pub description: String,
    pub category: CategorySelection,
    /// Price for a single-SKU listing; unused once variants are active.
    pub price: String,
    /// Stock for a single-SKU listing; unused once variants are active.
    pub stock: String,
    pub weight: String,
    pub length: String,
    pub width: String,
    pub height: String,
}

/// Backend IDs of the sentinel variant rows of a saved no-variant product.
///
/// A product saved without variants still has a `"DEFAULT"` group, type, and
/// combination on the backend; updates must target those rows instead of
/// recreating them.
#[derive(Debug, Clone, Copy, Default)]
pub struct SentinelIds {
    pub parent_group: Option<GroupId>,
    pub parent_type: Option<VariantTypeId>,
    pub combination: Option<CombinationId>,
}

/// Image-list rejections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The listing already has the maximum number of images.
    #[error("a listing can have at most {max} images")]
    TooManyImages { max: usize },
}

/// One reason the submit button is disabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitBlocker {
    /// Product name is empty.
    MissingName,
    /// Category triple is incomplete.
    MissingCategory,
    /// The listing has no images at all.
    NoImages,
    /// The parent dimension is active but has no types yet.
    EmptyParentDimension,
    /// The child dimension is active but has no types, so the cross product
    /// is empty and nothing is sellable.
    EmptyChildDimension,
    /// A product-level numeric field failed validation.
    InvalidProductField {
        field: NumericField,
        reason: BoundsViolation,
    },
    /// A combination row failed price or stock validation.
    InvalidRow {
        index: usize,
        field: NumericField,
        reason: BoundsViolation,
    },
}

/// The full editing state of one listing form.
#[derive(Debug, Clone, Default)]
pub struct EditingState {
    /// Present in edit mode; update instead of create.
    pub product_id: Option<ProductId>,
    pub fields: ProductFields,
    /// Positional image list, at most [`MAX_PRODUCT_IMAGES`] entries; index 0
    /// is the main image at submission time regardless of upload order.
    pub images: Vec<AssetRef>,
    pub matrix: VariantMatrix,
    /// Sentinel row IDs carried through edit mode for no-variant products.
    pub sentinel_ids: SentinelIds,
}

impl EditingState {
    /// Fresh state for a create form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an image slot.
    ///
    /// # Errors
    ///
    /// [`SessionError::TooManyImages`] beyond [`MAX_PRODUCT_IMAGES`].
    pub fn add_image(&mut self, asset: AssetRef) -> Result<(), SessionError> {
        if self.images.len() >= MAX_PRODUCT_IMAGES {
            return Err(SessionError::TooManyImages {
                max: MAX_PRODUCT_IMAGES,
            });
        }
        self.images.push(asset);
        Ok(())
    }

    /// Remove an image slot; out-of-range indexes are ignored.
    pub fn remove_image(&mut self, index: usize) {
        if index < self.images.len() {
            self.images.remove(index);
        }
    }

    /// Move an image to the front, making it the main image.
    pub fn promote_image(&mut self, index: usize) {
        if index > 0 && index < self.images.len() {
            let asset = self.images.remove(index);
            self.images.insert(0, asset);
        }
    }

    /// Clamped write-through for a product-level numeric field.
    ///
    /// Per-row fields (`Price`/`VariantStock`/`Sku` on the matrix) go through
    /// [`VariantMatrix::update_row`] instead; passing them here is a no-op.
    pub fn edit_numeric(&mut self, field: NumericField, raw: &str) {
        let slot = match field {
            NumericField::Price => &mut self.fields.price,
            NumericField::ProductStock => &mut self.fields.stock,
            NumericField::Weight => &mut self.fields.weight,
            NumericField::Length => &mut self.fields.length,
            NumericField::Width => &mut self.fields.width,
            NumericField::Height => &mut self.fields.height,
            NumericField::VariantStock | NumericField::Sku => return,
        };
        *slot = clamp_edit(field, raw);
    }

    /// Everything currently blocking submission, for inline messages.
    ///
    /// SKU entries never block: they are a UI hint and are not transmitted.
    #[must_use]
    pub fn submit_blockers(&self) -> Vec<SubmitBlocker> {
        let mut blockers = Vec::new();

        if self.fields.name.trim().is_empty() {
            blockers.push(SubmitBlocker::MissingName);
        }
        if !self.fields.category.is_complete() {
            blockers.push(SubmitBlocker::MissingCategory);
        }
        if self.images.is_empty() {
            blockers.push(SubmitBlocker::NoImages);
        }

        match self.matrix.mode() {
            VariantMode::Single => {
                for (field, raw) in [
                    (NumericField::Price, &self.fields.price),
                    (NumericField::ProductStock, &self.fields.stock),
                ] {
                    if let Err(reason) = validate(field, raw) {
                        blockers.push(SubmitBlocker::InvalidProductField { field, reason });
                    }
                }
            }
            VariantMode::ParentOnly | VariantMode::ParentChild => {
                if self.matrix.parent().is_some_and(|p| p.types.is_empty()) {
                    blockers.push(SubmitBlocker::EmptyParentDimension);
                }
                if self.matrix.child().is_some_and(|c| c.types.is_empty()) {
                    blockers.push(SubmitBlocker::EmptyChildDimension);
                }
                for (index, row) in self.matrix.combinations().iter().enumerate() {
                    for (field, raw) in [
                        (NumericField::Price, &row.price),
                        (NumericField::VariantStock, &row.stock),
                    ] {
                        if let Err(reason) = validate(field, raw) {
                            blockers.push(SubmitBlocker::InvalidRow {
                                index,
                                field,
                                reason,
                            });
                        }
                    }
                }
            }
        }

        // Physical fields gate only when the merchant entered something.
        for (field, raw) in [
            (NumericField::Weight, &self.fields.weight),
            (NumericField::Length, &self.fields.length),
            (NumericField::Width, &self.fields.width),
            (NumericField::Height, &self.fields.height),
        ] {
            if !raw.trim().is_empty()
                && let Err(reason) = validate(field, raw)
            {
                blockers.push(SubmitBlocker::InvalidProductField { field, reason });
            }
        }

        blockers
    }

    /// Whether the submit button is enabled.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.submit_blockers().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variant::{Axis, RowPatch};

    fn remote(url: &str) -> AssetRef {
        AssetRef::Remote(url.to_string())
    }

    fn valid_single() -> EditingState {
        let mut state = EditingState::new();
        state.fields.name = "Enamel mug".to_string();
        state.fields.category = CategorySelection {
            lv1: "10".to_string(),
            lv2: "42".to_string(),
            lv3: "388".to_string(),
        };
        state.fields.price = "1500".to_string();
        state.fields.stock = "25".to_string();
        state.add_image(remote("https://cdn.example.com/mug.jpg")).unwrap();
        state
    }

    #[test]
    fn test_single_mode_submit_gate() {
        let state = valid_single();
        assert!(state.can_submit());

        let mut missing_image = state.clone();
        missing_image.images.clear();
        assert_eq!(missing_image.submit_blockers(), [SubmitBlocker::NoImages]);

        let mut bad_price = state.clone();
        bad_price.fields.price = "99".to_string();
        assert!(matches!(
            bad_price.submit_blockers().as_slice(),
            [SubmitBlocker::InvalidProductField {
                field: NumericField::Price,
                reason: BoundsViolation::BelowMinimum { min: 100 },
            }]
        ));

        let mut no_name = state;
        no_name.fields.name.clear();
        assert!(!no_name.can_submit());
    }

    #[test]
    fn test_empty_parent_dimension_blocks() {
        let mut state = valid_single();
        state.matrix.activate(Axis::Parent, "Color").unwrap();
        assert!(
            state
                .submit_blockers()
                .contains(&SubmitBlocker::EmptyParentDimension)
        );
    }

    #[test]
    fn test_empty_child_dimension_blocks() {
        let mut state = valid_single();
        state.matrix.activate(Axis::Parent, "Color").unwrap();
        state.matrix.add_type(Axis::Parent, "Red").unwrap();
        state.matrix.activate(Axis::Child, "Size").unwrap();

        // P x {} = {}: no rows to fail validation, but nothing is sellable.
        assert!(state.matrix.combinations().is_empty());
        assert!(
            state
                .submit_blockers()
                .contains(&SubmitBlocker::EmptyChildDimension)
        );

        state.matrix.add_type(Axis::Child, "Small").unwrap();
        state
            .matrix
            .update_row(
                0,
                &RowPatch {
                    price: Some("1200".to_string()),
                    stock: Some("1".to_string()),
                    sku: None,
                },
            )
            .unwrap();
        assert!(state.can_submit());
    }

    #[test]
    fn test_variant_rows_gate_submit() {
        let mut state = valid_single();
        state.matrix.activate(Axis::Parent, "Color").unwrap();
        state.matrix.add_type(Axis::Parent, "Red").unwrap();

        // Fresh row: price is required, stock is required.
        let blockers = state.submit_blockers();
        assert!(blockers.iter().any(|b| matches!(
            b,
            SubmitBlocker::InvalidRow {
                index: 0,
                field: NumericField::Price,
                reason: BoundsViolation::Required,
            }
        )));

        state
            .matrix
            .update_row(
                0,
                &RowPatch {
                    price: Some("1200".to_string()),
                    stock: Some("0".to_string()),
                    sku: None,
                },
            )
            .unwrap();
        // Zero stock is legal for variant rows; product price/stock fields
        // are ignored in variant mode.
        state.fields.price.clear();
        state.fields.stock.clear();
        assert!(state.can_submit());
    }

    #[test]
    fn test_sku_never_blocks() {
        let mut state = valid_single();
        state.matrix.activate(Axis::Parent, "Color").unwrap();
        state.matrix.add_type(Axis::Parent, "Red").unwrap();
        state
            .matrix
            .update_row(
                0,
                &RowPatch {
                    price: Some("1200".to_string()),
                    stock: Some("3".to_string()),
                    sku: Some(String::new()),
                },
            )
            .unwrap();
        assert!(state.can_submit());
    }

    #[test]
    fn test_physical_fields_gate_only_when_present() {
        let mut state = valid_single();
        assert!(state.can_submit());
        state.fields.height = "1001".to_string();
        assert!(matches!(
            state.submit_blockers().as_slice(),
            [SubmitBlocker::InvalidProductField {
                field: NumericField::Height,
                ..
            }]
        ));
    }

    #[test]
    fn test_image_list_capacity_and_promotion() {
        let mut state = EditingState::new();
        for i in 0..MAX_PRODUCT_IMAGES {
            state.add_image(remote(&format!("https://cdn.example.com/{i}.jpg"))).unwrap();
        }
        assert_eq!(
            state.add_image(remote("https://cdn.example.com/extra.jpg")),
            Err(SessionError::TooManyImages { max: 5 })
        );

        state.promote_image(3);
        assert_eq!(
            state.images[0].as_remote(),
            Some("https://cdn.example.com/3.jpg")
        );
        assert_eq!(state.images.len(), MAX_PRODUCT_IMAGES);
    }

    #[test]
    fn test_edit_numeric_clamps_product_fields() {
        let mut state = EditingState::new();
        state.edit_numeric(NumericField::Price, "0");
        assert_eq!(state.fields.price, "1");
        state.edit_numeric(NumericField::ProductStock, "-2");
        assert_eq!(state.fields.stock, "1");
        state.edit_numeric(NumericField::Weight, "500");
        assert_eq!(state.fields.weight, "500");
    }
}

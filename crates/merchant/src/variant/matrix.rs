//! The variant matrix: two ordered dimensions and their cross product.
//!
//! A listing is sold either as a single SKU, with one variant dimension
//! (e.g. Color), or with two (e.g. Color x Size). The matrix owns both
//! dimensions and derives the sellable combination rows from them.
//!
//! The combination list is **recomputed wholesale** whenever either
//! dimension's type list changes; per-cell price/stock/sku entered before the
//! change is discarded. That is the observed contract of the listing form,
//! locked in by tests (see `test_recompute_wipes_cell_values`).

use copperpot_core::{AssetRef, LocalKey, VariantTypeId};
use copperpot_core::{CombinationId, GroupId, NumericField, clamp_edit};
use thiserror::Error;

/// Group labels suggested for the parent dimension. Free text is also legal.
pub const SUGGESTED_PARENT_GROUPS: &[&str] = &["Color", "Flavor", "Material", "Style"];

/// Group labels suggested for the child dimension. Free text is also legal.
pub const SUGGESTED_CHILD_GROUPS: &[&str] = &["Size", "Weight", "Volume"];

/// Which variant axis an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// The first dimension; the only one that carries per-type images.
    Parent,
    /// The optional second dimension.
    Child,
}

/// How the listing is sold, derived from which dimensions are active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantMode {
    /// No variants; one sentinel combination at submit time.
    Single,
    /// One dimension; one combination per parent type.
    ParentOnly,
    /// Two dimensions; the full cross product.
    ParentChild,
}

/// One concrete value within a dimension (e.g. "Red").
#[derive(Debug, Clone)]
pub struct VariantType {
    /// Stable identity before (and alongside) any backend ID.
    pub local_key: LocalKey,
    /// Display label; letters only by policy.
    pub label: String,
    /// Present only when editing a previously saved type.
    pub backend_id: Option<VariantTypeId>,
    /// Per-type image; parent dimension only.
    pub image: Option<AssetRef>,
}

/// One variant axis: a group label and its ordered types.
#[derive(Debug, Clone)]
pub struct VariantDimension {
    /// E.g. "Color". Suggested vocabulary in [`SUGGESTED_PARENT_GROUPS`].
    pub group_label: String,
    /// Present only when editing a previously saved group.
    pub backend_id: Option<GroupId>,
    /// Ordered types; order is preserved into the wire payload.
    pub types: Vec<VariantType>,
}

impl VariantDimension {
    fn new(group_label: String) -> Self {
        Self {
            group_label,
            backend_id: None,
            types: Vec::new(),
        }
    }

    /// Case-insensitive lookup by label.
    fn find_by_label(&self, label: &str) -> Option<&VariantType> {
        self.types
            .iter()
            .find(|t| t.label.to_lowercase() == label.to_lowercase())
    }
}

/// One sellable row of the matrix.
///
/// Price, stock, and SKU hold the raw text the merchant typed; blank means
/// untouched. They are validated against the real bounds only at submit time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Combination {
    /// Label of the parent type this row belongs to.
    pub parent_label: String,
    /// Label of the child type; `None` when the child dimension is inactive.
    pub child_label: Option<String>,
    /// Raw price entry, currency minor units.
    pub price: String,
    /// Raw stock entry.
    pub stock: String,
    /// Raw SKU entry. UI-only; never transmitted.
    pub sku: String,
    /// Present only when editing a previously saved combination.
    pub backend_id: Option<CombinationId>,
}

impl Combination {
    fn blank(parent_label: String, child_label: Option<String>) -> Self {
        Self {
            parent_label,
            child_label,
            price: String::new(),
            stock: String::new(),
            sku: String::new(),
            backend_id: None,
        }
    }
}

/// A per-row edit; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct RowPatch {
    pub price: Option<String>,
    pub stock: Option<String>,
    pub sku: Option<String>,
}

/// Rejection reasons for matrix operations.
///
/// These are user-input rejections, meant for inline messages; none of them
/// aborts the editing session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatrixError {
    /// A type label was empty after trimming.
    #[error("variant label cannot be empty")]
    EmptyLabel,
    /// A type label contained characters other than letters.
    #[error("variant label must contain letters only")]
    NonAlphabeticLabel,
    /// An operation targeted a dimension that is not active.
    #[error("variant dimension is not active")]
    InactiveAxis,
    /// The child dimension needs at least one parent type first. The form
    /// disables the control instead of surfacing this message.
    #[error("add at least one parent type before adding a second dimension")]
    ChildRequiresParent,
    /// A row edit referenced a combination that does not exist.
    #[error("no combination row at index {index}")]
    RowOutOfBounds { index: usize },
}

/// The editing-session matrix: both dimensions plus the derived combinations.
#[derive(Debug, Clone, Default)]
pub struct VariantMatrix {
    parent: Option<VariantDimension>,
    child: Option<VariantDimension>,
    combinations: Vec<Combination>,
}

impl VariantMatrix {
    /// An inactive matrix (single-SKU listing).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a matrix from saved parts without recomputing combinations.
    ///
    /// Only the reconstructor uses this: saved combinations are already
    /// consistent by construction and carry backend IDs that a recompute
    /// would throw away.
    pub(crate) fn from_parts(
        parent: Option<VariantDimension>,
        child: Option<VariantDimension>,
        combinations: Vec<Combination>,
    ) -> Self {
        Self {
            parent,
            child,
            combinations,
        }
    }

    /// Current variant mode, derived from which dimensions are active.
    #[must_use]
    pub const fn mode(&self) -> VariantMode {
        match (&self.parent, &self.child) {
            (None, _) => VariantMode::Single,
            (Some(_), None) => VariantMode::ParentOnly,
            (Some(_), Some(_)) => VariantMode::ParentChild,
        }
    }

    /// The parent dimension, if active.
    #[must_use]
    pub const fn parent(&self) -> Option<&VariantDimension> {
        self.parent.as_ref()
    }

    /// The child dimension, if active.
    #[must_use]
    pub const fn child(&self) -> Option<&VariantDimension> {
        self.child.as_ref()
    }

    /// The derived combination rows, in parent-major order.
    #[must_use]
    pub fn combinations(&self) -> &[Combination] {
        &self.combinations
    }

    /// Whether the "add second dimension" control should be enabled.
    #[must_use]
    pub fn can_activate_child(&self) -> bool {
        self.parent.as_ref().is_some_and(|p| !p.types.is_empty())
    }

    /// Activate a dimension, seeding it empty.
    ///
    /// # Errors
    ///
    /// Activating the child without a populated parent is
    /// [`MatrixError::ChildRequiresParent`].
    pub fn activate(&mut self, axis: Axis, group_label: impl Into<String>) -> Result<(), MatrixError> {
        match axis {
            Axis::Parent => {
                if self.parent.is_none() {
                    self.parent = Some(VariantDimension::new(group_label.into()));
                    self.recompute_combinations();
                }
            }
            Axis::Child => {
                if !self.can_activate_child() {
                    return Err(MatrixError::ChildRequiresParent);
                }
                if self.child.is_none() {
                    self.child = Some(VariantDimension::new(group_label.into()));
                    self.recompute_combinations();
                }
            }
        }
        Ok(())
    }

    /// Deactivate a dimension. Deactivating the parent drops the child too,
    /// since a child dimension cannot stand alone.
    pub fn deactivate(&mut self, axis: Axis) {
        match axis {
            Axis::Parent => {
                self.parent = None;
                self.child = None;
            }
            Axis::Child => self.child = None,
        }
        self.recompute_combinations();
    }

    /// Rename a dimension's group label.
    ///
    /// # Errors
    ///
    /// [`MatrixError::InactiveAxis`] when the dimension is not active.
    pub fn set_group_label(
        &mut self,
        axis: Axis,
        group_label: impl Into<String>,
    ) -> Result<(), MatrixError> {
        let dimension = self.dimension_mut(axis).ok_or(MatrixError::InactiveAxis)?;
        dimension.group_label = group_label.into();
        Ok(())
    }

    /// Add a type to a dimension.
    ///
    /// Labels are trimmed and must be letters only. A duplicate label
    /// (case-insensitive) adds nothing; the existing type's key is returned
    /// so callers can treat the add as a reuse.
    ///
    /// # Errors
    ///
    /// [`MatrixError::EmptyLabel`], [`MatrixError::NonAlphabeticLabel`], or
    /// [`MatrixError::InactiveAxis`].
    pub fn add_type(&mut self, axis: Axis, label: &str) -> Result<LocalKey, MatrixError> {
        let label = label.trim();
        if label.is_empty() {
            return Err(MatrixError::EmptyLabel);
        }
        if !label.chars().all(char::is_alphabetic) {
            return Err(MatrixError::NonAlphabeticLabel);
        }

        let dimension = self.dimension_mut(axis).ok_or(MatrixError::InactiveAxis)?;
        if let Some(existing) = dimension.find_by_label(label) {
            return Ok(existing.local_key);
        }

        let local_key = LocalKey::fresh();
        dimension.types.push(VariantType {
            local_key,
            label: label.to_string(),
            backend_id: None,
            image: None,
        });
        self.recompute_combinations();
        Ok(local_key)
    }

    /// Remove a type by its local key.
    ///
    /// The type's image (parent axis) goes with it, and the combination list
    /// is recomputed as a side effect; rows derived from the removed type
    /// disappear, including orphaned child pairings.
    pub fn remove_type(&mut self, axis: Axis, local_key: LocalKey) {
        let Some(dimension) = self.dimension_mut(axis) else {
            return;
        };
        let before = dimension.types.len();
        dimension.types.retain(|t| t.local_key != local_key);
        if dimension.types.len() != before {
            self.recompute_combinations();
        }
    }

    /// Attach or clear the image of a parent type.
    ///
    /// Child types never carry images; a child key is ignored.
    pub fn set_type_image(&mut self, local_key: LocalKey, image: Option<AssetRef>) {
        if let Some(parent) = self.parent.as_mut()
            && let Some(variant_type) = parent.types.iter_mut().find(|t| t.local_key == local_key)
        {
            variant_type.image = image;
        }
    }

    /// Apply a clamped edit to one combination row.
    ///
    /// Each present field goes through the live-edit clamp for its kind
    /// before being written; submit-time validation happens separately.
    ///
    /// # Errors
    ///
    /// [`MatrixError::RowOutOfBounds`] for a bad index.
    pub fn update_row(&mut self, index: usize, patch: &RowPatch) -> Result<(), MatrixError> {
        let row = self
            .combinations
            .get_mut(index)
            .ok_or(MatrixError::RowOutOfBounds { index })?;
        if let Some(price) = &patch.price {
            row.price = clamp_edit(NumericField::Price, price);
        }
        if let Some(stock) = &patch.stock {
            row.stock = clamp_edit(NumericField::VariantStock, stock);
        }
        if let Some(sku) = &patch.sku {
            row.sku = clamp_edit(NumericField::Sku, sku);
        }
        Ok(())
    }

    fn dimension_mut(&mut self, axis: Axis) -> Option<&mut VariantDimension> {
        match axis {
            Axis::Parent => self.parent.as_mut(),
            Axis::Child => self.child.as_mut(),
        }
    }

    /// Replace the combination list with the cross product of the current
    /// type lists. Runs after every type-list or activation change; any
    /// previously entered cell values are discarded, not merged.
    fn recompute_combinations(&mut self) {
        self.combinations = match (&self.parent, &self.child) {
            (None, _) => Vec::new(),
            (Some(parent), None) => parent
                .types
                .iter()
                .map(|t| Combination::blank(t.label.clone(), None))
                .collect(),
            (Some(parent), Some(child)) => parent
                .types
                .iter()
                .flat_map(|pt| {
                    child
                        .types
                        .iter()
                        .map(|ct| Combination::blank(pt.label.clone(), Some(ct.label.clone())))
                })
                .collect(),
        };
    }
}

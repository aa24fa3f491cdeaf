//! Wire payload types and the composer/reconstructor pair.
//!
//! The structs here are the bit-exact contract with the Product API:
//! `variant.parent.group`, `variant.parent.types[].type` (and optional
//! `.image`), `variant.child`, and `variant.combinations[]` with
//! `parent_type`, `child_type`, `price`, `stock`. `child_type` (and the
//! `child` dimension itself) serialize as explicit `null` when inactive,
//! never omitted; `id` and `image` keys are omitted when absent.

mod compose;
mod reconstruct;

use chrono::{DateTime, Utc};
use copperpot_core::{CombinationId, GroupId, ProductId, VariantTypeId};
use serde::{Deserialize, Serialize};

pub use compose::{ComposeError, ResolvedAssets, compose};
pub use reconstruct::{ReconstructError, reconstruct};

/// Reserved group/type label meaning "this product has no real variants".
pub const DEFAULT_VARIANT: &str = "DEFAULT";

/// One variant type on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireType {
    /// Backend row ID; present in edit payloads and saved products.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<VariantTypeId>,
    /// The type label.
    #[serde(rename = "type")]
    pub name: String,
    /// Hosted image URL; parent types only, and only when one exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// One variant dimension on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireDimension {
    /// Backend group ID; present in edit payloads and saved products.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<GroupId>,
    /// Group label (e.g. "Color", or the `"DEFAULT"` sentinel).
    pub group: String,
    /// Ordered types.
    pub types: Vec<WireType>,
}

/// One sellable combination on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireCombination {
    /// Backend row ID; present in edit payloads and saved products.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CombinationId>,
    /// The parent type, with its inherited image when present.
    pub parent_type: WireType,
    /// The child type; explicit `null` when the child dimension is inactive.
    #[serde(default)]
    pub child_type: Option<WireType>,
    /// Price in currency minor units.
    pub price: i64,
    /// Stock on hand.
    pub stock: i64,
}

/// The full variant block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireVariant {
    pub parent: WireDimension,
    /// Explicit `null` when there is no second dimension.
    #[serde(default)]
    pub child: Option<WireDimension>,
    pub combinations: Vec<WireCombination>,
}

/// The payload sent to (and received from) the Product API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WirePayload {
    pub name: String,
    pub description: String,
    /// Opaque category triple from the category selector.
    pub category_lv1_id: String,
    pub category_lv2_id: String,
    pub category_lv3_id: String,
    /// Hosted image URLs; index 0 is the main image.
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<i64>,
    pub variant: WireVariant,
}

/// A previously saved product, as returned by the Product API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedProduct {
    pub id: ProductId,
    #[serde(flatten)]
    pub product: WirePayload,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

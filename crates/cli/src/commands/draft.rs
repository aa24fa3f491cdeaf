//! Draft files: an offline JSON description of a listing.
//!
//! A draft names the product fields, image sources (local paths or hosted
//! URLs), the optional variant dimensions, and the per-combination rows.
//! Building a draft replays it through the same matrix operations the
//! console form uses, so a draft is subject to the same label policy,
//! clamping, and submit gate.
//!
//! ```json
//! {
//!   "name": "Enamel mug",
//!   "category_lv1_id": "10", "category_lv2_id": "42", "category_lv3_id": "388",
//!   "images": ["photos/mug.jpg", "https://cdn.example.com/mug-side.jpg"],
//!   "parent": { "group": "Color", "types": [
//!     { "label": "Red", "image": "photos/red.jpg" },
//!     { "label": "Blue" }
//!   ]},
//!   "child": { "group": "Size", "types": [{ "label": "Small" }, { "label": "Large" }] },
//!   "rows": [
//!     { "parent": "Red", "child": "Small", "price": 1500, "stock": 10 },
//!     { "parent": "Red", "child": "Large", "price": 1700, "stock": 10 },
//!     { "parent": "Blue", "child": "Small", "price": 1500, "stock": 0 },
//!     { "parent": "Blue", "child": "Large", "price": 1700, "stock": 2 }
//!   ]
//! }
//! ```

use std::error::Error;
use std::fs;
use std::path::Path;

use copperpot_core::{AssetRef, LocalAsset};
use copperpot_merchant::session::{CategorySelection, EditingState};
use copperpot_merchant::variant::{Axis, RowPatch};
use serde::Deserialize;

/// A listing draft as written by the merchant.
#[derive(Debug, Deserialize)]
pub struct Draft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category_lv1_id: String,
    pub category_lv2_id: String,
    pub category_lv3_id: String,
    /// Local paths or http(s) URLs; order is kept, first entry is the main
    /// image.
    #[serde(default)]
    pub images: Vec<String>,
    /// Single-SKU price; ignored once `parent` is set.
    #[serde(default)]
    pub price: Option<i64>,
    /// Single-SKU stock; ignored once `parent` is set.
    #[serde(default)]
    pub stock: Option<i64>,
    #[serde(default)]
    pub weight: Option<i64>,
    #[serde(default)]
    pub length: Option<i64>,
    #[serde(default)]
    pub width: Option<i64>,
    #[serde(default)]
    pub height: Option<i64>,
    #[serde(default)]
    pub parent: Option<DraftDimension>,
    #[serde(default)]
    pub child: Option<DraftDimension>,
    #[serde(default)]
    pub rows: Vec<DraftRow>,
}

#[derive(Debug, Deserialize)]
pub struct DraftDimension {
    pub group: String,
    pub types: Vec<DraftType>,
}

#[derive(Debug, Deserialize)]
pub struct DraftType {
    pub label: String,
    /// Parent types only; local path or hosted URL.
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DraftRow {
    pub parent: String,
    #[serde(default)]
    pub child: Option<String>,
    pub price: i64,
    pub stock: i64,
    #[serde(default)]
    pub sku: Option<String>,
}

/// Read and parse a draft file.
///
/// # Errors
///
/// Returns an error for unreadable files or malformed JSON.
pub fn load(path: &Path) -> Result<Draft, Box<dyn Error>> {
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("cannot read draft {}: {e}", path.display()))?;
    Ok(serde_json::from_str(&raw)?)
}

/// Replay a draft through the editing pipeline.
///
/// # Errors
///
/// Returns an error for unreadable image files, labels the matrix rejects,
/// or rows that do not match any combination.
pub fn build_state(draft: &Draft) -> Result<EditingState, Box<dyn Error>> {
    let mut state = EditingState::new();
    state.fields.name.clone_from(&draft.name);
    state.fields.description.clone_from(&draft.description);
    state.fields.category = CategorySelection {
        lv1: draft.category_lv1_id.clone(),
        lv2: draft.category_lv2_id.clone(),
        lv3: draft.category_lv3_id.clone(),
    };
    state.fields.price = number_or_blank(draft.price);
    state.fields.stock = number_or_blank(draft.stock);
    state.fields.weight = number_or_blank(draft.weight);
    state.fields.length = number_or_blank(draft.length);
    state.fields.width = number_or_blank(draft.width);
    state.fields.height = number_or_blank(draft.height);

    for source in &draft.images {
        state.add_image(asset_from_source(source)?)?;
    }

    if let Some(parent) = &draft.parent {
        state.matrix.activate(Axis::Parent, parent.group.as_str())?;
        for draft_type in &parent.types {
            let key = state.matrix.add_type(Axis::Parent, &draft_type.label)?;
            if let Some(source) = &draft_type.image {
                state.matrix.set_type_image(key, Some(asset_from_source(source)?));
            }
        }
        if let Some(child) = &draft.child {
            state.matrix.activate(Axis::Child, child.group.as_str())?;
            for draft_type in &child.types {
                state.matrix.add_type(Axis::Child, &draft_type.label)?;
            }
        }
    }

    for row in &draft.rows {
        let index = state
            .matrix
            .combinations()
            .iter()
            .position(|c| {
                c.parent_label == row.parent && c.child_label.as_deref() == row.child.as_deref()
            })
            .ok_or_else(|| {
                format!(
                    "draft row ({}, {}) does not match any combination",
                    row.parent,
                    row.child.as_deref().unwrap_or("-")
                )
            })?;
        state.matrix.update_row(
            index,
            &RowPatch {
                price: Some(row.price.to_string()),
                stock: Some(row.stock.to_string()),
                sku: row.sku.clone(),
            },
        )?;
    }

    Ok(state)
}

/// An http(s) source stays remote; anything else is read from disk.
fn asset_from_source(source: &str) -> Result<AssetRef, Box<dyn Error>> {
    if source.starts_with("http://") || source.starts_with("https://") {
        return Ok(AssetRef::Remote(source.to_string()));
    }
    let path = Path::new(source);
    let bytes =
        fs::read(path).map_err(|e| format!("cannot read image {}: {e}", path.display()))?;
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("image")
        .to_string();
    Ok(AssetRef::Local(LocalAsset {
        mime_type: mime_for(path).to_string(),
        filename,
        bytes,
    }))
}

fn mime_for(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "image/jpeg",
    }
}

fn number_or_blank(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

//! Numeric field bounds for listing forms.
//!
//! Two layers with different strictness:
//!
//! - [`validate`] is the submit-time gate: the full inclusive range, with an
//!   empty field reported as [`BoundsViolation::Required`] rather than a
//!   range failure.
//! - [`clamp_edit`] is the live-editing clamp: it only floors values below
//!   the field's edit floor (a typed price of `"0"` becomes `"1"`) and
//!   passes everything else through so typing is never blocked. A price of
//!   `"1"` survives the clamp but still fails [`validate`] until it reaches
//!   the real minimum of 100.

use thiserror::Error;

/// Minimum sellable price, in currency minor units.
pub const PRICE_MIN: i64 = 100;
/// Maximum sellable price.
pub const PRICE_MAX: i64 = 100_000_000_000_000;
/// Maximum stock per combination or product.
pub const STOCK_MAX: i64 = 100_000;
/// Maximum product weight.
pub const WEIGHT_MAX: i64 = 100_000;
/// Maximum product length/width/height.
pub const DIMENSION_MAX: i64 = 1_000;

/// A numeric field on the listing form, each with its own bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericField {
    /// Price of a combination or of a single-SKU product.
    Price,
    /// Stock of one variant combination; zero is allowed.
    VariantStock,
    /// Top-level stock of a product without variants; must be at least one.
    ProductStock,
    /// Seller SKU. UI hint only; never transmitted or gated at submit.
    Sku,
    /// Package weight.
    Weight,
    /// Package length.
    Length,
    /// Package width.
    Width,
    /// Package height.
    Height,
}

impl NumericField {
    /// Inclusive minimum accepted at submit time.
    #[must_use]
    pub const fn min(self) -> i64 {
        match self {
            Self::Price => PRICE_MIN,
            Self::VariantStock => 0,
            Self::ProductStock | Self::Sku | Self::Weight | Self::Length | Self::Width
            | Self::Height => 1,
        }
    }

    /// Inclusive maximum accepted at submit time.
    #[must_use]
    pub const fn max(self) -> i64 {
        match self {
            Self::Price => PRICE_MAX,
            Self::VariantStock | Self::ProductStock => STOCK_MAX,
            Self::Sku => i64::MAX,
            Self::Weight => WEIGHT_MAX,
            Self::Length | Self::Width | Self::Height => DIMENSION_MAX,
        }
    }

    /// Floor applied while the merchant is still typing.
    ///
    /// More permissive than [`min`](Self::min): a price mid-entry only has to
    /// be positive, not yet above [`PRICE_MIN`].
    #[must_use]
    pub const fn edit_floor(self) -> i64 {
        match self {
            Self::VariantStock => 0,
            _ => 1,
        }
    }
}

/// Why a raw field value was rejected at submit time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoundsViolation {
    /// The field is empty.
    #[error("value is required")]
    Required,
    /// The field does not parse as an integer.
    #[error("value is not a whole number")]
    NotNumeric,
    /// The value is below the field's minimum.
    #[error("value must be at least {min}")]
    BelowMinimum { min: i64 },
    /// The value is above the field's maximum.
    #[error("value must be at most {max}")]
    AboveMaximum { max: i64 },
}

/// Validate a raw field value against its submit-time bounds.
///
/// # Errors
///
/// Returns a [`BoundsViolation`] describing the first failed rule; an empty
/// string is [`BoundsViolation::Required`], distinct from any range failure.
pub fn validate(field: NumericField, raw: &str) -> Result<i64, BoundsViolation> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(BoundsViolation::Required);
    }
    let value: i64 = trimmed.parse().map_err(|_| BoundsViolation::NotNumeric)?;
    if value < field.min() {
        return Err(BoundsViolation::BelowMinimum { min: field.min() });
    }
    if value > field.max() {
        return Err(BoundsViolation::AboveMaximum { max: field.max() });
    }
    Ok(value)
}

/// Clamp a value as it is being typed.
///
/// Numeric input below the field's edit floor is replaced with the floor;
/// anything else, including empty and non-numeric text, passes through
/// unchanged so the merchant can keep typing. Idempotent.
#[must_use]
pub fn clamp_edit(field: NumericField, raw: &str) -> String {
    match raw.trim().parse::<i64>() {
        Ok(value) if value < field.edit_floor() => field.edit_floor().to_string(),
        _ => raw.to_string(),
    }
}

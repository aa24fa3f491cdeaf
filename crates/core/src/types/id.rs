//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types. Backend-assigned
//! identifiers are i64; entities that need an identity before the backend
//! has assigned one use [`LocalKey`].

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `i64` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_i64()`
/// - `From<i64>` and `Into<i64>` implementations
///
/// # Example
///
/// ```rust
/// # use copperpot_core::define_id;
/// define_id!(ProductId);
/// define_id!(CombinationId);
///
/// let product_id = ProductId::new(1);
/// let combination_id = CombinationId::new(1);
///
/// // These are different types, so this won't compile:
/// // let _: ProductId = combination_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Create a new ID from an i64 value.
            #[must_use]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Get the underlying i64 value.
            #[must_use]
            pub const fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

// Define standard entity IDs
define_id!(ProductId);
define_id!(GroupId);
define_id!(VariantTypeId);
define_id!(CombinationId);

/// Stable identity for list entries that do not yet have a backend ID.
///
/// A freshly added variant type exists only in the editing session until the
/// product is submitted; `LocalKey` gives it a stable handle for reordering
/// and removal in the meantime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalKey(Uuid);

impl LocalKey {
    /// Generate a fresh, unique key.
    #[must_use]
    pub fn fresh() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for LocalKey {
    fn default() -> Self {
        Self::fresh()
    }
}

//! Variant dimensions, types, and the combination matrix.

mod matrix;

pub use matrix::{
    Axis, Combination, MatrixError, RowPatch, SUGGESTED_CHILD_GROUPS, SUGGESTED_PARENT_GROUPS,
    VariantDimension, VariantMatrix, VariantMode, VariantType,
};

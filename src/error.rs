//! granular failure kinds surfaced by the write operations
//!
//! each kind carries enough context to name the offending series in the
//! caller supplied data, since the grid file itself will usually be absent
//! or truncated when one of these is returned

use derive_more::{Constructor, Display, From};

/// No valid data type could be inferred for a series and no override was
/// supplied for it.
///
/// With the tagged [`Value`](`crate::Value`) representation every scalar
/// series classifies as integer or floating kind, so this only occurs for
/// a vector series with no component columns to combine.
#[derive(From, Display, Debug, Constructor)]
#[display(fmt = "failed to detect a valid data type for series `{series_name}`")]
pub struct TypeMismatch {
    series_name: String,
}

/// A required field name did not resolve to any supplied series. Raised for
/// a missing position field and for type overrides that name nothing.
#[derive(From, Display, Debug, Constructor)]
#[display(fmt = "{role} `{field_name}` was not found in the supplied scalar or vector series")]
pub struct MissingField {
    role: &'static str,
    field_name: String,
}

#[derive(Debug, thiserror::Error, From)]
pub enum ShapeMismatch {
    #[error("{0}")]
    RaggedComponents(RaggedComponents),
    #[error("{0}")]
    LengthMismatch(LengthMismatch),
    #[error("{0}")]
    NoComponents(NoComponents),
}

/// component columns of a single vector series disagree in length
#[derive(From, Display, Debug, Constructor)]
#[display(
    fmt = "vector series `{series_name}` is ragged: component {component} has {actual} values, expected {expected}"
)]
pub struct RaggedComponents {
    series_name: String,
    component: usize,
    expected: usize,
    actual: usize,
}

/// the position series has no component columns, so no point count can be
/// derived from it
#[derive(From, Display, Debug, Constructor)]
#[display(fmt = "position series `{series_name}` has no component columns to derive a point count")]
pub struct NoComponents {
    series_name: String,
}

/// a series length disagrees with the point count derived from the
/// position field
#[derive(From, Display, Debug, Constructor)]
#[display(
    fmt = "series `{series_name}` has {actual} values but the grid has {expected} points"
)]
pub struct LengthMismatch {
    series_name: String,
    expected: usize,
    actual: usize,
}

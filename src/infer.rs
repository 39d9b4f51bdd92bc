//! narrowest-fit data type inference for untyped series
//!
//! classification is by element kind, never by magnitude: a series of small
//! floats still infers a float type, and integer series never widen to
//! float unless a floating element is present

use crate::value::{BitWidth, DataType, Value};

/// Infer the data type of a scalar series at the given width.
///
/// A series of uniformly non-negative integer elements infers unsigned,
/// any-sign integer elements infer signed, and a series containing at least
/// one floating element infers float. An empty series vacuously satisfies
/// the first rule and infers unsigned.
pub fn guess_scalar_type(values: &[Value], width: BitWidth) -> DataType {
    if values.iter().all(Value::is_int) {
        if values.iter().all(Value::is_non_negative_int) {
            width.unsigned()
        } else {
            width.signed()
        }
    } else {
        width.float()
    }
}

/// Infer the data type of a component-major vector series at the given
/// width by combining the per-component scalar inferences.
///
/// All components unsigned returns the first component's type as-is; the
/// widths of the remaining unsigned components are deliberately not
/// cross-checked. All components integer returns the signed type for the
/// configured width, and anything else returns the float type. A series
/// with no component columns at all has nothing to combine and returns
/// `None`.
pub fn guess_vector_type(components: &[Vec<Value>], width: BitWidth) -> Option<DataType> {
    let types: Vec<DataType> = components
        .iter()
        .map(|column| guess_scalar_type(column, width))
        .collect();

    let first = *types.first()?;

    if types.iter().all(DataType::is_unsigned) {
        Some(first)
    } else if types.iter().all(DataType::is_integer) {
        Some(width.signed())
    } else {
        Some(width.float())
    }
}

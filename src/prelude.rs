//! Common types that are useful for working with `vtu`

pub use crate::Error;
pub use crate::{BitWidth, DataType, Value};
pub use crate::{ScalarSeries, Snapshot, VectorSeries};
pub use crate::VtuWriter;

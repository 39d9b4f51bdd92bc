//! container types for the data attached to one grid snapshot

use crate::value::{DataType, Value};

/// An independent named data column: one value per grid point.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScalarSeries {
    values: Vec<Value>,
}

impl ScalarSeries {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub(crate) fn values(&self) -> &[Value] {
        &self.values
    }

    /// ascii payload for a scalar `DataArray`: one value per line
    pub(crate) fn ascii_column(&self) -> String {
        let mut out = String::new();
        for (idx, value) in self.values.iter().enumerate() {
            if idx > 0 {
                out.push('\n');
            }
            value.push_ascii(&mut out);
        }
        out
    }
}

impl<T: Into<Value>> From<Vec<T>> for ScalarSeries {
    fn from(values: Vec<T>) -> Self {
        Self::new(values.into_iter().map(Into::into).collect())
    }
}

/// A named vector field stored component-major: one column per component,
/// every column holding one value per grid point.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VectorSeries {
    components: Vec<Vec<Value>>,
}

impl VectorSeries {
    pub fn new(components: Vec<Vec<Value>>) -> Self {
        Self { components }
    }

    pub fn num_components(&self) -> usize {
        self.components.len()
    }

    /// number of points described by this series, taken from the first
    /// component column
    pub fn point_count(&self) -> Option<usize> {
        self.components.first().map(Vec::len)
    }

    pub(crate) fn components(&self) -> &[Vec<Value>] {
        &self.components
    }

    /// index of the first component column whose length disagrees with the
    /// first column, if any
    pub(crate) fn ragged_component(&self) -> Option<(usize, usize, usize)> {
        let expected = self.point_count()?;
        self.components
            .iter()
            .enumerate()
            .find(|(_, column)| column.len() != expected)
            .map(|(idx, column)| (idx, expected, column.len()))
    }

    /// ascii payload for a vector `DataArray`: the component-major storage
    /// transposed to point-major rows, values space-joined within a row,
    /// rows newline-joined
    pub(crate) fn ascii_rows(&self) -> String {
        let rows = self.point_count().unwrap_or(0);
        let mut out = String::new();
        for row in 0..rows {
            if row > 0 {
                out.push('\n');
            }
            for (idx, column) in self.components.iter().enumerate() {
                if idx > 0 {
                    out.push(' ');
                }
                column[row].push_ascii(&mut out);
            }
        }
        out
    }
}

impl<T: Into<Value>> From<Vec<Vec<T>>> for VectorSeries {
    fn from(components: Vec<Vec<T>>) -> Self {
        Self::new(
            components
                .into_iter()
                .map(|column| column.into_iter().map(Into::into).collect())
                .collect(),
        )
    }
}

pub(crate) const DEFAULT_POSITION_FIELD: &str = "positions";

/// The full payload of one grid snapshot write: ordered scalar and vector
/// fields, optional per-field type overrides, and the name of the vector
/// field holding the point positions.
///
/// Field order is preserved exactly as inserted and determines the
/// `DataArray` order inside the `PointData` element. One vector field must
/// carry the position-field name (`"positions"` unless changed with
/// [`position_field`](`Snapshot::position_field`)); it determines the grid's
/// point count and is emitted under `Points` instead of `PointData`.
///
/// ```
/// use vtu::{ScalarSeries, Snapshot, VectorSeries};
///
/// let snapshot = Snapshot::new()
///     .vector("positions", VectorSeries::from(vec![vec![0.0, 1.0], vec![0.0, 1.0]]))
///     .scalar("mass", ScalarSeries::from(vec![5, 8]));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub(crate) scalars: Vec<(String, ScalarSeries)>,
    pub(crate) vectors: Vec<(String, VectorSeries)>,
    pub(crate) overrides: Vec<(String, DataType)>,
    pub(crate) position_field: Option<String>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// append a scalar field; emission order follows insertion order
    pub fn scalar<N: Into<String>, S: Into<ScalarSeries>>(mut self, name: N, series: S) -> Self {
        self.scalars.push((name.into(), series.into()));
        self
    }

    /// append a vector field; emission order follows insertion order
    pub fn vector<N: Into<String>, S: Into<VectorSeries>>(mut self, name: N, series: S) -> Self {
        self.vectors.push((name.into(), series.into()));
        self
    }

    /// pin the data type of a named field instead of inferring it
    pub fn override_type<N: Into<String>>(mut self, name: N, datatype: DataType) -> Self {
        self.overrides.push((name.into(), datatype));
        self
    }

    /// use a different vector field than `"positions"` as the point
    /// positions
    pub fn position_field<N: Into<String>>(mut self, name: N) -> Self {
        self.position_field = Some(name.into());
        self
    }

    pub(crate) fn position_name(&self) -> &str {
        self.position_field
            .as_deref()
            .unwrap_or(DEFAULT_POSITION_FIELD)
    }

    pub(crate) fn override_for(&self, name: &str) -> Option<DataType> {
        self.overrides
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, t)| *t)
    }

    pub(crate) fn has_field(&self, name: &str) -> bool {
        self.scalars.iter().any(|(n, _)| n == name)
            || self.vectors.iter().any(|(n, _)| n == name)
    }
}

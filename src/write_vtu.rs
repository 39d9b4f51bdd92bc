//! emission of a single unstructured grid snapshot document
//!
//! the document is never held in memory as a tree: after the snapshot is
//! validated and every field's data type is resolved, elements are emitted
//! in order straight into the sink

use crate::error;
use crate::infer;
use crate::series::{ScalarSeries, Snapshot, VectorSeries};
use crate::value::{BitWidth, DataType};
use crate::Error;

use std::io::Write;

use quick_xml::events::BytesDecl;
use quick_xml::events::BytesEnd;
use quick_xml::events::BytesStart;
use quick_xml::events::BytesText;
use quick_xml::events::Event;
use quick_xml::writer::Writer;

pub(crate) const INDENT_CHAR: u8 = b' ';
pub(crate) const INDENT_SIZE: usize = 2;

/// Write one grid snapshot document for `snapshot` to a `Write` sink.
///
/// Equivalent to [`VtuWriter::write_data_file`](`crate::VtuWriter::write_data_file`)
/// but without touching the file system or any writer state, which makes it
/// usable against an in-memory `Vec<u8>`.
pub fn write_vtu<W: Write>(sink: W, snapshot: &Snapshot, width: BitWidth) -> Result<(), Error> {
    let resolved = resolve(snapshot, width)?;
    emit(sink, &resolved)
}

/// a snapshot whose shape has been validated and whose data types are all
/// known, ready for emission
pub(crate) struct ResolvedSnapshot<'a> {
    pub(crate) point_count: usize,
    pub(crate) position: (&'a str, DataType, &'a VectorSeries),
    /// non-position vector fields, caller order
    pub(crate) vectors: Vec<(&'a str, DataType, &'a VectorSeries)>,
    /// scalar fields, caller order
    pub(crate) scalars: Vec<(&'a str, DataType, &'a ScalarSeries)>,
}

/// Validate the snapshot and resolve every field's data type.
///
/// Checks run in a fixed order: position field present, override targets
/// present, every vector rectangular, every series length equal to the
/// point count, every type resolvable. The first failure aborts the write
/// before anything is emitted.
pub(crate) fn resolve(snapshot: &Snapshot, width: BitWidth) -> Result<ResolvedSnapshot, Error> {
    let position_name = snapshot.position_name();

    let position_series = snapshot
        .vectors
        .iter()
        .find(|(name, _)| name == position_name)
        .map(|(_, series)| series)
        .ok_or_else(|| error::MissingField::new("position field", position_name.to_string()))?;

    for (name, _) in &snapshot.overrides {
        if !snapshot.has_field(name) {
            return Err(error::MissingField::new("type override target", name.clone()).into());
        }
    }

    for (name, series) in &snapshot.vectors {
        if let Some((component, expected, actual)) = series.ragged_component() {
            let ragged = error::RaggedComponents::new(name.clone(), component, expected, actual);
            return Err(error::ShapeMismatch::from(ragged).into());
        }
    }

    let point_count = position_series.point_count().ok_or_else(|| {
        error::ShapeMismatch::from(error::NoComponents::new(position_name.to_string()))
    })?;

    for (name, series) in &snapshot.vectors {
        if let Some(length) = series.point_count() {
            if length != point_count {
                let mismatch = error::LengthMismatch::new(name.clone(), point_count, length);
                return Err(error::ShapeMismatch::from(mismatch).into());
            }
        }
    }

    for (name, series) in &snapshot.scalars {
        if series.len() != point_count {
            let mismatch = error::LengthMismatch::new(name.clone(), point_count, series.len());
            return Err(error::ShapeMismatch::from(mismatch).into());
        }
    }

    let position_type = vector_type(snapshot, position_name, position_series, width)?;

    let mut vectors = Vec::with_capacity(snapshot.vectors.len().saturating_sub(1));
    for (name, series) in &snapshot.vectors {
        if name == position_name {
            continue;
        }
        vectors.push((name.as_str(), vector_type(snapshot, name, series, width)?, series));
    }

    let mut scalars = Vec::with_capacity(snapshot.scalars.len());
    for (name, series) in &snapshot.scalars {
        let datatype = snapshot
            .override_for(name)
            .unwrap_or_else(|| infer::guess_scalar_type(series.values(), width));
        scalars.push((name.as_str(), datatype, series));
    }

    Ok(ResolvedSnapshot {
        point_count,
        position: (position_name, position_type, position_series),
        vectors,
        scalars,
    })
}

fn vector_type(
    snapshot: &Snapshot,
    name: &str,
    series: &VectorSeries,
    width: BitWidth,
) -> Result<DataType, Error> {
    match snapshot.override_for(name) {
        Some(datatype) => Ok(datatype),
        None => infer::guess_vector_type(series.components(), width)
            .ok_or_else(|| error::TypeMismatch::new(name.to_string()).into()),
    }
}

pub(crate) fn emit<W: Write>(sink: W, resolved: &ResolvedSnapshot) -> Result<(), Error> {
    let mut writer = Writer::new_with_indent(sink, INDENT_CHAR, INDENT_SIZE);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut root = BytesStart::new("VTKFile");
    root.push_attribute(("type", "UnstructuredGrid"));
    root.push_attribute(("version", "0.1"));
    root.push_attribute(("byte_order", "LittleEndian"));
    writer.write_event(Event::Start(root))?;

    writer.write_event(Event::Start(BytesStart::new("UnstructuredGrid")))?;

    let mut piece = BytesStart::new("Piece");
    piece.push_attribute(("NumberOfPoints", resolved.point_count.to_string().as_str()));
    piece.push_attribute(("NumberOfCells", "0"));
    writer.write_event(Event::Start(piece))?;

    writer.write_event(Event::Start(BytesStart::new("Points")))?;
    let (name, datatype, series) = resolved.position;
    write_vector_array(&mut writer, name, datatype, series)?;
    writer.write_event(Event::End(BytesEnd::new("Points")))?;

    writer.write_event(Event::Start(BytesStart::new("PointData")))?;
    for (name, datatype, series) in &resolved.vectors {
        write_vector_array(&mut writer, name, *datatype, series)?;
    }
    for (name, datatype, series) in &resolved.scalars {
        write_scalar_array(&mut writer, name, *datatype, series)?;
    }
    writer.write_event(Event::End(BytesEnd::new("PointData")))?;

    // cell topology is always an empty stub: one connectivity array holding
    // a single zero, and no cell data at all
    writer.write_event(Event::Start(BytesStart::new("Cells")))?;
    let mut connectivity = BytesStart::new("DataArray");
    connectivity.push_attribute(("type", "Int32"));
    connectivity.push_attribute(("Name", "connectivity"));
    connectivity.push_attribute(("format", "ascii"));
    writer.write_event(Event::Start(connectivity))?;
    writer.write_event(Event::Text(BytesText::new("0")))?;
    writer.write_event(Event::End(BytesEnd::new("DataArray")))?;
    writer.write_event(Event::End(BytesEnd::new("Cells")))?;

    writer.write_event(Event::Empty(BytesStart::new("CellData")))?;

    writer.write_event(Event::End(BytesEnd::new("Piece")))?;
    writer.write_event(Event::End(BytesEnd::new("UnstructuredGrid")))?;
    writer.write_event(Event::End(BytesEnd::new("VTKFile")))?;

    Ok(())
}

fn write_vector_array<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    datatype: DataType,
    series: &VectorSeries,
) -> Result<(), Error> {
    let mut array = BytesStart::new("DataArray");
    array.push_attribute(("Name", name));
    array.push_attribute(("type", datatype.as_str()));
    array.push_attribute(("format", "ascii"));
    array.push_attribute(("NumberOfComponents", series.num_components().to_string().as_str()));
    writer.write_event(Event::Start(array))?;

    let rows = series.ascii_rows();
    writer.write_event(Event::Text(BytesText::new(&rows)))?;
    writer.write_event(Event::End(BytesEnd::new("DataArray")))?;

    Ok(())
}

fn write_scalar_array<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    datatype: DataType,
    series: &ScalarSeries,
) -> Result<(), Error> {
    let mut array = BytesStart::new("DataArray");
    array.push_attribute(("Name", name));
    array.push_attribute(("type", datatype.as_str()));
    array.push_attribute(("format", "ascii"));
    writer.write_event(Event::Start(array))?;

    let column = series.ascii_column();
    writer.write_event(Event::Text(BytesText::new(&column)))?;
    writer.write_event(Event::End(BytesEnd::new("DataArray")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::BitWidth::Bit32;
    use crate::value::Value;

    fn two_point_snapshot() -> Snapshot {
        Snapshot::new()
            .vector(
                "positions",
                VectorSeries::from(vec![vec![0, 1], vec![0, 1], vec![0, 1]]),
            )
            .scalar("m", ScalarSeries::from(vec![1, 2]))
    }

    fn render(snapshot: &Snapshot) -> String {
        let mut sink = Vec::new();
        write_vtu(&mut sink, snapshot, Bit32).unwrap();
        String::from_utf8(sink).unwrap()
    }

    #[test]
    fn grid_document_shape() {
        let body = render(&two_point_snapshot());

        assert!(body.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(body.contains(
            r#"<VTKFile type="UnstructuredGrid" version="0.1" byte_order="LittleEndian">"#
        ));
        assert!(body.contains(r#"<Piece NumberOfPoints="2" NumberOfCells="0">"#));
        assert!(body.contains(
            r#"<DataArray Name="positions" type="UInt32" format="ascii" NumberOfComponents="3">"#
        ));
        assert!(body.contains("0 0 0\n1 1 1</DataArray>"));
        assert!(body.contains(r#"<DataArray Name="m" type="UInt32" format="ascii">"#));
        assert!(body.contains("1\n2</DataArray>"));
        assert!(body.contains(
            r#"<DataArray type="Int32" Name="connectivity" format="ascii">0</DataArray>"#
        ));
        assert!(body.contains("<CellData/>"));

        // exactly one array in PointData for the single scalar field
        assert_eq!(body.matches("<DataArray").count(), 3);
    }

    #[test]
    fn position_field_excluded_from_point_data() {
        let snapshot = two_point_snapshot().vector(
            "velocity",
            VectorSeries::from(vec![vec![1.0, 2.0], vec![0.5, 0.25]]),
        );
        let body = render(&snapshot);

        let point_data = {
            let start = body.find("<PointData>").unwrap();
            let end = body.find("</PointData>").unwrap();
            &body[start..end]
        };

        assert!(!point_data.contains(r#"Name="positions""#));
        assert!(point_data.contains(
            r#"<DataArray Name="velocity" type="Float32" format="ascii" NumberOfComponents="2">"#
        ));
        assert!(point_data.contains("1.0 0.5\n2.0 0.25</DataArray>"));
    }

    #[test]
    fn vector_fields_precede_scalar_fields() {
        let snapshot = Snapshot::new()
            .scalar("a", ScalarSeries::from(vec![1, 2]))
            .vector(
                "positions",
                VectorSeries::from(vec![vec![0, 1], vec![0, 1]]),
            )
            .vector("v", VectorSeries::from(vec![vec![1, 2], vec![3, 4]]));
        let body = render(&snapshot);

        let vector_at = body.find(r#"Name="v""#).unwrap();
        let scalar_at = body.find(r#"Name="a""#).unwrap();
        assert!(vector_at < scalar_at);
    }

    #[test]
    fn override_beats_inference() {
        let snapshot = two_point_snapshot()
            .override_type("m", DataType::Float64)
            .override_type("positions", DataType::Float32);
        let body = render(&snapshot);

        assert!(body.contains(r#"<DataArray Name="m" type="Float64" format="ascii">"#));
        assert!(body.contains(
            r#"<DataArray Name="positions" type="Float32" format="ascii" NumberOfComponents="3">"#
        ));
    }

    #[test]
    fn missing_position_field() {
        let snapshot = Snapshot::new().scalar("m", ScalarSeries::from(vec![1]));
        let err = write_vtu(Vec::new(), &snapshot, Bit32).unwrap_err();
        assert!(matches!(err, Error::MissingField(_)));
    }

    #[test]
    fn renamed_position_field_is_honored() {
        let snapshot = Snapshot::new()
            .position_field("coords")
            .vector("coords", VectorSeries::from(vec![vec![0, 1], vec![0, 1]]));
        let body = render(&snapshot);
        assert!(body.contains(
            r#"<DataArray Name="coords" type="UInt32" format="ascii" NumberOfComponents="2">"#
        ));
    }

    #[test]
    fn override_for_unknown_field_is_rejected() {
        let snapshot = two_point_snapshot().override_type("ghost", DataType::Int32);
        let err = write_vtu(Vec::new(), &snapshot, Bit32).unwrap_err();
        assert!(matches!(err, Error::MissingField(_)));
    }

    #[test]
    fn ragged_vector_is_rejected() {
        let snapshot = Snapshot::new().vector(
            "positions",
            VectorSeries::from(vec![vec![0, 1], vec![0, 1, 2]]),
        );
        let err = write_vtu(Vec::new(), &snapshot, Bit32).unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch(_)));
    }

    #[test]
    fn wrong_length_scalar_is_rejected() {
        let snapshot = two_point_snapshot().scalar("extra", ScalarSeries::from(vec![1, 2, 3]));
        let err = write_vtu(Vec::new(), &snapshot, Bit32).unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch(_)));
    }

    #[test]
    fn zero_point_snapshot_writes_with_unsigned_types() {
        let empty: Vec<i64> = Vec::new();
        let snapshot = Snapshot::new()
            .vector("positions", VectorSeries::from(vec![empty.clone()]))
            .scalar("m", ScalarSeries::from(empty));
        let body = render(&snapshot);

        assert!(body.contains(r#"<Piece NumberOfPoints="0" NumberOfCells="0">"#));
        assert!(body.contains(
            r#"<DataArray Name="positions" type="UInt32" format="ascii" NumberOfComponents="1">"#
        ));
        assert!(body.contains(r#"<DataArray Name="m" type="UInt32" format="ascii">"#));
    }

    #[test]
    fn vector_without_columns_is_a_type_mismatch() {
        let snapshot = two_point_snapshot().vector("v", VectorSeries::new(Vec::new()));
        let err = write_vtu(Vec::new(), &snapshot, Bit32).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch(_)));
    }

    #[test]
    fn position_without_columns_is_a_shape_mismatch() {
        let snapshot = Snapshot::new().vector("positions", VectorSeries::new(Vec::new()));
        let err = write_vtu(Vec::new(), &snapshot, Bit32).unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch(_)));
    }

    #[test]
    fn mixed_kind_values_render_faithfully() {
        let snapshot = Snapshot::new()
            .vector(
                "positions",
                VectorSeries::new(vec![
                    vec![Value::Float(1.0), Value::Int(2)],
                    vec![Value::Int(4), Value::Float(5.5)],
                ]),
            );
        let body = render(&snapshot);

        assert!(body.contains(r#"type="Float32""#));
        assert!(body.contains("1.0 4\n2 5.5</DataArray>"));
    }
}

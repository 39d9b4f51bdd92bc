//! emission of the collection (index) document
//!
//! the collection document is a flat list of previously written snapshot
//! files, ordered by write time, which paraview reads as a time series

use crate::write_vtu::{INDENT_CHAR, INDENT_SIZE};
use crate::Error;

use std::io::Write;
use std::path::PathBuf;

use quick_xml::events::BytesDecl;
use quick_xml::events::BytesEnd;
use quick_xml::events::BytesStart;
use quick_xml::events::Event;
use quick_xml::writer::Writer;

/// Write a collection document listing `files` in order to a `Write` sink.
///
/// Each file becomes one `DataSet` element whose `timestep` is its
/// zero-based position in the list.
pub fn write_pvd<W: Write>(sink: W, files: &[PathBuf]) -> Result<(), Error> {
    let mut writer = Writer::new_with_indent(sink, INDENT_CHAR, INDENT_SIZE);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut root = BytesStart::new("VTKFile");
    root.push_attribute(("type", "Collection"));
    root.push_attribute(("version", "0.1"));
    root.push_attribute(("byte_order", "LittleEndian"));
    writer.write_event(Event::Start(root))?;

    writer.write_event(Event::Start(BytesStart::new("Collection")))?;

    for (timestep, file) in files.iter().enumerate() {
        let mut dataset = BytesStart::new("DataSet");
        dataset.push_attribute(("timestep", timestep.to_string().as_str()));
        dataset.push_attribute(("group", ""));
        dataset.push_attribute(("part", "0"));
        dataset.push_attribute(("file", file.to_string_lossy().as_ref()));
        writer.write_event(Event::Empty(dataset))?;
    }

    writer.write_event(Event::End(BytesEnd::new("Collection")))?;
    writer.write_event(Event::End(BytesEnd::new("VTKFile")))?;

    Ok(())
}

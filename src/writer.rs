//! the stateful writer tying snapshot files to a collection index

use crate::series::Snapshot;
use crate::value::BitWidth;
use crate::write_pvd;
use crate::write_vtu;
use crate::Error;

use std::fs::File;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

/// Writer for VTK unstructured grid XML files and the collection file that
/// indexes them as a time series.
///
/// One instance corresponds to one output session: the bit width used for
/// inferred data types is fixed at construction, and every successful
/// [`write_data_file`](`VtuWriter::write_data_file`) call appends its
/// destination path to an internal list. A later
/// [`write_pvd_file`](`VtuWriter::write_pvd_file`) call turns that list, in
/// write order, into the collection document. Failed snapshot writes leave
/// the list untouched.
#[derive(Debug, Clone, Default)]
pub struct VtuWriter {
    width: BitWidth,
    fnames: Vec<PathBuf>,
}

impl VtuWriter {
    pub fn new(width: BitWidth) -> Self {
        Self {
            width,
            fnames: Vec::new(),
        }
    }

    pub fn bit_width(&self) -> BitWidth {
        self.width
    }

    /// the paths of all snapshot files successfully written so far, in
    /// write order
    pub fn written_files(&self) -> &[PathBuf] {
        &self.fnames
    }

    /// Write one grid snapshot file for `snapshot` at `path`, overwriting
    /// any existing file, and record the path for the collection index.
    ///
    /// The snapshot is validated before the destination is opened, so a
    /// snapshot with missing fields, inconsistent shapes, or uninferrable
    /// types never clobbers an existing file.
    pub fn write_data_file<P: AsRef<Path>>(
        &mut self,
        path: P,
        snapshot: &Snapshot,
    ) -> Result<(), Error> {
        let path = path.as_ref();

        let resolved = write_vtu::resolve(snapshot, self.width)?;

        let file = File::create(path)?;
        let mut sink = BufWriter::new(file);
        write_vtu::emit(&mut sink, &resolved)?;
        sink.flush()?;

        self.fnames.push(path.to_path_buf());

        Ok(())
    }

    /// Write the collection file at `path` indexing every snapshot written
    /// so far.
    ///
    /// May be called any number of times; each call reflects the snapshot
    /// list at that moment.
    pub fn write_pvd_file<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let file = File::create(path.as_ref())?;
        let mut sink = BufWriter::new(file);
        write_pvd::write_pvd(&mut sink, &self.fnames)?;
        sink.flush()?;

        Ok(())
    }
}

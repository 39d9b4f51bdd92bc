#![doc = include_str!("../README.md")]

pub mod error;
mod infer;
pub mod prelude;
mod series;
mod value;
mod write_pvd;
mod write_vtu;
mod writer;

pub use infer::guess_scalar_type;
pub use infer::guess_vector_type;

pub use series::{ScalarSeries, Snapshot, VectorSeries};
pub use value::{BitWidth, DataType, Value};

pub use write_pvd::write_pvd;
pub use write_vtu::write_vtu;
pub use writer::VtuWriter;

use derive_more::From;

/// general purpose error enumeration for possible causes of failure.
#[derive(Debug, thiserror::Error, From)]
pub enum Error {
    #[error("An io error occured: `{0}`")]
    Io(std::io::Error),
    #[error("Could not write XML data to file: `{0}`")]
    XmlWrite(quick_xml::Error),
    #[error("{0}")]
    TypeMismatch(error::TypeMismatch),
    #[error("{0}")]
    MissingField(error::MissingField),
    #[error("{0}")]
    ShapeMismatch(error::ShapeMismatch),
}

//! neuropix-io: File-facing half of the NEUROPix conversion.
//!
//! Source-library resolution, simulation snapshot reading, HDF5 output,
//! and the conversion orchestrator that sequences them.

mod convert;
mod error;
mod hdf5;
mod library;
mod reader;

pub use convert::{convert, output_path_for, ConversionSummary, ConvertOptions, INPUT_EXTENSION};
pub use error::{Error, Result};
pub use hdf5::{read_output, write_output, ConvertedContents};
pub use library::{resolve_object_library, RunContext, SYSTEM_LIBRARY_PATH};
pub use reader::read_snapshot;

//! I/O error types.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for I/O operations.
pub type Result<T> = std::result::Result<T, Error>;

/// I/O error types.
#[derive(Error, Debug)]
pub enum Error {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HDF5 library error.
    #[error("HDF5 error: {0}")]
    Hdf5(#[from] hdf5::Error),

    /// Core projection or flattening error.
    #[error("core error: {0}")]
    Core(#[from] neuropix_core::Error),

    /// Malformed simulation snapshot.
    #[error("invalid snapshot {}: {source}", .path.display())]
    InvalidSnapshot {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// An explicitly requested object library does not exist.
    #[error("{} does not exist", .0.display())]
    LibraryNotFound(PathBuf),

    /// No object library found at any probed location.
    #[error("no Allpix objects library found")]
    NoLibraryCandidate,

    /// Input file extension is not recognized.
    #[error("unknown input file type: {}", .0.display())]
    UnsupportedInput(PathBuf),

    /// Destination file already exists and overwriting was not confirmed.
    #[error("output file {} already exists", .0.display())]
    OutputExists(PathBuf),

    /// Invalid output file contents.
    #[error("invalid output file: {0}")]
    InvalidOutput(String),
}

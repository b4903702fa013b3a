//! Simulation snapshot reading.
//!
//! The ROOT container decode itself belongs to the simulation toolchain;
//! the file backend shipped here reads a serde-encoded snapshot of the
//! engine's records. Anything implementing
//! [`neuropix_core::SimulationSource`] can replace it.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use neuropix_core::SimulationData;

use crate::error::{Error, Result};

/// Reads a simulation snapshot from disk.
///
/// # Errors
/// Returns an error if the file cannot be opened or its contents do not
/// decode to a [`SimulationData`].
pub fn read_snapshot(path: &Path) -> Result<SimulationData> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| Error::InvalidSnapshot {
        path: path.to_path_buf(),
        source,
    })
}

//! Conversion orchestrator: snapshot in, HDF5 container out.

use std::path::{Path, PathBuf};

use neuropix_core::{flatten_events, RunMetadata, SimulationSource};

use crate::error::{Error, Result};
use crate::hdf5::write_output;
use crate::library::RunContext;
use crate::reader::read_snapshot;

/// Recognized input file extension.
pub const INPUT_EXTENSION: &str = "root";

const OUTPUT_EXTENSION: &str = "hdf5";

/// Conversion options.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Detector whose branches are projected.
    pub detector: String,
    /// Explicit objects-library path; probed locations otherwise.
    pub library_path: Option<PathBuf>,
    /// Output directory; the input's directory when unset.
    pub output_dir: Option<PathBuf>,
    /// Truncate an existing output file instead of failing.
    pub overwrite: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            detector: "timepix".to_string(),
            library_path: None,
            output_dir: None,
            overwrite: false,
        }
    }
}

/// Summary of one completed conversion.
#[derive(Debug, Clone)]
pub struct ConversionSummary {
    /// Path of the written container.
    pub output_path: PathBuf,
    /// Number of events visited.
    pub events: usize,
    /// Number of hits flattened.
    pub hits: usize,
}

/// Derives the output path: the input file name with its extension
/// replaced by `.hdf5`, placed in `dir` (the input's directory when
/// `None`).
#[must_use]
pub fn output_path_for(input: &Path, dir: Option<&Path>) -> PathBuf {
    let name = input.with_extension(OUTPUT_EXTENSION);
    match (dir, name.file_name()) {
        (Some(dir), Some(file_name)) => dir.join(file_name),
        _ => name,
    }
}

/// Runs one conversion end to end.
///
/// Sequencing: input extension check, objects-library activation through
/// `ctx`, output-conflict guard, snapshot read, metadata projection, hit
/// flattening, container write. Projection and flattening complete in
/// memory before the output file is created, so failures up to that point
/// leave no output behind; a failed container write removes the partial
/// file.
///
/// # Errors
/// Returns an error on any fatal condition: unrecognized extension,
/// unresolvable library, unconfirmed output conflict, unreadable
/// snapshot, missing configuration keys, unresolvable detector branch,
/// or HDF5 failure.
pub fn convert(
    ctx: &mut RunContext,
    input: &Path,
    options: &ConvertOptions,
) -> Result<ConversionSummary> {
    if input.extension().and_then(|ext| ext.to_str()) != Some(INPUT_EXTENSION) {
        return Err(Error::UnsupportedInput(input.to_path_buf()));
    }

    ctx.activate_library(options.library_path.as_deref())?;

    let output_path = output_path_for(input, options.output_dir.as_deref());
    if output_path.exists() && !options.overwrite {
        return Err(Error::OutputExists(output_path));
    }

    let source = read_snapshot(input)?;
    let metadata = RunMetadata::from_tree(source.config(), &options.detector)?;
    let columns = flatten_events(&source, &options.detector)?;
    let events = source.pixel_hits().event_count();
    let hits = columns.len();

    if let Err(err) = write_output(&output_path, &metadata, &columns) {
        // A half-written container is unusable; drop it.
        let _ = std::fs::remove_file(&output_path);
        return Err(err);
    }

    Ok(ConversionSummary {
        output_path,
        events,
        hits,
    })
}

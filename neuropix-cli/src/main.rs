//!
//! Converts Allpix Squared simulation output to an HDF5 file retaining
//! only the NEUROPix-relevant variables.
#![allow(clippy::uninlined_format_args)]

use clap::Parser;
use neuropix_io::{convert, ConversionSummary, ConvertOptions, RunContext};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use thiserror::Error;

/// Result type for CLI operations.
type Result<T> = std::result::Result<T, CliError>;

/// CLI error types.
#[derive(Error, Debug)]
enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("conversion error: {0}")]
    NeuropixIo(#[from] neuropix_io::Error),

    #[error("overwrite declined, output file left untouched")]
    OverwriteDeclined,
}

/// Convert an Allpix Squared event file to HDF5.
#[derive(Parser)]
#[command(name = "neuropix")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the input file. Only accepts one file at a time.
    #[arg(short, long)]
    file_in: PathBuf,

    /// Output directory for the HDF5 file. Defaults to the input's directory.
    #[arg(short = 'o', long)]
    dir_out: Option<PathBuf>,

    /// Path to the libAllpixObjects library (generally in allpix-squared/lib/).
    #[arg(short = 'l', long)]
    lib_allpix_objects: Option<PathBuf>,

    /// Detector whose branches are converted.
    #[arg(long, default_value = "timepix")]
    detector: String,

    /// Truncate an existing output file without prompting.
    #[arg(short = 'y', long)]
    overwrite: bool,

    /// Print the contents of the output HDF5 after conversion.
    #[arg(short = 'd', long)]
    diagnostics: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    println!("Reading input");
    let mut options = ConvertOptions {
        detector: cli.detector,
        library_path: cli.lib_allpix_objects,
        output_dir: cli.dir_out,
        overwrite: cli.overwrite,
    };

    println!("Converting to HDF5");
    let mut ctx = RunContext::new();
    let summary = match convert(&mut ctx, &cli.file_in, &options) {
        Ok(summary) => summary,
        Err(neuropix_io::Error::OutputExists(path)) => {
            if !confirm_overwrite(&path)? {
                return Err(CliError::OverwriteDeclined);
            }
            options.overwrite = true;
            convert(&mut ctx, &cli.file_in, &options)?
        }
        Err(err) => return Err(err.into()),
    };

    println!(
        "Created output HDF5 file: {} ({} events, {} hits)",
        summary.output_path.display(),
        summary.events,
        summary.hits
    );

    if cli.diagnostics {
        print_diagnostics(&summary)?;
    }

    Ok(())
}

/// Asks on stderr whether an existing output file may be truncated.
fn confirm_overwrite(path: &std::path::Path) -> Result<bool> {
    eprint!(
        "Output file {} already exists. Press enter to truncate or type 'n' to abort: ",
        path.display()
    );
    io::stderr().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let answer = line.trim().to_lowercase();
    Ok(answer.is_empty() || answer == "y" || answer == "yes")
}

/// Reads the output back and prints every dataset.
fn print_diagnostics(summary: &ConversionSummary) -> Result<()> {
    let contents = neuropix_io::read_output(&summary.output_path)?;
    let meta = &contents.metadata;

    println!("Found HDF5 contents:");
    println!("in METADATA:");
    println!("number_of_events: {}", meta.number_of_events);
    println!("number_of_particles: {}", meta.number_of_particles);
    println!("particle_type: {}", meta.particle_type);
    println!("source_energy_value: {}", meta.source_energy_value);
    println!("source_energy_units: {}", meta.source_energy_units);
    println!("threshold_value: {}", meta.threshold_value);
    println!("threshold_units: {}", meta.threshold_units);
    println!("threshold_smearing: {}", meta.threshold_smearing);
    println!("tdc_offset: {}", meta.tdc_offset);
    println!("in DATA:");
    println!("event_number: {:?}", contents.data.event_number);
    println!("hit_x: {:?}", contents.data.x);
    println!("hit_y: {:?}", contents.data.y);
    println!("hit_time: {:?}", contents.data.time);
    println!("{} pixel hit events", contents.data.len());

    Ok(())
}

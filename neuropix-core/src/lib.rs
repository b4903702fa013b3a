//! neuropix-core: Core types and projection algorithms for converting
//! Allpix Squared simulation output into NEUROPix analysis arrays.
//!
//! This crate is purely in-memory: the configuration tree, the
//! value-with-unit splitter, the simulation source model, and the
//! ragged-to-flat hit transformation. File and HDF5 concerns live in
//! `neuropix-io`.

pub mod config;
pub mod error;
pub mod flatten;
pub mod hit;
pub mod source;
pub mod units;

pub use config::{ConfigTree, RunMetadata};
pub use error::{Error, Result};
pub use flatten::flatten_events;
pub use hit::HitColumns;
pub use source::{
    Collection, McParticle, McTrack, PixelCharge, PixelHit, SimulationData, SimulationSource,
    GLOBAL_BRANCH,
};
pub use units::split_value_unit;

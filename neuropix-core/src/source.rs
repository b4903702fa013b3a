//! In-memory model of the simulation's record collections.
//!
//! The upstream engine's object model is collaborator-owned; this module
//! models only what the conversion reads: a configuration tree plus four
//! event-synchronized record collections, each sub-divided by detector
//! branch name. [`SimulationSource`] is the seam where an engine-backed
//! reader plugs in; [`SimulationData`] is the concrete in-memory form
//! used by the snapshot backend and by tests.

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::ConfigTree;

/// Reserved branch name of the track collection.
pub const GLOBAL_BRANCH: &str = "global";

/// One pixel-level detection within an event.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PixelHit {
    /// Pixel column index.
    pub x: i32,
    /// Pixel row index.
    pub y: i32,
    /// Global timestamp of the hit.
    pub global_time: f64,
}

/// Charge collected on one pixel within an event.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PixelCharge {
    /// Collected charge in electrons.
    pub charge: i64,
}

/// One Monte Carlo particle within an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct McParticle {
    /// PDG particle code.
    pub particle_id: i32,
}

/// One Monte Carlo track within an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct McTrack {
    /// PDG particle code of the tracked particle.
    pub particle_id: i32,
}

/// A record collection sub-divided by detector branch name.
///
/// Each branch holds one entry list per event: `branches[name][iev]` is
/// the records of event `iev` for that detector.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Collection<T> {
    branches: BTreeMap<String, Vec<Vec<T>>>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            branches: BTreeMap::new(),
        }
    }
}

impl<T> Collection<T> {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a branch with its per-event entry lists.
    pub fn insert_branch(&mut self, name: impl Into<String>, entries: Vec<Vec<T>>) {
        self.branches.insert(name.into(), entries);
    }

    /// Resolves a branch by detector name.
    #[must_use]
    pub fn branch(&self, name: &str) -> Option<&[Vec<T>]> {
        self.branches.get(name).map(Vec::as_slice)
    }

    /// Number of events, taken from the longest branch.
    #[must_use]
    pub fn event_count(&self) -> usize {
        self.branches
            .values()
            .map(Vec::len)
            .max()
            .unwrap_or_default()
    }
}

/// Read-only view of an opened simulation input.
pub trait SimulationSource {
    /// The run's configuration subtree.
    fn config(&self) -> &ConfigTree;

    /// Pixel hit collection, keyed by detector name.
    fn pixel_hits(&self) -> &Collection<PixelHit>;

    /// Pixel charge collection, keyed by detector name.
    fn pixel_charges(&self) -> &Collection<PixelCharge>;

    /// Monte Carlo particle collection, keyed by detector name.
    fn mc_particles(&self) -> &Collection<McParticle>;

    /// Monte Carlo track collection, keyed by [`GLOBAL_BRANCH`].
    fn mc_tracks(&self) -> &Collection<McTrack>;
}

/// Complete in-memory simulation input.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SimulationData {
    pub config: ConfigTree,
    pub pixel_hits: Collection<PixelHit>,
    pub pixel_charges: Collection<PixelCharge>,
    pub mc_particles: Collection<McParticle>,
    pub mc_tracks: Collection<McTrack>,
}

impl SimulationSource for SimulationData {
    fn config(&self) -> &ConfigTree {
        &self.config
    }

    fn pixel_hits(&self) -> &Collection<PixelHit> {
        &self.pixel_hits
    }

    fn pixel_charges(&self) -> &Collection<PixelCharge> {
        &self.pixel_charges
    }

    fn mc_particles(&self) -> &Collection<McParticle> {
        &self.mc_particles
    }

    fn mc_tracks(&self) -> &Collection<McTrack> {
        &self.mc_tracks
    }
}

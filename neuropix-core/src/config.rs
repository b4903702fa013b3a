//! Typed access to the simulation's nested configuration tree and the
//! eager projection of run metadata.

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::units::split_value_unit;

/// Section holding the global simulation parameters.
pub const SECTION_ALLPIX: &str = "Allpix";
/// Section holding the particle-source parameters.
pub const SECTION_DEPOSITION: &str = "DepositionGeant4";
/// Section-name prefix for the per-detector digitizer parameters.
pub const SECTION_DIGITIZER_PREFIX: &str = "DefaultDigitizer";

/// The simulation's string-keyed configuration tree: section name to
/// key/value map. All values are stored as strings, exactly as the
/// simulation wrote them; numeric interpretation happens at projection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConfigTree {
    sections: BTreeMap<String, BTreeMap<String, String>>,
}

impl ConfigTree {
    /// Creates an empty configuration tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts one key/value pair, creating the section if needed.
    pub fn insert(
        &mut self,
        section: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.sections
            .entry(section.into())
            .or_default()
            .insert(key.into(), value.into());
    }

    /// Fetches a raw string value by two-level key.
    ///
    /// # Errors
    /// Returns an error if the section or the key is absent.
    pub fn get(&self, section: &str, key: &str) -> Result<&str> {
        let entries = self
            .sections
            .get(section)
            .ok_or_else(|| Error::MissingSection(section.to_string()))?;
        entries
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| Error::MissingKey {
                section: section.to_string(),
                key: key.to_string(),
            })
    }

    /// Fetches a value and parses it as a floating-point number.
    ///
    /// # Errors
    /// Returns an error if the key is absent or the value is not numeric.
    pub fn get_f64(&self, section: &str, key: &str) -> Result<f64> {
        let raw = self.get(section, key)?;
        raw.trim().parse::<f64>().map_err(|_| Error::InvalidNumber {
            section: section.to_string(),
            key: key.to_string(),
            value: raw.to_string(),
        })
    }
}

/// Run metadata projected from the configuration tree.
///
/// All fields are scalar, projected once at conversion start and written
/// exactly once to the output `metadata` group. Counts are stored as
/// floats to match the output dataset types.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RunMetadata {
    pub number_of_events: f64,
    pub number_of_particles: f64,
    pub particle_type: String,
    pub source_energy_value: f64,
    pub source_energy_units: String,
    pub threshold_value: f64,
    pub threshold_units: String,
    pub threshold_smearing: f64,
    pub tdc_offset: String,
}

impl RunMetadata {
    /// Number of scalar datasets this metadata projects to.
    pub const FIELD_COUNT: usize = 9;

    /// Projects the nine metadata fields from the configuration tree,
    /// validating every lookup and numeric conversion eagerly.
    ///
    /// The digitizer section is scoped by detector name
    /// (`DefaultDigitizer:<detector>`). The `source_energy` and
    /// `threshold` values are composite "<number><unit>" strings and are
    /// split into value/unit pairs.
    ///
    /// # Errors
    /// Returns an error on any missing section/key or non-numeric value.
    pub fn from_tree(tree: &ConfigTree, detector: &str) -> Result<Self> {
        let digitizer = format!("{SECTION_DIGITIZER_PREFIX}:{detector}");

        let (source_energy_value, source_energy_units) =
            split_value_unit(tree.get(SECTION_DEPOSITION, "source_energy")?);
        let (threshold_value, threshold_units) =
            split_value_unit(tree.get(&digitizer, "threshold")?);

        Ok(Self {
            number_of_events: tree.get_f64(SECTION_ALLPIX, "number_of_events")?,
            number_of_particles: tree.get_f64(SECTION_DEPOSITION, "number_of_particles")?,
            particle_type: tree.get(SECTION_DEPOSITION, "particle_type")?.to_string(),
            source_energy_value,
            source_energy_units,
            threshold_value,
            threshold_units,
            threshold_smearing: tree.get_f64(&digitizer, "threshold_smearing")?,
            tdc_offset: tree.get(&digitizer, "tdc_offset")?.to_string(),
        })
    }
}

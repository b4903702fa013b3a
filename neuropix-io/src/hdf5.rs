//! HDF5 output container: the `metadata` and `data` groups.

use hdf5::types::{H5Type, VarLenUnicode};
use hdf5::{Dataset, File, Group};
use ndarray::ArrayView1;
use neuropix_core::{HitColumns, RunMetadata};
use std::path::Path;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Everything read back from a converted file.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertedContents {
    pub metadata: RunMetadata,
    pub data: HitColumns,
}

/// Writes one complete output container: a `metadata` group with nine
/// scalar shape-`(1,)` datasets and a `data` group with four equal-length
/// 1-D datasets.
///
/// An existing file at `path` is truncated; the overwrite decision is the
/// caller's.
///
/// # Errors
/// Returns an error if the file or any dataset cannot be created.
pub fn write_output(path: &Path, metadata: &RunMetadata, columns: &HitColumns) -> Result<()> {
    let file = File::create(path)?;
    write_metadata_group(&file, metadata)?;
    write_data_group(&file, columns)?;
    Ok(())
}

/// Reads a converted file back, for diagnostics and tests.
///
/// # Errors
/// Returns an error if a group or dataset is missing or malformed.
pub fn read_output(path: &Path) -> Result<ConvertedContents> {
    let file = File::open(path)?;

    let metadata_group = file.group("metadata")?;
    let metadata = RunMetadata {
        number_of_events: read_scalar_f64(&metadata_group, "number_of_events")?,
        number_of_particles: read_scalar_f64(&metadata_group, "number_of_particles")?,
        particle_type: read_scalar_str(&metadata_group, "particle_type")?,
        source_energy_value: read_scalar_f64(&metadata_group, "source_energy_value")?,
        source_energy_units: read_scalar_str(&metadata_group, "source_energy_units")?,
        threshold_value: read_scalar_f64(&metadata_group, "threshold_value")?,
        threshold_units: read_scalar_str(&metadata_group, "threshold_units")?,
        threshold_smearing: read_scalar_f64(&metadata_group, "threshold_smearing")?,
        tdc_offset: read_scalar_str(&metadata_group, "tdc_offset")?,
    };

    let data_group = file.group("data")?;
    let data = HitColumns {
        event_number: read_dataset_vec::<i64>(&data_group, "event_number")?,
        x: read_dataset_vec::<i32>(&data_group, "hit_x")?,
        y: read_dataset_vec::<i32>(&data_group, "hit_y")?,
        time: read_dataset_vec::<f64>(&data_group, "hit_time")?,
    };

    let len = data.event_number.len();
    if data.x.len() != len || data.y.len() != len || data.time.len() != len {
        return Err(Error::InvalidOutput(
            "data group arrays have unequal lengths".to_string(),
        ));
    }

    Ok(ConvertedContents { metadata, data })
}

fn write_metadata_group(file: &File, metadata: &RunMetadata) -> Result<()> {
    let group = file.create_group("metadata")?;

    write_scalar_f64(&group, "number_of_events", metadata.number_of_events)?;
    write_scalar_f64(&group, "number_of_particles", metadata.number_of_particles)?;
    write_scalar_str(&group, "particle_type", &metadata.particle_type)?;
    write_scalar_f64(&group, "source_energy_value", metadata.source_energy_value)?;
    write_scalar_str(&group, "source_energy_units", &metadata.source_energy_units)?;
    write_scalar_f64(&group, "threshold_value", metadata.threshold_value)?;
    write_scalar_str(&group, "threshold_units", &metadata.threshold_units)?;
    write_scalar_f64(&group, "threshold_smearing", metadata.threshold_smearing)?;
    write_scalar_str(&group, "tdc_offset", &metadata.tdc_offset)?;

    Ok(())
}

fn write_data_group(file: &File, columns: &HitColumns) -> Result<()> {
    let group = file.create_group("data")?;

    write_column(&group, "event_number", &columns.event_number)?;
    write_column(&group, "hit_x", &columns.x)?;
    write_column(&group, "hit_y", &columns.y)?;
    write_column(&group, "hit_time", &columns.time)?;

    Ok(())
}

fn create_fixed_dataset<T: H5Type>(group: &Group, name: &str, len: usize) -> Result<Dataset> {
    Ok(group.new_dataset::<T>().shape((len,)).create(name)?)
}

fn write_column<T: H5Type>(group: &Group, name: &str, values: &[T]) -> Result<()> {
    let dataset = create_fixed_dataset::<T>(group, name, values.len())?;
    dataset.write(ArrayView1::from(values))?;
    Ok(())
}

fn write_scalar_f64(group: &Group, name: &str, value: f64) -> Result<()> {
    write_column(group, name, &[value])
}

fn write_scalar_str(group: &Group, name: &str, value: &str) -> Result<()> {
    let value = to_var_len_unicode(value)?;
    write_column(group, name, &[value])
}

fn read_dataset_vec<T: H5Type>(group: &Group, name: &str) -> Result<Vec<T>> {
    let dataset = group.dataset(name)?;
    Ok(dataset.read_raw::<T>()?)
}

fn read_scalar_f64(group: &Group, name: &str) -> Result<f64> {
    let values = read_dataset_vec::<f64>(group, name)?;
    values
        .first()
        .copied()
        .ok_or_else(|| Error::InvalidOutput(format!("empty scalar dataset: {name}")))
}

fn read_scalar_str(group: &Group, name: &str) -> Result<String> {
    let values = read_dataset_vec::<VarLenUnicode>(group, name)?;
    values
        .first()
        .map(ToString::to_string)
        .ok_or_else(|| Error::InvalidOutput(format!("empty scalar dataset: {name}")))
}

fn to_var_len_unicode(value: &str) -> Result<VarLenUnicode> {
    VarLenUnicode::from_str(value)
        .map_err(|e| Error::InvalidOutput(format!("invalid utf-8 string value: {e}")))
}

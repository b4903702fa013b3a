//! Error types for neuropix-core.

use thiserror::Error;

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for projection and flattening.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration section missing from the input tree.
    #[error("missing configuration section: [{0}]")]
    MissingSection(String),

    /// Configuration key missing within a section.
    #[error("missing configuration key: [{section}] {key}")]
    MissingKey { section: String, key: String },

    /// A configuration value could not be parsed as a number.
    #[error("non-numeric value for [{section}] {key}: {value:?}")]
    InvalidNumber {
        section: String,
        key: String,
        value: String,
    },

    /// The requested detector branch does not exist in a collection.
    #[error("cannot find {collection} branch with detector name: {detector}")]
    DetectorNotFound {
        collection: &'static str,
        detector: String,
    },

    /// A collection's branch has a different event count than the hit
    /// collection it must stay synchronized with.
    #[error("{collection} branch has {actual} entries, expected {expected}")]
    DesynchronizedCollection {
        collection: &'static str,
        expected: usize,
        actual: usize,
    },
}

//! Resolution and one-time activation of the Allpix objects library.
//!
//! The native library holds the record-type definitions the engine-backed
//! reader needs. Resolution probes a fixed set of candidates; activation
//! is gated by an idempotency flag held in an explicit [`RunContext`]
//! rather than ambient global state.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Fixed system-wide install location of the objects library.
pub const SYSTEM_LIBRARY_PATH: &str = "/opt/allpix-squared/lib/libAllpixObjects.so";

const INSTALL_RELATIVE_PATH: &str = "../opt/allpix-squared/lib/libAllpixObjects.so";

/// Locates the Allpix objects library.
///
/// An explicit path must exist as given. Otherwise the candidates are
/// probed in order: the install-relative location next to the running
/// binary, then [`SYSTEM_LIBRARY_PATH`]. The first existing candidate
/// wins.
///
/// # Errors
/// Returns an error if an explicit path is missing, or no probed
/// candidate exists.
pub fn resolve_object_library(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        if path.is_file() {
            return Ok(path.to_path_buf());
        }
        return Err(Error::LibraryNotFound(path.to_path_buf()));
    }

    if let Some(candidate) = install_relative_candidate() {
        if candidate.is_file() {
            return Ok(candidate);
        }
    }

    let system = PathBuf::from(SYSTEM_LIBRARY_PATH);
    if system.is_file() {
        return Ok(system);
    }

    Err(Error::NoLibraryCandidate)
}

fn install_relative_candidate() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    Some(exe.parent()?.join(INSTALL_RELATIVE_PATH))
}

/// Per-run resource state.
///
/// Owns the activation of the objects library for one conversion run:
/// activation happens at most once, and repeated calls return the
/// already-resolved path.
#[derive(Debug, Default)]
pub struct RunContext {
    library: Option<PathBuf>,
}

impl RunContext {
    /// Creates a context with no library activated.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the activated library path, if any.
    #[must_use]
    pub fn library(&self) -> Option<&Path> {
        self.library.as_deref()
    }

    /// Resolves and activates the objects library, once per context.
    ///
    /// # Errors
    /// Returns an error if no library can be resolved.
    pub fn activate_library(&mut self, explicit: Option<&Path>) -> Result<&Path> {
        if self.library.is_none() {
            self.library = Some(resolve_object_library(explicit)?);
        }
        // Just written above when it was empty.
        self.library.as_deref().ok_or(Error::NoLibraryCandidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_explicit_library_must_exist() {
        let err = resolve_object_library(Some(Path::new("/nonexistent/libAllpixObjects.so")))
            .unwrap_err();
        assert!(matches!(err, Error::LibraryNotFound(_)));
    }

    #[test]
    fn test_explicit_library_wins() {
        let file = NamedTempFile::new().unwrap();
        let resolved = resolve_object_library(Some(file.path())).unwrap();
        assert_eq!(resolved, file.path());
    }

    #[test]
    fn test_activation_is_idempotent() {
        let file = NamedTempFile::new().unwrap();
        let mut ctx = RunContext::new();
        assert!(ctx.library().is_none());

        let first = ctx.activate_library(Some(file.path())).unwrap().to_path_buf();
        // Second call must not re-resolve: a now-bogus explicit path is
        // ignored once a library is active.
        let second = ctx
            .activate_library(Some(Path::new("/nonexistent/lib.so")))
            .unwrap()
            .to_path_buf();
        assert_eq!(first, second);
        assert_eq!(ctx.library(), Some(file.path()));
    }
}

//! Ordered candidate resolution.

use std::path::{Path, PathBuf};

/// Outcome of resolving a candidate list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// The first existing directory and its position in the candidate list.
    Found { path: PathBuf, rank: usize },
    /// No candidate is an existing directory.
    NotFound,
}

impl Resolution {
    /// The resolved path, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Found { path, .. } => Some(path),
            Self::NotFound => None,
        }
    }
}

/// Returns the first candidate that exists and is a directory.
///
/// Candidates are checked strictly in the given order; the result depends
/// only on that order and the file system state at call time.
pub fn resolve<P: AsRef<Path>>(candidates: &[P]) -> Resolution {
    for (rank, candidate) in candidates.iter().enumerate() {
        let candidate = candidate.as_ref();
        if candidate.is_dir() {
            log::debug!("Resolved candidate #{} {}", rank, candidate.display());
            return Resolution::Found {
                path: candidate.to_path_buf(),
                rank,
            };
        }
        log::debug!("Candidate #{} not found: {}", rank, candidate.display());
    }
    Resolution::NotFound
}

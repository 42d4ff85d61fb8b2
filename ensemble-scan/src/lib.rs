//! Candidate discovery for `ensemble-scan`.
//!
//! `scan_workspace(root, skip_names)` lists the immediate children of a
//! workspace root, keeps only directories, drops every name in the skip set,
//! and returns the rest as [`ProjectCandidate`]s sorted by name. Files are
//! ignored; skip-set entries are never probed, never built, never collected.
//!
//! Buildability and collectibility are deliberately *not* decided here;
//! each phase probes candidates itself at the moment it needs the answer.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use ensemble_core::types::{ProjectCandidate, ProjectName};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Errors from workspace scanning. Any of these is fatal to the whole run:
/// without a root listing there is nothing to orchestrate.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The workspace root does not exist or is not a directory.
    #[error("workspace root '{path}' is not a readable directory")]
    RootNotFound { path: PathBuf },

    /// Underlying I/O failure (permission denied, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Enumerate the project candidates directly under `root`.
///
/// Returns `ScanError::RootNotFound` when `root` is missing or not a
/// directory. The result is sorted by candidate name so runs are
/// deterministic across platforms.
pub fn scan_workspace(
    root: &Path,
    skip_names: &BTreeSet<String>,
) -> Result<Vec<ProjectCandidate>, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::RootNotFound {
            path: root.to_path_buf(),
        });
    }

    let mut candidates: Vec<ProjectCandidate> = fs::read_dir(root)?
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().map(|t| t.is_dir()).unwrap_or(false))
        .map(|e| {
            let name = e.file_name().to_string_lossy().into_owned();
            ProjectCandidate {
                name: ProjectName::from(name),
                path: e.path(),
            }
        })
        .filter(|c| !skip_names.contains(&c.name.0))
        .collect();
    candidates.sort_by(|a, b| a.name.0.cmp(&b.name.0));
    Ok(candidates)
}

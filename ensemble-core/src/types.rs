//! Domain types for the ensemble workspace walker.
//!
//! All path fields use `PathBuf`; never `&str` or `String` for filesystem
//! paths. Candidate probes hit the filesystem at call time; nothing is
//! cached between the build and collection phases.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Command line run in every buildable project directory when none is
/// configured explicitly.
pub const DEFAULT_BUILD_COMMAND: &str = "pnpm run build";

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A strongly-typed name for a project directory under the workspace root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectName(pub String);

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for ProjectName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ProjectName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// The external command invoked in each buildable candidate directory.
///
/// The whole string is handed to the platform shell (`sh -c` on Unix,
/// `cmd /C` on Windows), so `pnpm run build`, `npm run build -- --silent`
/// and similar lines all work unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildCommand(pub String);

impl BuildCommand {
    /// The raw command line.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for BuildCommand {
    fn default() -> Self {
        Self(DEFAULT_BUILD_COMMAND.to_owned())
    }
}

impl fmt::Display for BuildCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for BuildCommand {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(ConfigError::EmptyBuildCommand);
        }
        Ok(Self(s.to_owned()))
    }
}

// ---------------------------------------------------------------------------
// Candidates
// ---------------------------------------------------------------------------

/// One immediate subdirectory of the workspace root that survived the skip
/// filter.
///
/// Whether it is buildable or collectible is not a stored flag: both are
/// point-in-time filesystem probes, so the collection phase sees output
/// directories that the build phase itself created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectCandidate {
    pub name: ProjectName,
    /// Path to the candidate directory on disk.
    pub path: PathBuf,
}

impl ProjectCandidate {
    pub fn new(name: impl Into<ProjectName>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// `<candidate>/<manifest_name>`. Pure path join, no probe.
    pub fn manifest_path(&self, manifest_name: &str) -> PathBuf {
        self.path.join(manifest_name)
    }

    /// True when the manifest file exists directly inside the candidate.
    pub fn has_manifest(&self, manifest_name: &str) -> bool {
        self.manifest_path(manifest_name).is_file()
    }

    /// `<candidate>/<build_output_name>`. Pure path join, no probe.
    pub fn build_output_path(&self, build_output_name: &str) -> PathBuf {
        self.path.join(build_output_name)
    }

    /// True when the build-output directory exists directly inside the
    /// candidate. Probed fresh on every call.
    pub fn has_build_output(&self, build_output_name: &str) -> bool {
        self.build_output_path(build_output_name).is_dir()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

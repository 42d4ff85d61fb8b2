//! Workspace configuration and its documented defaults.
//!
//! Defaults target a pnpm-style monorepo:
//!
//! | field               | default                                      |
//! |---------------------|----------------------------------------------|
//! | `root`              | current working directory                    |
//! | `output_dir`        | `<root>/dist`                                |
//! | `skip_names`        | `node_modules`, `dist`, `.git`, `.pnpm`      |
//! | `manifest_name`     | `package.json`                               |
//! | `build_output_name` | `dist`                                       |
//! | `build_command`     | `pnpm run build`                             |
//!
//! The output directory may coincide with or sit below the root; the
//! default does exactly that and the pipeline tolerates it (the `dist`
//! entry is in the skip set, so the collected tree is never treated as a
//! candidate itself).

use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::types::BuildCommand;

/// Directory names that are never treated as project candidates.
pub const DEFAULT_SKIP_NAMES: [&str; 4] = ["node_modules", "dist", ".git", ".pnpm"];

/// File whose presence marks a candidate directory as buildable.
pub const DEFAULT_MANIFEST_NAME: &str = "package.json";

/// Per-project directory produced by a build, collected into the output tree.
pub const DEFAULT_BUILD_OUTPUT_NAME: &str = "dist";

/// Caller-supplied configuration for one orchestrator run.
///
/// There is no module-level state: construct a value, adjust fields as
/// needed, and pass it to `ensemble_build::pipeline::run`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceConfig {
    /// Directory whose immediate subdirectories are the project candidates.
    pub root: PathBuf,
    /// Where collected build outputs land, one subtree per project.
    pub output_dir: PathBuf,
    /// Directory names excluded from candidacy entirely (never probed,
    /// never built, never collected).
    pub skip_names: BTreeSet<String>,
    /// Manifest file name probed inside each candidate.
    pub manifest_name: String,
    /// Build-output directory name probed inside each candidate.
    pub build_output_name: String,
    /// Command run (via the platform shell) in each buildable candidate.
    pub build_command: BuildCommand,
}

impl WorkspaceConfig {
    /// Configuration rooted at `root`, with every other field defaulted.
    pub fn for_root(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let output_dir = root.join(DEFAULT_BUILD_OUTPUT_NAME);
        Self {
            root,
            output_dir,
            skip_names: default_skip_names(),
            manifest_name: DEFAULT_MANIFEST_NAME.to_owned(),
            build_output_name: DEFAULT_BUILD_OUTPUT_NAME.to_owned(),
            build_command: BuildCommand::default(),
        }
    }

    /// Configuration rooted at the current working directory.
    pub fn from_cwd() -> Result<Self, ConfigError> {
        Ok(Self::for_root(std::env::current_dir()?))
    }
}

/// The default skip set as an owned collection.
pub fn default_skip_names() -> BTreeSet<String> {
    DEFAULT_SKIP_NAMES.iter().map(|s| s.to_string()).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

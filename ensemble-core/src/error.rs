//! Error types for ensemble-core.

use thiserror::Error;

/// All errors that can arise while resolving a workspace configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `std::env::current_dir()` failed, so no default root can be derived.
    #[error("cannot determine current working directory: {0}")]
    CurrentDir(#[from] std::io::Error),

    /// The configured build command was empty or all whitespace.
    #[error("build command must not be empty")]
    EmptyBuildCommand,
}

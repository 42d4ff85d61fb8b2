//! Domain types and configuration for the ensemble workspace.
//!
//! Public API surface:
//! - [`types`] — [`ProjectName`], [`ProjectCandidate`], [`BuildCommand`]
//! - [`config`] — [`WorkspaceConfig`] and its documented defaults
//! - [`error`] — [`ConfigError`]

pub mod config;
pub mod error;
pub mod types;

pub use config::WorkspaceConfig;
pub use error::ConfigError;
pub use types::{BuildCommand, ProjectCandidate, ProjectName};

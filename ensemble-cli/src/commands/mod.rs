//! Subcommand implementations for the `ensemble` binary.

pub mod build;
pub mod scan;

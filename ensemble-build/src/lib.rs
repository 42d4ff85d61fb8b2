//! # ensemble-build
//!
//! Build runner, output collector, and the two-phase pipeline that drives
//! them.
//!
//! Call [`pipeline::run`] to build every eligible project under a workspace
//! root and collect the build outputs into one directory, or
//! [`pipeline::run_with_events`] to observe progress while it happens.

pub mod collector;
pub mod error;
pub mod pipeline;
pub mod runner;

pub use collector::{collect_output, CollectRecord, CollectStatus};
pub use error::PipelineError;
pub use pipeline::{run, run_with_events, PipelineEvent, PipelineReport};
pub use runner::{run_build, BuildRecord, BuildStatus};

//! Two-phase build-and-collect pipeline.
//!
//! One enumeration of the workspace root feeds both phases. The build phase
//! runs every buildable candidate to completion, recording failures and
//! moving on. The collection phase then re-probes each candidate for a
//! build-output directory, so it picks up directories the build phase itself
//! just created, and copies each one into the unified output tree.

use std::fs;

use chrono::{DateTime, Utc};

use ensemble_core::{ProjectName, WorkspaceConfig};
use ensemble_scan::scan_workspace;

use crate::collector::{self, CollectRecord, CollectStatus};
use crate::error::{io_err, PipelineError};
use crate::runner::{self, BuildRecord, BuildStatus};

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Progress notifications emitted while the pipeline runs.
///
/// The CLI turns these into console lines as they happen. Ordering matters
/// for [`PipelineEvent::BuildStarted`]: it fires before the child process is
/// spawned, so the announcement reaches the terminal ahead of the child's
/// inherited stdio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineEvent {
    BuildStarted { project: ProjectName },
    BuildSucceeded { project: ProjectName },
    BuildFailed { project: ProjectName, message: String },
    WouldBuild { project: ProjectName },
    OutputCollected { project: ProjectName, files: usize },
    WouldCollect { project: ProjectName },
    Completed,
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Everything a pipeline run did, in phase order.
#[derive(Debug)]
pub struct PipelineReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub builds: Vec<BuildRecord>,
    pub collections: Vec<CollectRecord>,
}

impl PipelineReport {
    pub fn builds_succeeded(&self) -> usize {
        self.builds.iter().filter(|b| b.succeeded()).count()
    }

    pub fn builds_failed(&self) -> usize {
        self.builds.iter().filter(|b| b.failed()).count()
    }

    /// Total files copied across all collection steps.
    pub fn files_collected(&self) -> usize {
        self.collections
            .iter()
            .map(|c| match c.status {
                CollectStatus::Collected { files } => files,
                CollectStatus::WouldCollect => 0,
            })
            .sum()
    }
}

// ---------------------------------------------------------------------------
// run
// ---------------------------------------------------------------------------

/// Run the full pipeline with the given configuration.
///
/// This is the canonical entrypoint for both `ensemble build` and library
/// embedders that do not care about progress events.
pub fn run(config: &WorkspaceConfig, dry_run: bool) -> Result<PipelineReport, PipelineError> {
    run_with_events(config, dry_run, &mut |_| {})
}

/// Run the full pipeline, reporting progress through `on_event`.
///
/// Order of side effects:
/// 1. the output directory is created, before any build command runs;
/// 2. the root is enumerated once;
/// 3. every candidate with a manifest is built, in name order;
/// 4. every candidate with a build-output directory, probed fresh after the
///    build phase, is collected;
/// 5. [`PipelineEvent::Completed`] fires and the report is returned.
///
/// A failing build never aborts the run. Every other filesystem error does.
pub fn run_with_events(
    config: &WorkspaceConfig,
    dry_run: bool,
    on_event: &mut dyn FnMut(PipelineEvent),
) -> Result<PipelineReport, PipelineError> {
    let started_at = Utc::now();

    if dry_run {
        tracing::info!(
            "[dry-run] would create output directory: {}",
            config.output_dir.display()
        );
    } else {
        fs::create_dir_all(&config.output_dir).map_err(|e| io_err(&config.output_dir, e))?;
        tracing::debug!("output directory ready: {}", config.output_dir.display());
    }

    let candidates = scan_workspace(&config.root, &config.skip_names)?;
    tracing::debug!(
        "{} candidate(s) under {}",
        candidates.len(),
        config.root.display()
    );

    let mut builds = Vec::new();
    for candidate in &candidates {
        if !candidate.has_manifest(&config.manifest_name) {
            tracing::debug!("skipping {}: no {}", candidate.name, config.manifest_name);
            continue;
        }
        if !dry_run {
            on_event(PipelineEvent::BuildStarted {
                project: candidate.name.clone(),
            });
        }
        let record = runner::run_build(candidate, &config.build_command, dry_run);
        match &record.status {
            BuildStatus::Succeeded => on_event(PipelineEvent::BuildSucceeded {
                project: record.project.clone(),
            }),
            BuildStatus::Failed { message } => on_event(PipelineEvent::BuildFailed {
                project: record.project.clone(),
                message: message.clone(),
            }),
            BuildStatus::WouldBuild => on_event(PipelineEvent::WouldBuild {
                project: record.project.clone(),
            }),
        }
        builds.push(record);
    }

    let mut collections = Vec::new();
    for candidate in &candidates {
        if let Some(record) = collector::collect_output(candidate, config, dry_run)? {
            match &record.status {
                CollectStatus::Collected { files } => on_event(PipelineEvent::OutputCollected {
                    project: record.project.clone(),
                    files: *files,
                }),
                CollectStatus::WouldCollect => on_event(PipelineEvent::WouldCollect {
                    project: record.project.clone(),
                }),
            }
            collections.push(record);
        }
    }

    on_event(PipelineEvent::Completed);

    Ok(PipelineReport {
        started_at,
        finished_at: Utc::now(),
        builds,
        collections,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn empty_root_yields_an_empty_report_and_creates_the_output_dir() {
        let root = TempDir::new().expect("tempdir");
        let config = WorkspaceConfig::for_root(root.path());

        let report = run(&config, false).expect("run");
        assert!(report.builds.is_empty());
        assert!(report.collections.is_empty());
        assert!(config.output_dir.is_dir());
        assert!(report.finished_at >= report.started_at);
    }

    #[test]
    fn dry_run_does_not_create_the_output_dir() {
        let root = TempDir::new().expect("tempdir");
        let config = WorkspaceConfig::for_root(root.path());

        run(&config, true).expect("run");
        assert!(!config.output_dir.exists());
    }

    #[test]
    fn manifest_less_candidates_are_never_built() {
        let root = TempDir::new().expect("tempdir");
        fs::create_dir_all(root.path().join("projB")).expect("mkdir");
        let config = WorkspaceConfig::for_root(root.path());

        let report = run(&config, false).expect("run");
        assert!(report.builds.is_empty());
    }

    #[test]
    fn completed_is_always_the_final_event() {
        let root = TempDir::new().expect("tempdir");
        let config = WorkspaceConfig::for_root(root.path());

        let mut events = Vec::new();
        run_with_events(&config, false, &mut |e| events.push(e)).expect("run");
        assert_eq!(events.last(), Some(&PipelineEvent::Completed));
    }
}

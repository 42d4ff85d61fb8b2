//! `ensemble build` — run every project build and collect the outputs.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;

use ensemble_build::{pipeline, BuildStatus, CollectStatus, PipelineEvent, PipelineReport};
use ensemble_core::{BuildCommand, ProjectName, WorkspaceConfig};

/// Arguments for `ensemble build`.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Workspace root to walk (defaults to the current directory).
    pub root: Option<PathBuf>,

    /// Directory collected outputs land in (defaults to `<root>/dist`).
    #[arg(long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Additional directory name to skip; repeatable, extends the default
    /// set (node_modules, dist, .git, .pnpm).
    #[arg(long, value_name = "NAME")]
    pub skip: Vec<String>,

    /// Manifest file whose presence marks a directory buildable.
    #[arg(long, value_name = "FILE")]
    pub manifest: Option<String>,

    /// Per-project build-output directory name to collect.
    #[arg(long, value_name = "DIR")]
    pub build_output: Option<String>,

    /// Build command run in each project, via the platform shell.
    #[arg(long, value_name = "CMD")]
    pub command: Option<BuildCommand>,

    /// Show what would run without spawning builds or writing files.
    #[arg(long)]
    pub dry_run: bool,

    /// Emit a machine-readable JSON report on stdout (progress moves to stderr).
    #[arg(long)]
    pub json: bool,

    /// Exit non-zero when any build fails.
    #[arg(long)]
    pub strict: bool,
}

impl BuildArgs {
    pub fn run(self) -> Result<()> {
        let dry_run = self.dry_run;
        let json = self.json;
        let strict = self.strict;
        let config = self.into_config()?;

        let report =
            pipeline::run_with_events(&config, dry_run, &mut |event| print_event(&event, json))
                .with_context(|| format!("build run failed under '{}'", config.root.display()))?;

        if json {
            print_json(&config, &report, dry_run)?;
        } else {
            print_summary(&report, dry_run);
        }

        if strict && report.builds_failed() > 0 {
            bail!(
                "{} of {} builds failed",
                report.builds_failed(),
                report.builds.len()
            );
        }
        Ok(())
    }

    fn into_config(self) -> Result<WorkspaceConfig> {
        let mut config = match self.root {
            Some(root) => WorkspaceConfig::for_root(root),
            None => WorkspaceConfig::from_cwd().context("failed to resolve workspace root")?,
        };
        if let Some(output) = self.output {
            config.output_dir = output;
        }
        for name in self.skip {
            config.skip_names.insert(name);
        }
        if let Some(manifest) = self.manifest {
            config.manifest_name = manifest;
        }
        if let Some(build_output) = self.build_output {
            config.build_output_name = build_output;
        }
        if let Some(command) = self.command {
            config.build_command = command;
        }
        Ok(config)
    }
}

// ---------------------------------------------------------------------------
// Progress output
// ---------------------------------------------------------------------------

fn print_event(event: &PipelineEvent, json: bool) {
    match event {
        PipelineEvent::BuildStarted { project } => {
            emit(json, format!("building '{project}'..."));
        }
        PipelineEvent::BuildSucceeded { project } => {
            emit(json, format!("{} built '{project}'", "✓".green()));
        }
        PipelineEvent::BuildFailed { project, message } => {
            eprintln!(
                "{} failed to build '{project}': {message}",
                "■".red().bold()
            );
        }
        PipelineEvent::WouldBuild { project } => {
            emit(json, format!("~ would build '{project}'"));
        }
        PipelineEvent::OutputCollected { project, files } => {
            emit(json, format!("{} collected '{project}' ({files} files)", "✓".green()));
        }
        PipelineEvent::WouldCollect { project } => {
            emit(json, format!("~ would collect '{project}'"));
        }
        PipelineEvent::Completed => {}
    }
}

/// With `--json`, stdout is reserved for the report; progress goes to stderr.
fn emit(to_stderr: bool, line: String) {
    if to_stderr {
        eprintln!("{line}");
    } else {
        println!("{line}");
    }
}

fn print_summary(report: &PipelineReport, dry_run: bool) {
    if report.builds.is_empty() && report.collections.is_empty() {
        let prefix = if dry_run { "[dry-run] " } else { "" };
        println!("{prefix}✓ nothing to build or collect");
        return;
    }

    if dry_run {
        println!(
            "[dry-run] ✓ {} would build, {} would collect",
            report.builds.len(),
            report.collections.len()
        );
        return;
    }

    println!(
        "✓ all builds and collections completed ({} built, {} failed, {} files collected)",
        report.builds_succeeded(),
        report.builds_failed(),
        report.files_collected()
    );
}

// ---------------------------------------------------------------------------
// JSON report
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct BuildReportJson {
    root: String,
    output_dir: String,
    command: BuildCommand,
    dry_run: bool,
    started_at: String,
    finished_at: String,
    summary: BuildSummaryJson,
    builds: Vec<BuildRecordJson>,
    collections: Vec<CollectRecordJson>,
}

#[derive(Serialize)]
struct BuildSummaryJson {
    built: usize,
    failed: usize,
    collected: usize,
    files: usize,
}

#[derive(Serialize)]
struct BuildRecordJson {
    project: ProjectName,
    status: String,
    message: Option<String>,
}

#[derive(Serialize)]
struct CollectRecordJson {
    project: ProjectName,
    source: String,
    destination: String,
    status: String,
    files: usize,
}

fn print_json(config: &WorkspaceConfig, report: &PipelineReport, dry_run: bool) -> Result<()> {
    let payload = BuildReportJson {
        root: config.root.display().to_string(),
        output_dir: config.output_dir.display().to_string(),
        command: config.build_command.clone(),
        dry_run,
        started_at: report.started_at.to_rfc3339(),
        finished_at: report.finished_at.to_rfc3339(),
        summary: BuildSummaryJson {
            built: report.builds_succeeded(),
            failed: report.builds_failed(),
            collected: report.collections.len(),
            files: report.files_collected(),
        },
        builds: report
            .builds
            .iter()
            .map(|record| BuildRecordJson {
                project: record.project.clone(),
                status: build_status_key(&record.status).to_string(),
                message: match &record.status {
                    BuildStatus::Failed { message } => Some(message.clone()),
                    _ => None,
                },
            })
            .collect(),
        collections: report
            .collections
            .iter()
            .map(|record| CollectRecordJson {
                project: record.project.clone(),
                source: record.source.display().to_string(),
                destination: record.destination.display().to_string(),
                status: collect_status_key(&record.status).to_string(),
                files: match record.status {
                    CollectStatus::Collected { files } => files,
                    CollectStatus::WouldCollect => 0,
                },
            })
            .collect(),
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&payload).context("failed to serialize build report JSON")?
    );
    Ok(())
}

fn build_status_key(status: &BuildStatus) -> &'static str {
    match status {
        BuildStatus::Succeeded => "succeeded",
        BuildStatus::Failed { .. } => "failed",
        BuildStatus::WouldBuild => "would_build",
    }
}

fn collect_status_key(status: &CollectStatus) -> &'static str {
    match status {
        CollectStatus::Collected { .. } => "collected",
        CollectStatus::WouldCollect => "would_collect",
    }
}

//! `ensemble scan` — candidate visibility without running any build.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use ensemble_core::{ProjectName, WorkspaceConfig};
use ensemble_scan::scan_workspace;

/// Arguments for `ensemble scan`.
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Workspace root to inspect (defaults to the current directory).
    pub root: Option<PathBuf>,

    /// Additional directory name to skip; repeatable, extends the default
    /// set (node_modules, dist, .git, .pnpm).
    #[arg(long, value_name = "NAME")]
    pub skip: Vec<String>,

    /// Manifest file whose presence marks a candidate buildable.
    #[arg(long, value_name = "FILE")]
    pub manifest: Option<String>,

    /// Per-project build-output directory name to look for.
    #[arg(long, value_name = "DIR")]
    pub build_output: Option<String>,

    /// Print the scan as JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

impl ScanArgs {
    pub fn run(self) -> Result<()> {
        let json = self.json;
        let config = self.into_config()?;

        let candidates = scan_workspace(&config.root, &config.skip_names)
            .with_context(|| format!("scan failed under '{}'", config.root.display()))?;

        let rows: Vec<CandidateRow> = candidates
            .iter()
            .map(|candidate| CandidateRow {
                project: candidate.name.clone(),
                path: candidate.path.clone(),
                buildable: candidate.has_manifest(&config.manifest_name),
                has_build_output: candidate.has_build_output(&config.build_output_name),
            })
            .collect();

        if json {
            print_json(rows)?;
            return Ok(());
        }

        print_table(&config, rows);
        Ok(())
    }

    fn into_config(self) -> Result<WorkspaceConfig> {
        let mut config = match self.root {
            Some(root) => WorkspaceConfig::for_root(root),
            None => WorkspaceConfig::from_cwd().context("failed to resolve workspace root")?,
        };
        for name in self.skip {
            config.skip_names.insert(name);
        }
        if let Some(manifest) = self.manifest {
            config.manifest_name = manifest;
        }
        if let Some(build_output) = self.build_output {
            config.build_output_name = build_output;
        }
        Ok(config)
    }
}

#[derive(Debug, Clone)]
struct CandidateRow {
    project: ProjectName,
    path: PathBuf,
    buildable: bool,
    has_build_output: bool,
}

// ---------------------------------------------------------------------------
// JSON output
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct ScanReportJson {
    summary: ScanSummaryJson,
    candidates: Vec<CandidateJson>,
}

#[derive(Serialize)]
struct ScanSummaryJson {
    candidates: usize,
    buildable: usize,
    with_build_output: usize,
}

#[derive(Serialize)]
struct CandidateJson {
    project: ProjectName,
    path: String,
    buildable: bool,
    has_build_output: bool,
}

fn print_json(rows: Vec<CandidateRow>) -> Result<()> {
    let payload = ScanReportJson {
        summary: ScanSummaryJson {
            candidates: rows.len(),
            buildable: rows.iter().filter(|r| r.buildable).count(),
            with_build_output: rows.iter().filter(|r| r.has_build_output).count(),
        },
        candidates: rows
            .into_iter()
            .map(|row| CandidateJson {
                project: row.project,
                path: row.path.display().to_string(),
                buildable: row.buildable,
                has_build_output: row.has_build_output,
            })
            .collect(),
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&payload).context("failed to serialize scan JSON")?
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Table output
// ---------------------------------------------------------------------------

#[derive(Tabled)]
struct CandidateTableRow {
    #[tabled(rename = "project")]
    project: String,
    #[tabled(rename = "buildable")]
    buildable: String,
    #[tabled(rename = "build output")]
    build_output: String,
    #[tabled(rename = "path")]
    path: String,
}

fn print_table(config: &WorkspaceConfig, rows: Vec<CandidateRow>) {
    let buildable = rows.iter().filter(|r| r.buildable).count();
    println!(
        "Ensemble v{} | root {} | {} candidates | {} buildable",
        env!("CARGO_PKG_VERSION"),
        config.root.display(),
        rows.len(),
        buildable,
    );

    if rows.is_empty() {
        println!("No candidate directories under {}.", config.root.display());
        return;
    }

    println!(
        "Probing for '{}' and '{}/' in each candidate.",
        config.manifest_name, config.build_output_name
    );

    let table_rows: Vec<CandidateTableRow> = rows
        .into_iter()
        .map(|row| CandidateTableRow {
            project: row.project.0,
            buildable: mark(row.buildable),
            build_output: mark(row.has_build_output),
            path: row.path.display().to_string(),
        })
        .collect();
    let mut table = Table::new(table_rows);
    table.with(Style::rounded());
    println!("{table}");

    if buildable > 0 {
        println!("Run 'ensemble build' to build and collect these projects.");
    }
}

fn mark(present: bool) -> String {
    if present { "yes" } else { "-" }.to_string()
}

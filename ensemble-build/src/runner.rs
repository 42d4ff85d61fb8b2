//! Build command execution for a single candidate.
//!
//! The command line is handed to the platform shell and runs with the
//! candidate directory as its working directory. Stdio is inherited, so the
//! child's output streams straight through to the orchestrator's terminal.
//! The call blocks until the child exits; there is no timeout, so a hung
//! build blocks the run.

use std::process::{Command, ExitStatus};

use ensemble_core::{BuildCommand, ProjectCandidate, ProjectName};

// ---------------------------------------------------------------------------
// Build result
// ---------------------------------------------------------------------------

/// Outcome of one build command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildStatus {
    /// The command exited with status 0.
    Succeeded,
    /// The command exited non-zero, was killed, or could not be launched.
    ///
    /// This is a recorded outcome, not an error; the pipeline always moves
    /// on to the next candidate.
    Failed { message: String },
    /// `--dry-run` mode: the command *would* have run, nothing was spawned.
    WouldBuild,
}

/// Record of a single build invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRecord {
    pub project: ProjectName,
    pub status: BuildStatus,
}

impl BuildRecord {
    pub fn succeeded(&self) -> bool {
        self.status == BuildStatus::Succeeded
    }

    pub fn failed(&self) -> bool {
        matches!(self.status, BuildStatus::Failed { .. })
    }
}

// ---------------------------------------------------------------------------
// run_build
// ---------------------------------------------------------------------------

#[cfg(unix)]
fn shell_command(command_line: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command_line);
    cmd
}

#[cfg(windows)]
fn shell_command(command_line: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(command_line);
    cmd
}

/// Run the build command in the candidate directory and wait for it.
///
/// Any failure mode of the child, from a non-zero exit to the shell not
/// launching at all, is folded into [`BuildStatus::Failed`] with a
/// human-readable message.
pub fn run_build(
    candidate: &ProjectCandidate,
    command: &BuildCommand,
    dry_run: bool,
) -> BuildRecord {
    if dry_run {
        tracing::info!("[dry-run] would build: {}", candidate.name);
        return BuildRecord {
            project: candidate.name.clone(),
            status: BuildStatus::WouldBuild,
        };
    }

    tracing::debug!("running '{}' in {}", command, candidate.path.display());

    let status = match shell_command(command.as_str())
        .current_dir(&candidate.path)
        .status()
    {
        Ok(exit) if exit.success() => {
            tracing::info!("built: {}", candidate.name);
            BuildStatus::Succeeded
        }
        Ok(exit) => {
            let message = exit_message(exit);
            tracing::warn!("build failed: {}: {}", candidate.name, message);
            BuildStatus::Failed { message }
        }
        Err(e) => {
            let message = format!("could not launch '{}': {}", command, e);
            tracing::warn!("build failed: {}: {}", candidate.name, message);
            BuildStatus::Failed { message }
        }
    };

    BuildRecord {
        project: candidate.name.clone(),
        status,
    }
}

fn exit_message(exit: ExitStatus) -> String {
    match exit.code() {
        Some(code) => format!("build command exited with status {code}"),
        None => "build command was terminated by a signal".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

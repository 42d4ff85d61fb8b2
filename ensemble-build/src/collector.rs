//! Build-output collection into the unified output tree.

use std::fs;
use std::path::{Path, PathBuf};

use ensemble_core::{ProjectCandidate, ProjectName, WorkspaceConfig};

use crate::error::{io_err, PipelineError};

// ---------------------------------------------------------------------------
// Collect result
// ---------------------------------------------------------------------------

/// Outcome of collecting one candidate's build output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectStatus {
    /// The output tree was copied; `files` counts the files duplicated.
    Collected { files: usize },
    /// `--dry-run` mode: the output tree *would* have been copied.
    WouldCollect,
}

/// Record of a single collection step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectRecord {
    pub project: ProjectName,
    /// The candidate's build-output directory.
    pub source: PathBuf,
    /// `<output>/<name>/<build-output-name>`.
    pub destination: PathBuf,
    pub status: CollectStatus,
}

// ---------------------------------------------------------------------------
// collect_output
// ---------------------------------------------------------------------------

/// Copy one candidate's build-output directory into the unified output tree.
///
/// Returns `Ok(None)` when the candidate has no build-output directory. The
/// probe happens here, at call time, so output directories created by the
/// build phase moments earlier are seen.
///
/// Existing destination content is merged and overwritten, never cleared
/// first, which is what makes repeated runs idempotent.
pub fn collect_output(
    candidate: &ProjectCandidate,
    config: &WorkspaceConfig,
    dry_run: bool,
) -> Result<Option<CollectRecord>, PipelineError> {
    if !candidate.has_build_output(&config.build_output_name) {
        tracing::debug!(
            "nothing to collect for {}: no {}/",
            candidate.name,
            config.build_output_name
        );
        return Ok(None);
    }

    let source = candidate.build_output_path(&config.build_output_name);
    let destination = config
        .output_dir
        .join(&candidate.name.0)
        .join(&config.build_output_name);

    if dry_run {
        tracing::info!("[dry-run] would collect: {}", candidate.name);
        return Ok(Some(CollectRecord {
            project: candidate.name.clone(),
            source,
            destination,
            status: CollectStatus::WouldCollect,
        }));
    }

    let files = copy_dir_recursive(&source, &destination)?;
    tracing::info!("collected: {} ({} files)", candidate.name, files);

    Ok(Some(CollectRecord {
        project: candidate.name.clone(),
        source,
        destination,
        status: CollectStatus::Collected { files },
    }))
}

/// Recursively copy `src` into `dest`, creating `dest` and every ancestor.
///
/// Returns the number of files copied.
fn copy_dir_recursive(src: &Path, dest: &Path) -> Result<usize, PipelineError> {
    fs::create_dir_all(dest).map_err(|e| io_err(dest, e))?;

    let mut files = 0;
    for entry in fs::read_dir(src).map_err(|e| io_err(src, e))? {
        let entry = entry.map_err(|e| io_err(src, e))?;
        let kind = entry.file_type().map_err(|e| io_err(entry.path(), e))?;
        let target = dest.join(entry.file_name());
        if kind.is_dir() {
            files += copy_dir_recursive(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target).map_err(|e| io_err(entry.path(), e))?;
            files += 1;
        }
    }
    Ok(files)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn fixture() -> (TempDir, WorkspaceConfig, ProjectCandidate) {
        let root = TempDir::new().expect("tempdir");
        let config = WorkspaceConfig::for_root(root.path());
        let proj = root.path().join("projA");
        fs::create_dir_all(proj.join("dist").join("assets")).expect("mkdir dist");
        fs::write(proj.join("dist").join("index.html"), "<html>").expect("write");
        fs::write(proj.join("dist").join("assets").join("app.js"), "js").expect("write");
        let candidate = ProjectCandidate::new("projA", proj);
        (root, config, candidate)
    }

    #[test]
    fn absent_output_directory_collects_nothing() {
        let root = TempDir::new().expect("tempdir");
        let config = WorkspaceConfig::for_root(root.path());
        let proj = root.path().join("projB");
        fs::create_dir_all(&proj).expect("mkdir");
        let candidate = ProjectCandidate::new("projB", proj);

        let record = collect_output(&candidate, &config, false).expect("collect");
        assert!(record.is_none());
    }

    #[test]
    fn copies_the_whole_tree_under_output_name_dist() {
        let (root, config, candidate) = fixture();

        let record = collect_output(&candidate, &config, false)
            .expect("collect")
            .expect("record");

        assert_eq!(record.status, CollectStatus::Collected { files: 2 });
        let dest = root.path().join("dist").join("projA").join("dist");
        assert_eq!(record.destination, dest);
        assert_eq!(
            fs::read_to_string(dest.join("index.html")).expect("read"),
            "<html>"
        );
        assert_eq!(
            fs::read_to_string(dest.join("assets").join("app.js")).expect("read"),
            "js"
        );
    }

    #[test]
    fn recollection_overwrites_stale_destination_content() {
        let (root, config, candidate) = fixture();
        collect_output(&candidate, &config, false).expect("first collect");

        fs::write(candidate.path.join("dist").join("index.html"), "<html v2>").expect("write");
        collect_output(&candidate, &config, false).expect("second collect");

        let dest = root.path().join("dist").join("projA").join("dist");
        assert_eq!(
            fs::read_to_string(dest.join("index.html")).expect("read"),
            "<html v2>"
        );
    }

    #[test]
    fn dry_run_writes_nothing() {
        let (root, config, candidate) = fixture();

        let record = collect_output(&candidate, &config, true)
            .expect("collect")
            .expect("record");

        assert_eq!(record.status, CollectStatus::WouldCollect);
        assert!(!root.path().join("dist").join("projA").exists());
    }

    #[test]
    fn empty_output_directory_still_yields_a_record() {
        let root = TempDir::new().expect("tempdir");
        let config = WorkspaceConfig::for_root(root.path());
        let proj = root.path().join("projC");
        fs::create_dir_all(proj.join("dist")).expect("mkdir");
        let candidate = ProjectCandidate::new("projC", proj);

        let record = collect_output(&candidate, &config, false)
            .expect("collect")
            .expect("record");
        assert_eq!(record.status, CollectStatus::Collected { files: 0 });
        assert!(record.destination.is_dir());
    }
}

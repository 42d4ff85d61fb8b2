//! `ensemble build --dry-run` must describe the run without touching disk.

use std::fs;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

fn ensemble_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("ensemble"))
}

fn seed_workspace(root: &TempDir) {
    let buildable = root.path().join("projA");
    fs::create_dir_all(&buildable).expect("mkdir projA");
    fs::write(buildable.join("package.json"), "{}\n").expect("write manifest");
    fs::write(buildable.join("build.sh"), "mkdir -p dist\n").expect("write build script");

    let prebuilt = root.path().join("prebuilt");
    fs::create_dir_all(prebuilt.join("dist")).expect("mkdir prebuilt/dist");
    fs::write(prebuilt.join("dist").join("old.txt"), "kept\n").expect("write output");
}

#[test]
fn dry_run_reports_plans_and_writes_nothing() {
    let root = TempDir::new().expect("root");
    seed_workspace(&root);

    ensemble_cmd()
        .arg("build")
        .arg(root.path())
        .args(["--command", "sh build.sh", "--dry-run"])
        .assert()
        .success()
        .stdout(contains("would build 'projA'"))
        .stdout(contains("would collect 'prebuilt'"))
        .stdout(contains("[dry-run]"));

    assert!(
        !root.path().join("dist").exists(),
        "dry-run must not create the output directory"
    );
    assert!(
        !root.path().join("projA").join("dist").exists(),
        "dry-run must not run the build command"
    );
    let entries = fs::read_dir(root.path().join("projA")).expect("read projA").count();
    assert_eq!(entries, 2, "dry-run must not create files in candidates");
}

#[test]
fn dry_run_json_report_is_marked_and_counts_plans() {
    let root = TempDir::new().expect("root");
    seed_workspace(&root);

    let assert = ensemble_cmd()
        .arg("build")
        .arg(root.path())
        .args(["--command", "sh build.sh", "--dry-run", "--json"])
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    let payload: serde_json::Value = serde_json::from_str(&stdout).expect("parse build json");

    assert_eq!(payload["dry_run"], true);
    assert_eq!(payload["builds"][0]["status"], "would_build");
    assert_eq!(payload["collections"][0]["status"], "would_collect");
    assert_eq!(payload["summary"]["built"], 0);
    assert_eq!(payload["summary"]["files"], 0);

    assert!(!root.path().join("dist").exists());
}

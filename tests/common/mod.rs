//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A throwaway project directory with an empty `scripts/` subdirectory.
///
/// Returns `(guard, project_root, scripts_dir)`; the directory is removed
/// when `guard` drops.
pub fn project() -> (TempDir, PathBuf, PathBuf) {
    let dir = tempfile::tempdir().expect("tempdir");
    let root = fs::canonicalize(dir.path()).expect("canonical tempdir");
    let scripts = root.join("scripts");
    fs::create_dir_all(&scripts).expect("create scripts dir");
    (dir, root, scripts)
}

/// Same as [`project`] with `config.yaml` holding `contents`.
pub fn project_with_config(contents: &str) -> (TempDir, PathBuf, PathBuf) {
    let (dir, root, scripts) = project();
    fs::write(root.join("config.yaml"), contents).expect("write config.yaml");
    (dir, root, scripts)
}

/// Writes `contents` to `dir/name` and returns the path.
pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write fixture file");
    path
}

/// A workflow config resembling the CFE study's top-level settings.
pub const SAMPLE_CONFIG: &str = "\
time_sampling: 3H
scenario:
  zone: [IE, DK, DE, NL]
  palette: [p1, p2, p3]
  policy: [ref, cfe100]
  participation: ['10', '25']
solving:
  solver:
    name: gurobi
    threads: 4
";

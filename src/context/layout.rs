//! Project root resolution.
//!
//! Step scripts live in `<project>/scripts` and address their files relative
//! to that directory. The layout is resolved once from the scripts directory
//! and the caller's working directory and then passed to every file access;
//! the process working directory is never changed.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

/// Name of the directory holding the step scripts.
pub const SCRIPTS_DIR: &str = "scripts";

/// Where the caller was relative to the project when the layout was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootResolution {
    /// Working directory is the scripts directory.
    FromScripts,
    /// Working directory is the project root.
    AtRoot,
    /// Working directory is unrelated; the computed root is used.
    Elsewhere,
}

/// Resolved project and scripts directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    pub project_root: PathBuf,
    pub scripts_dir: PathBuf,
}

fn normalized(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

impl ProjectLayout {
    /// Resolves the layout for a scripts directory as seen from `cwd`.
    ///
    /// The project root is always the parent of `scripts_dir`; the returned
    /// [`RootResolution`] records which of the three cases applied.
    pub fn resolve(scripts_dir: &Path, cwd: &Path) -> (Self, RootResolution) {
        let scripts_dir = normalized(scripts_dir);
        let project_root = scripts_dir
            .parent()
            .map_or_else(|| scripts_dir.clone(), Path::to_path_buf);
        let cwd = normalized(cwd);

        let resolution = if cwd == scripts_dir {
            RootResolution::FromScripts
        } else if cwd == project_root {
            RootResolution::AtRoot
        } else {
            RootResolution::Elsewhere
        };
        debug!(
            root = %project_root.display(),
            ?resolution,
            "resolved project layout"
        );

        (
            Self {
                project_root,
                scripts_dir,
            },
            resolution,
        )
    }

    /// Locates the scripts directory from `cwd`.
    ///
    /// `cwd` itself when it is named `scripts`; otherwise the `scripts` child
    /// of the nearest ancestor of `cwd` (including `cwd`) that has one. With no
    /// such ancestor, `cwd/scripts` is assumed.
    pub fn from_working_dir(cwd: &Path) -> (Self, RootResolution) {
        let scripts_dir = if cwd.file_name().is_some_and(|n| n == SCRIPTS_DIR) {
            cwd.to_path_buf()
        } else {
            cwd.ancestors()
                .map(|dir| dir.join(SCRIPTS_DIR))
                .find(|candidate| candidate.is_dir())
                .unwrap_or_else(|| cwd.join(SCRIPTS_DIR))
        };
        Self::resolve(&scripts_dir, cwd)
    }

    /// Joins a scripts-relative path onto the scripts directory.
    pub fn scripts_path(&self, relative: &Path) -> PathBuf {
        self.scripts_dir.join(relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project() -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().expect("tempdir");
        let scripts = dir.path().join(SCRIPTS_DIR);
        fs::create_dir_all(&scripts).expect("create scripts dir");
        (dir, scripts)
    }

    #[test]
    fn resolves_from_scripts_dir() {
        let (_dir, scripts) = project();
        let (layout, resolution) = ProjectLayout::resolve(&scripts, &scripts);
        assert_eq!(resolution, RootResolution::FromScripts);
        assert_eq!(layout.scripts_dir, normalized(&scripts));
    }

    #[test]
    fn resolves_at_root() {
        let (dir, scripts) = project();
        let (layout, resolution) = ProjectLayout::resolve(&scripts, dir.path());
        assert_eq!(resolution, RootResolution::AtRoot);
        assert_eq!(layout.project_root, normalized(dir.path()));
    }

    #[test]
    fn resolves_elsewhere_to_scripts_parent() {
        let (dir, scripts) = project();
        let other = tempfile::tempdir().expect("tempdir");
        let (layout, resolution) = ProjectLayout::resolve(&scripts, other.path());
        assert_eq!(resolution, RootResolution::Elsewhere);
        assert_eq!(layout.project_root, normalized(dir.path()));
    }

    #[test]
    fn working_dir_guess_handles_both_entry_points() {
        let (dir, scripts) = project();
        let (from_root, r1) = ProjectLayout::from_working_dir(dir.path());
        let (from_scripts, r2) = ProjectLayout::from_working_dir(&scripts);
        assert_eq!(r1, RootResolution::AtRoot);
        assert_eq!(r2, RootResolution::FromScripts);
        assert_eq!(from_root, from_scripts);
    }

    #[test]
    fn working_dir_below_root_finds_enclosing_project() {
        let (dir, scripts) = project();
        let results = dir.path().join("results").join("summaries");
        fs::create_dir_all(&results).expect("create results dir");
        let (layout, resolution) = ProjectLayout::from_working_dir(&results);
        assert_eq!(resolution, RootResolution::Elsewhere);
        assert_eq!(layout.project_root, normalized(dir.path()));
        assert_eq!(layout.scripts_dir, normalized(&scripts));
    }

    #[test]
    fn scripts_relative_paths_climb_to_root() {
        let layout = ProjectLayout {
            project_root: PathBuf::from("/proj"),
            scripts_dir: PathBuf::from("/proj/scripts"),
        };
        assert_eq!(
            layout.scripts_path(Path::new("../results/a.csv")),
            PathBuf::from("/proj/scripts/../results/a.csv")
        );
    }
}

//! Project-root discovery and export-directory layout.
//!
//! The dashboard lives somewhere inside a research project tree. The project
//! root is the first ancestor directory that contains both a `data/` and a
//! `notebooks/` folder; the precomputed artifacts are expected under
//! `<root>/data/exports/dashboard/`.

use std::path::{Path, PathBuf};

use miette::Diagnostic;
use thiserror::Error;

/// Marker directory that must exist at the project root.
pub const DATA_DIR: &str = "data";
/// Second marker directory that must exist at the project root.
pub const NOTEBOOKS_DIR: &str = "notebooks";

/// Maximum number of directory levels examined during discovery, the start
/// directory included. Bounds the walk on unusual filesystem layouts.
pub const MAX_ASCENTS: usize = 32;

/// Errors from project-root discovery.
#[derive(Debug, Error, Diagnostic)]
pub enum LocateError {
    #[error("project root not found above {start}")]
    #[diagnostic(
        code(temascope::paths::root_not_found),
        help(
            "The project root is the first ancestor directory containing both \
             `data/` and `notebooks/`. Run from inside the project tree, or pass \
             the root explicitly with `--root <PATH>`."
        )
    )]
    RootNotFound { start: String },
}

pub type LocateResult<T> = std::result::Result<T, LocateError>;

/// Resolved project locations: the root and the artifact export directory.
#[derive(Debug, Clone)]
pub struct ProjectPaths {
    /// Directory containing the `data/` and `notebooks/` markers.
    pub root: PathBuf,
    /// `root/data/exports/dashboard/` — where the upstream pipeline exports to.
    pub export_dir: PathBuf,
}

impl ProjectPaths {
    /// Walk from `start` through its ancestors until a directory containing
    /// both marker folders is found. At most [`MAX_ASCENTS`] levels are
    /// examined; exhausting them (or reaching the filesystem root) fails with
    /// [`LocateError::RootNotFound`].
    pub fn discover(start: &Path) -> LocateResult<Self> {
        start
            .ancestors()
            .take(MAX_ASCENTS)
            .find(|p| has_markers(p))
            .map(Self::at_root)
            .ok_or_else(|| LocateError::RootNotFound {
                start: start.display().to_string(),
            })
    }

    /// Use an explicit root without marker validation. Problems with the
    /// layout surface later as missing-artifact diagnostics at load time.
    pub fn at_root(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let export_dir = root.join(DATA_DIR).join("exports").join("dashboard");
        Self { root, export_dir }
    }

    /// Path of an artifact file inside the export directory.
    pub fn artifact(&self, name: &str) -> PathBuf {
        self.export_dir.join(name)
    }

    /// Path to the optional dashboard config file at the project root.
    pub fn config_file(&self) -> PathBuf {
        self.root.join("temascope.toml")
    }
}

fn has_markers(dir: &Path) -> bool {
    dir.join(DATA_DIR).is_dir() && dir.join(NOTEBOOKS_DIR).is_dir()
}

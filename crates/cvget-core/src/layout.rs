//! Destination tree under the base data directory.
//!
//! Per-dataset directories plus the unified `images/`, `labels/` and
//! `subsets/` folders used by later preprocessing. All creation is
//! idempotent; only failure to create the base directory is fatal to a run.

use crate::dataset::DatasetSpec;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Unified subdirectories created after all datasets are processed.
pub const UNIFIED_SUBDIRS: [&str; 3] = ["images", "labels", "subsets"];

/// Default base directory name, relative to the current working directory.
pub const DEFAULT_BASE_DIR: &str = "data";

/// The base data directory and the paths derived from it.
#[derive(Debug, Clone)]
pub struct DataLayout {
    base: PathBuf,
}

impl DataLayout {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Creates the base directory. This is the one fatal failure point of a
    /// run; everything below it is recovered per dataset.
    pub fn ensure_base(&self) -> Result<()> {
        fs::create_dir_all(&self.base)
            .with_context(|| format!("create base data directory {}", self.base.display()))
    }

    /// `<base>/<dataset name>`.
    pub fn dataset_dir(&self, spec: &DatasetSpec) -> PathBuf {
        self.base.join(&spec.name)
    }

    /// `<base>/<dataset name>/<archive filename>`.
    pub fn archive_path(&self, spec: &DatasetSpec) -> PathBuf {
        self.dataset_dir(spec).join(&spec.archive)
    }

    /// Creates the dataset directory (no-op when present).
    pub fn ensure_dataset_dir(&self, spec: &DatasetSpec) -> std::io::Result<PathBuf> {
        let dir = self.dataset_dir(spec);
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// Creates `images/`, `labels/` and `subsets/` under the base directory.
    pub fn ensure_unified(&self) -> Result<()> {
        for sub in UNIFIED_SUBDIRS {
            let dir = self.base.join(sub);
            fs::create_dir_all(&dir)
                .with_context(|| format!("create unified directory {}", dir.display()))?;
        }
        Ok(())
    }
}

impl Default for DataLayout {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_DIR)
    }
}

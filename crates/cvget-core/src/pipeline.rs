//! Sequential dataset orchestrator.
//!
//! For each dataset: ensure its directory, fetch, validate, extract. A step
//! failure marks the dataset for manual download and the run moves on; only
//! failure to create the base directory (or the unified folders at the end)
//! aborts. Datasets are processed one at a time with blocking I/O.

use crate::dataset::DatasetSpec;
use crate::extract::{extract, ExtractError};
use crate::fetch::{fetch, FetchOutcome};
use crate::layout::DataLayout;
use crate::retrieve::{RetrieveError, Retriever};
use crate::validate::{validate, ValidateError};
use anyhow::Result;
use std::path::PathBuf;
use thiserror::Error;

/// Failure of one step for one dataset. Never fatal to the run.
#[derive(Debug, Error)]
pub enum StepError {
    #[error("download failed: {0}")]
    Fetch(#[from] RetrieveError),
    #[error("validation failed: {0}")]
    Validate(#[from] ValidateError),
    #[error("extraction failed: {0}")]
    Extract(#[from] ExtractError),
    #[error("I/O: {0}")]
    Io(#[from] std::io::Error),
}

/// A dataset the run could not finish, with what to do about it.
#[derive(Debug)]
pub struct ManualDownload {
    pub dataset: String,
    /// Source to download by hand.
    pub url: String,
    /// Where to place the archive so the next run picks it up.
    pub archive_path: PathBuf,
    pub reason: String,
}

/// Outcome of a whole run.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Datasets fetched (or already present) and extracted.
    pub completed: Vec<String>,
    /// Datasets that need manual intervention.
    pub needs_manual: Vec<ManualDownload>,
}

impl RunReport {
    pub fn is_clean(&self) -> bool {
        self.needs_manual.is_empty()
    }
}

/// Runs the pipeline over `datasets`. Per-dataset failures are collected in
/// the report; `Err` is returned only for setup failures (base or unified
/// directories cannot be created).
pub fn run(
    datasets: &[DatasetSpec],
    layout: &DataLayout,
    retriever: &dyn Retriever,
) -> Result<RunReport> {
    layout.ensure_base()?;

    let mut report = RunReport::default();
    for spec in datasets {
        tracing::info!("processing dataset {}", spec.name);
        match run_dataset(spec, layout, retriever) {
            Ok(FetchOutcome::Downloaded) => {
                tracing::info!("{}: downloaded and extracted", spec.name);
                report.completed.push(spec.name.clone());
            }
            Ok(FetchOutcome::AlreadyPresent) => {
                tracing::info!("{}: archive already present, re-extracted", spec.name);
                report.completed.push(spec.name.clone());
            }
            Err(err) => {
                tracing::warn!("{}: {}", spec.name, err);
                report.needs_manual.push(ManualDownload {
                    dataset: spec.name.clone(),
                    url: spec.url.clone(),
                    archive_path: layout.archive_path(spec),
                    reason: err.to_string(),
                });
            }
        }
    }

    layout.ensure_unified()?;
    Ok(report)
}

/// Fetch → validate → extract for one dataset.
///
/// An archive that already exists on disk is trusted (the validation step
/// deletes anything it rejects, so survivors passed the sniff once) and only
/// re-extracted.
fn run_dataset(
    spec: &DatasetSpec,
    layout: &DataLayout,
    retriever: &dyn Retriever,
) -> Result<FetchOutcome, StepError> {
    let dataset_dir = layout.ensure_dataset_dir(spec)?;
    let archive = layout.archive_path(spec);

    let outcome = fetch(retriever, &spec.url, &archive)?;
    if outcome == FetchOutcome::Downloaded {
        let format = validate(&archive)?;
        tracing::debug!("{}: {} sniffed as {}", spec.name, spec.archive, format.as_str());
    }
    extract(&archive, &dataset_dir)?;
    Ok(outcome)
}

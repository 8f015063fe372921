//! Run command: the full fetch → validate → extract pipeline.

use anyhow::{bail, Result};
use cvget_core::config::{CvgetConfig, RetrievalBackend};
use cvget_core::dataset::{builtin_datasets, DatasetSpec};
use cvget_core::layout::{DataLayout, DEFAULT_BASE_DIR};
use cvget_core::pipeline;
use cvget_core::retrieve;
use std::path::PathBuf;

/// Runs the pipeline over the builtin datasets (optionally filtered by name)
/// and prints a summary. Per-dataset failures do not affect the exit status;
/// only setup failures bubble up as `Err`.
pub fn run_pipeline(
    cfg: &CvgetConfig,
    data_dir: Option<PathBuf>,
    backend: Option<RetrievalBackend>,
    names: &[String],
) -> Result<()> {
    let datasets = select_datasets(names)?;

    let base = data_dir
        .or_else(|| cfg.data_dir.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_BASE_DIR));
    let layout = DataLayout::new(base);

    let mut effective = cfg.clone();
    if let Some(backend) = backend {
        effective.backend = backend;
    }
    let retriever = retrieve::from_config(&effective);

    println!("Downloading {} dataset(s) into {}", datasets.len(), layout.base().display());
    let report = pipeline::run(&datasets, &layout, retriever.as_ref())?;

    for name in &report.completed {
        println!("  ok      {name}");
    }
    for manual in &report.needs_manual {
        println!("  MANUAL  {}: {}", manual.dataset, manual.reason);
        println!("          download {} ", manual.url);
        println!("          and place it at {}", manual.archive_path.display());
    }
    if report.is_clean() {
        println!("All datasets ready under {}", layout.base().display());
    } else {
        println!(
            "{} dataset(s) need manual download; re-run after placing the files.",
            report.needs_manual.len()
        );
    }
    Ok(())
}

/// Resolves `--dataset` filters against the builtin table.
fn select_datasets(names: &[String]) -> Result<Vec<DatasetSpec>> {
    let all = builtin_datasets();
    if names.is_empty() {
        return Ok(all);
    }
    let mut selected = Vec::with_capacity(names.len());
    for name in names {
        match all.iter().find(|d| &d.name == name) {
            Some(spec) => selected.push(spec.clone()),
            None => {
                let known: Vec<&str> = all.iter().map(|d| d.name.as_str()).collect();
                bail!("unknown dataset '{}' (known: {})", name, known.join(", "));
            }
        }
    }
    Ok(selected)
}

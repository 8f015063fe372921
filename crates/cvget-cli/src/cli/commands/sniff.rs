//! Sniff command: report a file's size and detected archive format.
//!
//! Inspection only; unlike the pipeline's validation step this never deletes
//! the file.

use anyhow::{Context, Result};
use cvget_core::validate::{sniff_format, MIN_ARCHIVE_BYTES};
use std::fs;
use std::io::Read;
use std::path::Path;

pub fn run_sniff(path: &Path) -> Result<()> {
    let len = fs::metadata(path)
        .with_context(|| format!("stat {}", path.display()))?
        .len();

    let mut prefix = [0u8; 8];
    let mut file = fs::File::open(path).with_context(|| format!("open {}", path.display()))?;
    let n = file.read(&mut prefix)?;

    match sniff_format(&prefix[..n]) {
        Some(format) => println!("{}: {} ({} bytes)", path.display(), format.as_str(), len),
        None => println!("{}: no known archive signature ({} bytes)", path.display(), len),
    }
    if len < MIN_ARCHIVE_BYTES {
        println!(
            "warning: below the {MIN_ARCHIVE_BYTES}-byte minimum; the pipeline would reject it"
        );
    }
    Ok(())
}

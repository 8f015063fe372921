//! Logging init: file under the XDG state dir, stderr when that fails.

use anyhow::Result;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

/// Resolves `~/.local/state/cvget/cvget.log`, creating the parent directory.
fn log_file_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("cvget")?;
    Ok(xdg_dirs.place_state_file("cvget.log")?)
}

fn open_log_file() -> Result<(fs::File, PathBuf)> {
    let path = log_file_path()?;
    let file = fs::OpenOptions::new().create(true).append(true).open(&path)?;
    Ok((file, path))
}

/// Initialize structured logging.
///
/// Appends to `~/.local/state/cvget/cvget.log`; when the state dir is
/// unavailable (unwritable home, sandbox) the subscriber writes to stderr
/// instead, so the CLI never fails over logging.
pub fn init() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,cvget=debug"));

    // Log volume is a handful of lines per dataset; a Mutex around the file
    // is plenty.
    let (writer, opened) = match open_log_file() {
        Ok((file, path)) => (BoxMakeWriter::new(Mutex::new(file)), Ok(path)),
        Err(err) => (BoxMakeWriter::new(io::stderr), Err(err)),
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();

    match opened {
        Ok(path) => tracing::info!("cvget logging to {}", path.display()),
        Err(err) => tracing::warn!("logging to stderr; no log file: {}", err),
    }
}

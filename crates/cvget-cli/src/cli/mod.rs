//! CLI for the cvget dataset downloader.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use cvget_core::config::{self, RetrievalBackend};
use std::path::PathBuf;

use commands::{run_completions, run_list, run_pipeline, run_sniff};

/// Top-level CLI for the cvget dataset downloader.
#[derive(Debug, Parser)]
#[command(name = "cvget")]
#[command(about = "cvget: fetch, validate, and extract computer-vision dataset archives", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

/// Retrieval backend override (`--backend`), mirrors the config values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BackendArg {
    /// Library HTTP client (libcurl).
    Curl,
    /// External download utility (curl-compatible arguments).
    External,
}

impl From<BackendArg> for RetrievalBackend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Curl => RetrievalBackend::Curl,
            BackendArg::External => RetrievalBackend::External,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download, validate, and extract the configured datasets.
    Run {
        /// Base data directory (default: ./data, or data_dir from config).
        #[arg(long, value_name = "DIR")]
        data_dir: Option<PathBuf>,

        /// Retrieval backend, overriding the config.
        #[arg(long, value_enum)]
        backend: Option<BackendArg>,

        /// Restrict the run to the named datasets (repeatable).
        #[arg(long = "dataset", value_name = "NAME")]
        datasets: Vec<String>,
    },

    /// List the built-in datasets.
    List,

    /// Check a file's size and magic bytes and print the detected format.
    Sniff {
        /// Path to the candidate archive.
        path: PathBuf,
    },

    /// Generate shell completions.
    Completions {
        /// Target shell.
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Run {
                data_dir,
                backend,
                datasets,
            } => run_pipeline(&cfg, data_dir, backend.map(Into::into), &datasets)?,
            CliCommand::List => run_list(),
            CliCommand::Sniff { path } => run_sniff(&path)?,
            CliCommand::Completions { shell } => run_completions(shell),
        }

        Ok(())
    }
}

use cvget_core::logging;

mod cli;

use crate::cli::CliCommand;

fn main() {
    // Initialize logging as early as possible; init() falls back to stderr
    // on its own if the state dir is unwritable.
    logging::init();

    // Parse CLI and dispatch.
    if let Err(err) = CliCommand::run_from_args() {
        eprintln!("cvget error: {:#}", err);
        std::process::exit(1);
    }
}

//! CLI command handlers. Each command is in its own file for clarity.

mod completions;
mod list;
mod run;
mod sniff;

pub use completions::run_completions;
pub use list::run_list;
pub use run::run_pipeline;
pub use sniff::run_sniff;
